//! SeaORM entity models
//!
//! Database entities for the Premiações backend

mod award;
mod brand;
mod home_media;
mod honoree;
mod profile;
mod regional;
mod unit;

pub use award::{
    AwardCriterion,
    Column as AwardColumn,
    CycleInfo,
    Entity as AwardEntity,
    Model as Award,
    ActiveModel as AwardActiveModel,
};

pub use honoree::{
    Column as HonoreeColumn,
    Entity as HonoreeEntity,
    HonoreeKind,
    HonoreeStats,
    Model as Honoree,
    ActiveModel as HonoreeActiveModel,
    ProfessionalProfile,
    TimelineEntry,
};

pub use brand::{
    Column as BrandColumn,
    Entity as BrandEntity,
    Model as Brand,
    ActiveModel as BrandActiveModel,
};

pub use unit::{
    Column as UnitColumn,
    Entity as UnitEntity,
    Model as Unit,
    ActiveModel as UnitActiveModel,
};

pub use regional::{
    Column as RegionalColumn,
    Entity as RegionalEntity,
    Model as Regional,
    ActiveModel as RegionalActiveModel,
};

pub use home_media::{
    Column as HomeMediaColumn,
    Entity as HomeMediaEntity,
    Model as HomeMedia,
    ActiveModel as HomeMediaActiveModel,
};

pub use profile::{
    Column as ProfileColumn,
    Entity as ProfileEntity,
    Model as Profile,
    ActiveModel as ProfileActiveModel,
};
