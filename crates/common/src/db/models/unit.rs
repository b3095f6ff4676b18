//! Unit entity
//!
//! A physical campus belonging to a brand and optionally a regional.
//! Coordinates are kept for the public map display.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "units")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub location: String,

    pub brand_id: Uuid,

    pub regional_id: Option<Uuid>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id"
    )]
    Brand,

    #[sea_orm(
        belongs_to = "super::regional::Entity",
        from = "Column::RegionalId",
        to = "super::regional::Column::Id"
    )]
    Regional,

    #[sea_orm(has_many = "super::honoree::Entity")]
    Honorees,
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::regional::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Regional.def()
    }
}

impl Related<super::honoree::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Honorees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
