//! Award entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One evaluation criterion of an award
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardCriterion {
    pub title: String,
    pub description: String,
}

/// Current award cycle shown on the public award page
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleInfo {
    pub edition: String,
    pub description: String,
    pub button_text: String,
    pub button_link: String,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "awards")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,

    /// Evaluation criteria as JSONB (list of {title, description})
    #[sea_orm(column_type = "JsonBinary")]
    pub criteria: serde_json::Value,

    /// Current cycle as JSONB ({edition, description, button_text, button_link})
    #[sea_orm(column_type = "JsonBinary")]
    pub cycle_info: serde_json::Value,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Deserialize the criteria list
    pub fn criteria(&self) -> Result<Vec<AwardCriterion>, serde_json::Error> {
        serde_json::from_value(self.criteria.clone())
    }

    /// Deserialize the cycle info
    pub fn cycle_info(&self) -> Result<CycleInfo, serde_json::Error> {
        serde_json::from_value(self.cycle_info.clone())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::honoree::Entity")]
    Honorees,
}

impl Related<super::honoree::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Honorees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
