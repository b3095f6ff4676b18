//! Honoree entity
//!
//! The professional payload is a tagged union stored as JSONB: internal
//! honorees carry employment data, external ones carry their institution.
//! It is parsed once at the data-access boundary, never at render sites.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Honoree kind discriminant, mirrored in the `kind` column
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HonoreeKind {
    Interno,
    Externo,
}

impl HonoreeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HonoreeKind::Interno => "interno",
            HonoreeKind::Externo => "externo",
        }
    }
}

impl From<&ProfessionalProfile> for HonoreeKind {
    fn from(profile: &ProfessionalProfile) -> Self {
        match profile {
            ProfessionalProfile::Interno { .. } => HonoreeKind::Interno,
            ProfessionalProfile::Externo { .. } => HonoreeKind::Externo,
        }
    }
}

/// Professional data payload, discriminated by the `type` tag
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProfessionalProfile {
    Interno {
        name: String,
        email: String,
        unit: String,
        registration_id: String,
        role: String,
        years_at_company: i32,
    },
    Externo {
        name: String,
        email: String,
        institution: String,
        external_role: String,
    },
}

impl ProfessionalProfile {
    /// Display name regardless of variant
    pub fn name(&self) -> &str {
        match self {
            ProfessionalProfile::Interno { name, .. } => name,
            ProfessionalProfile::Externo { name, .. } => name,
        }
    }
}

/// Headline numbers shown on the honoree page
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HonoreeStats {
    pub years_of_service: i32,
    pub total_awards: i32,
    pub projects_led: i32,
    pub units: i32,
}

/// One entry of the honoree's career timeline
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub id: Uuid,
    pub semester: String,
    pub title: String,
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "honorees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Derived from the professional payload at the write boundary
    #[sea_orm(column_type = "Text")]
    pub kind: String,

    /// Tagged professional payload as JSONB
    #[sea_orm(column_type = "JsonBinary")]
    pub professional_data: serde_json::Value,

    /// Rich-text HTML
    #[sea_orm(column_type = "Text")]
    pub biography: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub photo_url: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub video_url: Option<String>,

    pub award_id: Option<Uuid>,

    pub brand_id: Uuid,

    pub unit_id: Uuid,

    pub regional_id: Option<Uuid>,

    pub awarded_at: Date,

    /// Unpublished honorees never reach public pages or dashboard aggregates
    pub is_published: bool,

    /// Headline numbers as JSONB
    #[sea_orm(column_type = "JsonBinary")]
    pub stats: serde_json::Value,

    /// Career timeline as JSONB (list of {id, semester, title, category})
    #[sea_orm(column_type = "JsonBinary")]
    pub timeline: serde_json::Value,

    /// Rich-text HTML
    #[sea_orm(column_type = "Text")]
    pub initiatives: String,

    /// Rich-text HTML
    #[sea_orm(column_type = "Text")]
    pub recognitions: String,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Get the kind as an enum
    pub fn honoree_kind(&self) -> HonoreeKind {
        match self.kind.as_str() {
            "externo" => HonoreeKind::Externo,
            _ => HonoreeKind::Interno,
        }
    }

    /// Deserialize the professional payload
    pub fn professional_profile(&self) -> Result<ProfessionalProfile, serde_json::Error> {
        serde_json::from_value(self.professional_data.clone())
    }

    /// Deserialize the headline stats
    pub fn honoree_stats(&self) -> Result<HonoreeStats, serde_json::Error> {
        serde_json::from_value(self.stats.clone())
    }

    /// Deserialize the career timeline
    pub fn timeline_entries(&self) -> Result<Vec<TimelineEntry>, serde_json::Error> {
        serde_json::from_value(self.timeline.clone())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::award::Entity",
        from = "Column::AwardId",
        to = "super::award::Column::Id"
    )]
    Award,

    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id"
    )]
    Brand,

    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnitId",
        to = "super::unit::Column::Id"
    )]
    Unit,

    #[sea_orm(
        belongs_to = "super::regional::Entity",
        from = "Column::RegionalId",
        to = "super::regional::Column::Id"
    )]
    Regional,
}

impl Related<super::award::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Award.def()
    }
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl Related<super::regional::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Regional.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_professional_profile_tag_roundtrip() {
        let payload = serde_json::json!({
            "type": "interno",
            "name": "Maria Silva",
            "email": "maria.silva@example.com",
            "unit": "Campus Recife",
            "registration_id": "12345",
            "role": "Coordenadora",
            "years_at_company": 8
        });

        let profile: ProfessionalProfile = serde_json::from_value(payload).unwrap();
        assert_eq!(HonoreeKind::from(&profile), HonoreeKind::Interno);
        assert_eq!(profile.name(), "Maria Silva");
    }

    #[test]
    fn test_professional_profile_externo() {
        let payload = serde_json::json!({
            "type": "externo",
            "name": "João Souza",
            "email": "joao@example.org",
            "institution": "Universidade Federal",
            "external_role": "Pesquisador"
        });

        let profile: ProfessionalProfile = serde_json::from_value(payload).unwrap();
        assert_eq!(HonoreeKind::from(&profile), HonoreeKind::Externo);
    }

    #[test]
    fn test_professional_profile_rejects_unknown_tag() {
        let payload = serde_json::json!({
            "type": "visitante",
            "name": "X",
            "email": "x@example.com"
        });

        assert!(serde_json::from_value::<ProfessionalProfile>(payload).is_err());
    }
}
