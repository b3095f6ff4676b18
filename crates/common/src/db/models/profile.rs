//! Profile entity
//!
//! Local account record. Membership in the allow-listed organization is
//! checked at every sign-in.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text", unique)]
    pub username: String,

    #[sea_orm(column_type = "Text")]
    pub full_name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub avatar_url: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub role: String,

    /// Set until the first password change completes
    pub first_access: bool,

    pub organization_id: Uuid,

    #[sea_orm(column_type = "Text")]
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// SHA-256 digest of the outstanding reset code, if any
    #[sea_orm(column_type = "Text", nullable)]
    #[serde(skip_serializing)]
    pub reset_code_hash: Option<String>,

    pub reset_code_expires_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Check if the profile holds the admin role
    pub fn is_admin(&self) -> bool {
        self.role == crate::ADMIN_ROLE
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
