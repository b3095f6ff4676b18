//! Unit management handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::handlers::{search_and_page, ListQuery, ListResponse};
use crate::AppState;
use premiacoes_common::{
    auth::AuthContext,
    db::{models::Unit, UnitDraft, Repository},
    errors::{AppError, Result},
    metrics,
};

/// Unit fields accepted by create/update
#[derive(Debug, Deserialize, Validate)]
pub struct UnitInput {
    #[validate(length(min = 1, max = 160))]
    pub name: String,

    #[validate(length(min = 1, max = 200))]
    pub location: String,

    pub brand_id: Uuid,

    pub regional_id: Option<Uuid>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,
}

impl UnitInput {
    fn into_draft(self) -> UnitDraft {
        UnitDraft {
            name: self.name,
            location: self.location,
            brand_id: self.brand_id,
            regional_id: self.regional_id,
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// List units for the admin table
pub async fn list(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<Unit>>> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());
    let units = repo.list_units().await?;

    Ok(Json(search_and_page(units, &query)))
}

/// Create a new unit
pub async fn create(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(input): Json<UnitInput>,
) -> Result<(StatusCode, Json<Unit>)> {
    auth.require_admin()?;

    input.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());
    let unit = repo.create_unit(input.into_draft()).await?;

    metrics::record_mutation("unit", "create");

    tracing::info!(
        unit_id = %unit.id,
        profile_id = %auth.profile_id,
        "Unit created"
    );

    Ok((StatusCode::CREATED, Json(unit)))
}

/// Update an existing unit
pub async fn update(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(input): Json<UnitInput>,
) -> Result<Json<Unit>> {
    auth.require_admin()?;

    input.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());
    let unit = repo.update_unit(id, input.into_draft()).await?;

    metrics::record_mutation("unit", "update");

    tracing::info!(
        unit_id = %id,
        profile_id = %auth.profile_id,
        "Unit updated"
    );

    Ok(Json(unit))
}

/// Delete a unit
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());

    let deleted = repo.delete_unit(id).await?;
    if !deleted {
        return Err(AppError::UnitNotFound { id: id.to_string() });
    }

    metrics::record_mutation("unit", "delete");

    tracing::info!(
        unit_id = %id,
        profile_id = %auth.profile_id,
        "Unit deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
