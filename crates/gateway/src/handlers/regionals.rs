//! Regional management handlers

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
    db::{models::Regional, Repository},
    errors::{AppError, Result},
    metrics,
};

/// Regional fields accepted by create/update
#[derive(Debug, Deserialize, Validate)]
pub struct RegionalInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
}

/// List regionals for the admin table
pub async fn list(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<Regional>>> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());
    let regionals = repo.list_regionals().await?;

    Ok(Json(search_and_page(regionals, &query)))
}

/// Create a new regional
pub async fn create(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(input): Json<RegionalInput>,
) -> Result<(StatusCode, Json<Regional>)> {
    auth.require_admin()?;

    input.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());
    let regional = repo.create_regional(input.name).await?;

    metrics::record_mutation("regional", "create");

    tracing::info!(
        regional_id = %regional.id,
        profile_id = %auth.profile_id,
        "Regional created"
    );

    Ok((StatusCode::CREATED, Json(regional)))
}

/// Update an existing regional
pub async fn update(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(input): Json<RegionalInput>,
) -> Result<Json<Regional>> {
    auth.require_admin()?;

    input.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());
    let regional = repo.update_regional(id, input.name).await?;

    metrics::record_mutation("regional", "update");

    tracing::info!(
        regional_id = %id,
        profile_id = %auth.profile_id,
        "Regional updated"
    );

    Ok(Json(regional))
}

/// Delete a regional
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());

    let deleted = repo.delete_regional(id).await?;
    if !deleted {
        return Err(AppError::RegionalNotFound { id: id.to_string() });
    }

    metrics::record_mutation("regional", "delete");

    tracing::info!(
        regional_id = %id,
        profile_id = %auth.profile_id,
        "Regional deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
