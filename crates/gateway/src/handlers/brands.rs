//! Brand management handlers
//!
//! Deleting a brand is refused while units depend on it; the repository
//! checks before issuing the delete, so a refusal leaves everything
//! unchanged.

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
    db::{models::Brand, Repository},
    errors::{AppError, Result},
    metrics,
};

/// Brand fields accepted by create/update
#[derive(Debug, Deserialize, Validate)]
pub struct BrandInput {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
}

/// List brands for the admin table
pub async fn list(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<Brand>>> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());
    let brands = repo.list_brands().await?;

    Ok(Json(search_and_page(brands, &query)))
}

/// Create a new brand
pub async fn create(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(input): Json<BrandInput>,
) -> Result<(StatusCode, Json<Brand>)> {
    auth.require_admin()?;

    input.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());
    let brand = repo.create_brand(input.name).await?;

    metrics::record_mutation("brand", "create");

    tracing::info!(
        brand_id = %brand.id,
        profile_id = %auth.profile_id,
        "Brand created"
    );

    Ok((StatusCode::CREATED, Json(brand)))
}

/// Update an existing brand
pub async fn update(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(input): Json<BrandInput>,
) -> Result<Json<Brand>> {
    auth.require_admin()?;

    input.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());
    let brand = repo.update_brand(id, input.name).await?;

    metrics::record_mutation("brand", "update");

    tracing::info!(
        brand_id = %id,
        profile_id = %auth.profile_id,
        "Brand updated"
    );

    Ok(Json(brand))
}

/// Delete a brand with no dependent units
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());

    let deleted = repo.delete_brand(id).await?;
    if !deleted {
        return Err(AppError::BrandNotFound { id: id.to_string() });
    }

    metrics::record_mutation("brand", "delete");

    tracing::info!(
        brand_id = %id,
        profile_id = %auth.profile_id,
        "Brand deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
