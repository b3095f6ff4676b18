//! Award management and showcase handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::handlers::{search_and_page, ListQuery, ListResponse};
use crate::AppState;
use premiacoes_common::{
    auth::AuthContext,
    db::{
        models::{Award, AwardCriterion, CycleInfo},
        AwardDraft,
        Repository,
    },
    errors::{AppError, Result},
    metrics,
};

/// Award fields accepted by create/update
#[derive(Debug, Deserialize, Validate)]
pub struct AwardInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub image_url: Option<String>,

    #[serde(default)]
    pub criteria: Vec<AwardCriterion>,

    pub cycle_info: CycleInfo,
}

impl AwardInput {
    fn into_draft(self) -> AwardDraft {
        AwardDraft {
            name: self.name,
            description: self.description,
            image_url: self.image_url,
            criteria: self.criteria,
            cycle_info: self.cycle_info,
        }
    }
}

/// Award view with the nested payloads in typed form
#[derive(Debug, Serialize)]
pub struct AwardResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub criteria: Vec<AwardCriterion>,
    pub cycle_info: CycleInfo,
    pub created_at: String,
}

impl TryFrom<Award> for AwardResponse {
    type Error = AppError;

    fn try_from(award: Award) -> Result<Self> {
        let criteria = award.criteria()?;
        let cycle_info = award.cycle_info()?;

        Ok(Self {
            id: award.id,
            name: award.name,
            description: award.description,
            image_url: award.image_url,
            criteria,
            cycle_info,
            created_at: award.created_at.to_rfc3339(),
        })
    }
}

fn to_responses(awards: Vec<Award>) -> Result<Vec<AwardResponse>> {
    awards.into_iter().map(AwardResponse::try_from).collect()
}

/// List awards for the public showcase
pub async fn list_public(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<AwardResponse>>> {
    let repo = Repository::new(state.db.clone());
    let awards = repo.list_awards().await?;

    Ok(Json(search_and_page(to_responses(awards)?, &query)))
}

/// Get one award for the public page
pub async fn get_public(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AwardResponse>> {
    let repo = Repository::new(state.db.clone());

    let award = repo
        .find_award_by_id(id)
        .await?
        .ok_or_else(|| AppError::AwardNotFound { id: id.to_string() })?;

    Ok(Json(award.try_into()?))
}

/// List awards for the admin table
pub async fn list_admin(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<AwardResponse>>> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());
    let awards = repo.list_awards().await?;

    Ok(Json(search_and_page(to_responses(awards)?, &query)))
}

/// Get one award for editing
pub async fn get_admin(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<AwardResponse>> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());

    let award = repo
        .find_award_by_id(id)
        .await?
        .ok_or_else(|| AppError::AwardNotFound { id: id.to_string() })?;

    Ok(Json(award.try_into()?))
}

/// Create a new award
pub async fn create(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(input): Json<AwardInput>,
) -> Result<(StatusCode, Json<AwardResponse>)> {
    auth.require_admin()?;

    input.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());
    let award = repo.create_award(input.into_draft()).await?;

    metrics::record_mutation("award", "create");

    tracing::info!(
        award_id = %award.id,
        profile_id = %auth.profile_id,
        "Award created"
    );

    Ok((StatusCode::CREATED, Json(award.try_into()?)))
}

/// Update an existing award
pub async fn update(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(input): Json<AwardInput>,
) -> Result<Json<AwardResponse>> {
    auth.require_admin()?;

    input.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());
    let award = repo.update_award(id, input.into_draft()).await?;

    metrics::record_mutation("award", "update");

    tracing::info!(
        award_id = %id,
        profile_id = %auth.profile_id,
        "Award updated"
    );

    Ok(Json(award.try_into()?))
}

/// Delete an award
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());

    let deleted = repo.delete_award(id).await?;
    if !deleted {
        return Err(AppError::AwardNotFound { id: id.to_string() });
    }

    metrics::record_mutation("award", "delete");

    tracing::info!(
        award_id = %id,
        profile_id = %auth.profile_id,
        "Award deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
