//! Homepage hero media handlers
//!
//! Only one row is active at a time; the public homepage consumes just
//! the active one.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use premiacoes_common::{
    auth::AuthContext,
    db::{models::HomeMedia, HomeMediaDraft, Repository},
    errors::{AppError, Result},
    metrics,
};

/// Home media fields accepted by create/update
#[derive(Debug, Deserialize, Validate)]
pub struct HomeMediaInput {
    #[validate(length(min = 1, max = 200))]
    pub headline: String,

    #[serde(default)]
    pub description: String,

    pub image_url: Option<String>,

    pub video_url: Option<String>,
}

impl HomeMediaInput {
    fn into_draft(self) -> HomeMediaDraft {
        HomeMediaDraft {
            headline: self.headline,
            description: self.description,
            image_url: self.image_url,
            video_url: self.video_url,
        }
    }
}

/// The active hero for the public homepage
pub async fn get_active(State(state): State<AppState>) -> Result<Json<HomeMedia>> {
    let repo = Repository::new(state.db.clone());

    let media = repo
        .find_active_home_media()
        .await?
        .ok_or_else(|| AppError::HomeMediaNotFound {
            id: "active".to_string(),
        })?;

    Ok(Json(media))
}

/// List all rows for the admin table
pub async fn list(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<Vec<HomeMedia>>> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());
    let media = repo.list_home_media().await?;

    Ok(Json(media))
}

/// Create a new row (inactive until activated)
pub async fn create(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(input): Json<HomeMediaInput>,
) -> Result<(StatusCode, Json<HomeMedia>)> {
    auth.require_admin()?;

    input.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());
    let media = repo.create_home_media(input.into_draft()).await?;

    metrics::record_mutation("home_media", "create");

    tracing::info!(
        home_media_id = %media.id,
        profile_id = %auth.profile_id,
        "Home media created"
    );

    Ok((StatusCode::CREATED, Json(media)))
}

/// Update an existing row
pub async fn update(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(input): Json<HomeMediaInput>,
) -> Result<Json<HomeMedia>> {
    auth.require_admin()?;

    input.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());
    let media = repo.update_home_media(id, input.into_draft()).await?;

    metrics::record_mutation("home_media", "update");

    tracing::info!(
        home_media_id = %id,
        profile_id = %auth.profile_id,
        "Home media updated"
    );

    Ok(Json(media))
}

/// Make one row the homepage hero, deactivating the rest
pub async fn activate(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<HomeMedia>> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());
    let media = repo.activate_home_media(id).await?;

    metrics::record_mutation("home_media", "activate");

    tracing::info!(
        home_media_id = %id,
        profile_id = %auth.profile_id,
        "Home media activated"
    );

    Ok(Json(media))
}

/// Delete a row
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());

    let deleted = repo.delete_home_media(id).await?;
    if !deleted {
        return Err(AppError::HomeMediaNotFound { id: id.to_string() });
    }

    metrics::record_mutation("home_media", "delete");

    tracing::info!(
        home_media_id = %id,
        profile_id = %auth.profile_id,
        "Home media deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
