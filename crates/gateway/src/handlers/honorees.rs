//! Honoree management and showcase handlers
//!
//! Public routes only ever see published honorees; the admin surface sees
//! everything and controls publication.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::handlers::{search_and_page, ListQuery, ListResponse};
use crate::AppState;
use premiacoes_common::{
    auth::AuthContext,
    db::{
        models::{Honoree, HonoreeStats, ProfessionalProfile, TimelineEntry},
        HonoreeDraft,
        Repository,
    },
    errors::{AppError, Result},
    metrics,
};

/// Honoree fields accepted by create/update
#[derive(Debug, Deserialize)]
pub struct HonoreeInput {
    pub professional_data: ProfessionalProfile,

    #[serde(default)]
    pub biography: String,

    pub photo_url: Option<String>,

    pub video_url: Option<String>,

    pub award_id: Option<Uuid>,

    pub brand_id: Uuid,

    pub unit_id: Uuid,

    pub regional_id: Option<Uuid>,

    pub awarded_at: NaiveDate,

    #[serde(default)]
    pub is_published: bool,

    #[serde(default)]
    pub stats: HonoreeStats,

    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,

    #[serde(default)]
    pub initiatives: String,

    #[serde(default)]
    pub recognitions: String,
}

impl HonoreeInput {
    /// Required-field checks the admin form relies on
    fn validate(&self) -> Result<()> {
        if self.professional_data.name().trim().is_empty() {
            return Err(AppError::MissingField {
                field: "professional_data.name".to_string(),
            });
        }
        Ok(())
    }

    fn into_draft(self) -> HonoreeDraft {
        HonoreeDraft {
            profile: self.professional_data,
            biography: self.biography,
            photo_url: self.photo_url,
            video_url: self.video_url,
            award_id: self.award_id,
            brand_id: self.brand_id,
            unit_id: self.unit_id,
            regional_id: self.regional_id,
            awarded_at: self.awarded_at,
            is_published: self.is_published,
            stats: self.stats,
            timeline: self.timeline,
            initiatives: self.initiatives,
            recognitions: self.recognitions,
        }
    }
}

/// Full honoree view with the nested payloads in typed form
#[derive(Debug, Serialize)]
pub struct HonoreeResponse {
    pub id: Uuid,
    pub kind: String,
    pub professional_data: ProfessionalProfile,
    pub biography: String,
    pub photo_url: Option<String>,
    pub video_url: Option<String>,
    pub award_id: Option<Uuid>,
    pub brand_id: Uuid,
    pub unit_id: Uuid,
    pub regional_id: Option<Uuid>,
    pub awarded_at: NaiveDate,
    pub is_published: bool,
    pub stats: HonoreeStats,
    pub timeline: Vec<TimelineEntry>,
    pub initiatives: String,
    pub recognitions: String,
    pub created_at: String,
}

impl TryFrom<Honoree> for HonoreeResponse {
    type Error = AppError;

    fn try_from(honoree: Honoree) -> Result<Self> {
        let professional_data = honoree.professional_profile()?;
        let stats = honoree.honoree_stats()?;
        let timeline = honoree.timeline_entries()?;

        Ok(Self {
            id: honoree.id,
            kind: honoree.kind,
            professional_data,
            biography: honoree.biography,
            photo_url: honoree.photo_url,
            video_url: honoree.video_url,
            award_id: honoree.award_id,
            brand_id: honoree.brand_id,
            unit_id: honoree.unit_id,
            regional_id: honoree.regional_id,
            awarded_at: honoree.awarded_at,
            is_published: honoree.is_published,
            stats,
            timeline,
            initiatives: honoree.initiatives,
            recognitions: honoree.recognitions,
            created_at: honoree.created_at.to_rfc3339(),
        })
    }
}

/// Compact honoree row for gallery and timeline views
#[derive(Debug, Serialize)]
pub struct HonoreeSummary {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub photo_url: Option<String>,
    pub award_id: Option<Uuid>,
    pub awarded_at: NaiveDate,
}

impl TryFrom<&Honoree> for HonoreeSummary {
    type Error = AppError;

    fn try_from(honoree: &Honoree) -> Result<Self> {
        let profile = honoree.professional_profile()?;

        Ok(Self {
            id: honoree.id,
            name: profile.name().to_string(),
            kind: honoree.kind.clone(),
            photo_url: honoree.photo_url.clone(),
            award_id: honoree.award_id,
            awarded_at: honoree.awarded_at,
        })
    }
}

/// One year of the public timeline
#[derive(Debug, Serialize)]
pub struct TimelineYear {
    pub year: i32,
    pub honorees: Vec<HonoreeSummary>,
}

fn to_responses(honorees: Vec<Honoree>) -> Result<Vec<HonoreeResponse>> {
    honorees.into_iter().map(HonoreeResponse::try_from).collect()
}

// ============================================================================
// Public surface
// ============================================================================

/// List published honorees
pub async fn list_public(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<HonoreeResponse>>> {
    let repo = Repository::new(state.db.clone());
    let honorees = repo.list_honorees(true).await?;

    Ok(Json(search_and_page(to_responses(honorees)?, &query)))
}

/// Get a published honoree
pub async fn get_public(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HonoreeResponse>> {
    let repo = Repository::new(state.db.clone());

    let honoree = repo
        .find_honoree_by_id(id)
        .await?
        .filter(|h| h.is_published)
        .ok_or_else(|| AppError::HonoreeNotFound { id: id.to_string() })?;

    Ok(Json(honoree.try_into()?))
}

/// Published honorees carrying a photo
pub async fn gallery(
    State(state): State<AppState>,
) -> Result<Json<Vec<HonoreeSummary>>> {
    let repo = Repository::new(state.db.clone());

    let honorees = repo.list_honorees(true).await?;

    honorees
        .iter()
        .filter(|h| h.photo_url.is_some())
        .map(HonoreeSummary::try_from)
        .collect::<Result<Vec<_>>>()
        .map(Json)
}

/// Published honorees grouped by award year, newest year first
pub async fn timeline(
    State(state): State<AppState>,
) -> Result<Json<Vec<TimelineYear>>> {
    let repo = Repository::new(state.db.clone());

    let honorees = repo.list_honorees(true).await?;

    let mut years: Vec<TimelineYear> = Vec::new();
    for honoree in &honorees {
        let summary = HonoreeSummary::try_from(honoree)?;
        let year = honoree.awarded_at.year();

        match years.iter_mut().find(|y| y.year == year) {
            Some(entry) => entry.honorees.push(summary),
            None => years.push(TimelineYear {
                year,
                honorees: vec![summary],
            }),
        }
    }

    years.sort_by(|a, b| b.year.cmp(&a.year));

    Ok(Json(years))
}

// ============================================================================
// Admin surface
// ============================================================================

/// List all honorees including unpublished
pub async fn list_admin(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<HonoreeResponse>>> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());
    let honorees = repo.list_honorees(false).await?;

    Ok(Json(search_and_page(to_responses(honorees)?, &query)))
}

/// Get any honoree
pub async fn get_admin(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<Json<HonoreeResponse>> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());

    let honoree = repo
        .find_honoree_by_id(id)
        .await?
        .ok_or_else(|| AppError::HonoreeNotFound { id: id.to_string() })?;

    Ok(Json(honoree.try_into()?))
}

/// Create a new honoree
pub async fn create(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(input): Json<HonoreeInput>,
) -> Result<(StatusCode, Json<HonoreeResponse>)> {
    auth.require_admin()?;
    input.validate()?;

    let repo = Repository::new(state.db.clone());
    let honoree = repo.create_honoree(input.into_draft()).await?;

    metrics::record_mutation("honoree", "create");

    tracing::info!(
        honoree_id = %honoree.id,
        profile_id = %auth.profile_id,
        "Honoree created"
    );

    Ok((StatusCode::CREATED, Json(honoree.try_into()?)))
}

/// Update an existing honoree
pub async fn update(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(input): Json<HonoreeInput>,
) -> Result<Json<HonoreeResponse>> {
    auth.require_admin()?;
    input.validate()?;

    let repo = Repository::new(state.db.clone());
    let honoree = repo.update_honoree(id, input.into_draft()).await?;

    metrics::record_mutation("honoree", "update");

    tracing::info!(
        honoree_id = %id,
        profile_id = %auth.profile_id,
        "Honoree updated"
    );

    Ok(Json(honoree.try_into()?))
}

/// Publication toggle body
#[derive(Debug, Deserialize)]
pub struct SetPublishedRequest {
    pub is_published: bool,
}

/// Toggle public visibility
pub async fn set_published(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(request): Json<SetPublishedRequest>,
) -> Result<Json<HonoreeResponse>> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());
    let honoree = repo.set_honoree_published(id, request.is_published).await?;

    metrics::record_mutation("honoree", "publish");

    tracing::info!(
        honoree_id = %id,
        is_published = request.is_published,
        profile_id = %auth.profile_id,
        "Honoree publication changed"
    );

    Ok(Json(honoree.try_into()?))
}

/// Delete an honoree
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    auth.require_admin()?;

    let repo = Repository::new(state.db.clone());

    let deleted = repo.delete_honoree(id).await?;
    if !deleted {
        return Err(AppError::HonoreeNotFound { id: id.to_string() });
    }

    metrics::record_mutation("honoree", "delete");

    tracing::info!(
        honoree_id = %id,
        profile_id = %auth.profile_id,
        "Honoree deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
