//! Storage upload handler
//!
//! Admin forms upload their binaries first and only then write the record
//! referencing the returned public URL.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::AppState;
use premiacoes_common::{
    auth::AuthContext,
    errors::{AppError, Result},
    metrics,
    storage::Bucket,
};

/// Upload result
#[derive(Serialize)]
pub struct UploadResponse {
    pub url: String,
}

/// Receive one multipart file and forward it to the storage service
pub async fn upload(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(bucket): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    auth.require_admin()?;

    let bucket: Bucket = bucket.parse()?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::InvalidFormat {
            message: format!("Malformed multipart body: {}", e),
        }
    })? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidFormat {
                message: format!("Failed to read upload body: {}", e),
            })?
            .to_vec();

        let size = bytes.len();
        let url = state
            .storage
            .put(bucket, &filename, &content_type, bytes)
            .await?;

        metrics::record_upload(bucket.as_str(), size);

        tracing::info!(
            bucket = %bucket,
            filename = %filename,
            size,
            profile_id = %auth.profile_id,
            "Upload stored"
        );

        return Ok((StatusCode::CREATED, Json(UploadResponse { url })));
    }

    Err(AppError::MissingField {
        field: "file".to_string(),
    })
}
