//! Object-storage client
//!
//! Thin HTTP client for the external bucket service. Uploads return the
//! public URL under which the object is served; records are written only
//! after the upload has resolved.

use crate::config::StorageConfig;
use crate::errors::{AppError, Result};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Buckets the application writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Awards,
    Honorees,
    HomeMedia,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Awards => "awards",
            Bucket::Honorees => "honorees",
            Bucket::HomeMedia => "home_media",
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bucket {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "awards" => Ok(Bucket::Awards),
            "honorees" => Ok(Bucket::Honorees),
            "home_media" => Ok(Bucket::HomeMedia),
            other => Err(AppError::InvalidFormat {
                message: format!("Unknown bucket: {}", other),
            }),
        }
    }
}

/// Client for the external storage HTTP API
#[derive(Clone)]
pub struct StorageClient {
    client: reqwest::Client,
    api_url: String,
    public_url: String,
    service_key: Option<String>,
    max_upload_bytes: usize,
}

impl StorageClient {
    /// Create a new storage client from configuration
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration {
                message: format!("Failed to create storage HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            public_url: config.public_url.trim_end_matches('/').to_string(),
            service_key: config.service_key.clone(),
            max_upload_bytes: config.max_upload_bytes,
        })
    }

    /// Maximum accepted upload size in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Upload an object and return its public URL
    pub async fn put(
        &self,
        bucket: Bucket,
        original_filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String> {
        if bytes.len() > self.max_upload_bytes {
            return Err(AppError::PayloadTooLarge {
                size: bytes.len(),
                limit: self.max_upload_bytes,
            });
        }

        let key = object_key(original_filename);
        let url = format!("{}/object/{}/{}", self.api_url, bucket, key);

        let mut request = self
            .client
            .post(&url)
            .header("content-type", content_type)
            .body(bytes);

        if let Some(ref service_key) = self.service_key {
            request = request.bearer_auth(service_key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Storage {
                message: format!("Upload rejected with {}: {}", status, body),
            });
        }

        Ok(self.public_object_url(bucket, &key))
    }

    /// Public URL for a stored object
    pub fn public_object_url(&self, bucket: Bucket, key: &str) -> String {
        format!("{}/{}/{}", self.public_url, bucket, key)
    }
}

/// Build a collision-free object key, preserving a sane file extension
fn object_key(original_filename: &str) -> String {
    let extension = original_filename
        .rsplit('.')
        .next()
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= 8
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
                && *ext != original_filename
        })
        .map(str::to_ascii_lowercase);

    let id = uuid::Uuid::new_v4();

    match extension {
        Some(ext) => format!("{}.{}", id, ext),
        None => id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_parse() {
        assert_eq!("awards".parse::<Bucket>().unwrap(), Bucket::Awards);
        assert_eq!("home_media".parse::<Bucket>().unwrap(), Bucket::HomeMedia);
        assert!("documents".parse::<Bucket>().is_err());
    }

    #[test]
    fn test_object_key_keeps_extension() {
        let key = object_key("foto-perfil.JPG");
        assert!(key.ends_with(".jpg"));

        let key = object_key("video.mp4");
        assert!(key.ends_with(".mp4"));
    }

    #[test]
    fn test_object_key_drops_weird_extension() {
        let key = object_key("sem-extensao");
        assert!(!key.contains('.'));

        let key = object_key("arquivo.ex%20t");
        assert!(!key.contains('.'));
    }

    #[test]
    fn test_public_object_url() {
        let config = StorageConfig {
            api_url: "http://storage.local/api/".to_string(),
            public_url: "http://cdn.local/public/".to_string(),
            service_key: None,
            timeout_secs: 5,
            max_upload_bytes: 1024,
        };
        let client = StorageClient::new(&config).unwrap();

        assert_eq!(
            client.public_object_url(Bucket::Honorees, "abc.png"),
            "http://cdn.local/public/honorees/abc.png"
        );
    }
}
