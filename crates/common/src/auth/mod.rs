//! Authentication and authorization utilities
//!
//! Provides:
//! - Session token generation and validation
//! - Password hashing
//! - Reset-code generation and digests
//! - Profile context extraction with the organization allow-list

use crate::errors::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Extracted session context available to handlers
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Profile ID
    pub profile_id: Uuid,

    /// Organization the profile belongs to
    pub organization_id: Uuid,

    /// Profile role
    pub role: String,

    /// Request ID for tracing
    pub request_id: String,
}

impl AuthContext {
    /// Check if the context holds a specific role
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role || self.role == crate::ADMIN_ROLE
    }

    /// Require the admin role, returning error if not present
    pub fn require_admin(&self) -> Result<()> {
        if self.has_role(crate::ADMIN_ROLE) {
            Ok(())
        } else {
            Err(AppError::Forbidden {
                message: "Admin role required".to_string(),
            })
        }
    }
}

/// Session token claims
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (profile ID)
    pub sub: String,

    /// Organization ID
    pub org: String,

    /// Profile role
    pub role: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Session token manager. Constructed once at boot and passed by reference;
/// there is no ambient global session state.
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_secs: i64,
    /// The single organization allowed on this deployment
    allowed_organization: Uuid,
}

impl TokenManager {
    /// Create a new token manager with the given secret
    pub fn new(secret: &str, expiration_secs: u64, allowed_organization: Uuid) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration_secs: expiration_secs as i64,
            allowed_organization,
        }
    }

    /// The allow-listed organization id
    pub fn allowed_organization(&self) -> Uuid {
        self.allowed_organization
    }

    /// Generate a new session token
    pub fn generate_token(
        &self,
        profile_id: Uuid,
        organization_id: Uuid,
        role: &str,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.expiration_secs);

        let claims = SessionClaims {
            sub: profile_id.to_string(),
            org: organization_id.to_string(),
            role: role.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal {
                message: format!("Failed to generate token: {}", e),
            })
    }

    /// Validate a session token and enforce the organization allow-list
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::ExpiredToken,
                _ => AppError::Unauthorized {
                    message: "Invalid session token".to_string(),
                },
            })?;

        let org = Uuid::parse_str(&claims.org).map_err(|_| AppError::Unauthorized {
            message: "Invalid organization claim".to_string(),
        })?;

        if org != self.allowed_organization {
            return Err(AppError::OrganizationNotAllowed);
        }

        Ok(claims)
    }
}

/// Hash a password for storage
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
}

/// Verify a password against a stored hash
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    PasswordHash::new(stored_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Generate a six-digit password-reset code
pub fn generate_reset_code() -> String {
    let n = rand::random::<u32>() % 1_000_000;
    format!("{:06}", n)
}

/// Digest a reset code for storage
pub fn hash_reset_code(code: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code.as_bytes());
    hex::encode(hasher.finalize())
}

/// Validate a reset code against a stored digest
pub fn verify_reset_code(code: &str, stored_hash: &str) -> bool {
    hash_reset_code(code) == stored_hash
}

/// Extract a bearer token from the Authorization header
pub fn extract_bearer(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Axum extractor for AuthContext. Requires the TokenManager to be
/// installed as a request extension at router construction.
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        // Extract request ID
        let request_id = parts
            .headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let manager = parts
            .extensions
            .get::<TokenManager>()
            .cloned()
            .ok_or_else(|| AppError::Internal {
                message: "TokenManager extension not installed".to_string(),
            })?;

        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized {
                message: "Missing Authorization header".to_string(),
            })?;

        let token = extract_bearer(auth_header).ok_or_else(|| AppError::Unauthorized {
            message: "Malformed Authorization header".to_string(),
        })?;

        let claims = manager.validate_token(token)?;

        let profile_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized {
            message: "Invalid subject claim".to_string(),
        })?;

        let organization_id = Uuid::parse_str(&claims.org).map_err(|_| AppError::Unauthorized {
            message: "Invalid organization claim".to_string(),
        })?;

        Ok(AuthContext {
            profile_id,
            organization_id,
            role: claims.role,
            request_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let hash = hash_password("s3nh@-forte").unwrap();
        assert!(verify_password("s3nh@-forte", &hash));
        assert!(!verify_password("senha-errada", &hash));
    }

    #[test]
    fn test_reset_code_shape() {
        let code = generate_reset_code();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_reset_code_digest() {
        let code = "123456";
        let hash = hash_reset_code(code);
        assert!(verify_reset_code(code, &hash));
        assert!(!verify_reset_code("654321", &hash));
    }

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer("Bearer abc"), Some("abc"));
        assert_eq!(extract_bearer("abc"), None);
        assert_eq!(extract_bearer("Basic abc"), None);
    }

    #[test]
    fn test_token_roundtrip() {
        let org = Uuid::new_v4();
        let manager = TokenManager::new("test_secret", 3600, org);

        let profile_id = Uuid::new_v4();
        let token = manager.generate_token(profile_id, org, "admin").unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.sub, profile_id.to_string());
        assert_eq!(claims.org, org.to_string());
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_token_rejects_foreign_organization() {
        let allowed = Uuid::new_v4();
        let other = Uuid::new_v4();
        let manager = TokenManager::new("test_secret", 3600, allowed);

        let token = manager.generate_token(Uuid::new_v4(), other, "admin").unwrap();
        let err = manager.validate_token(&token).unwrap_err();
        assert!(matches!(err, AppError::OrganizationNotAllowed));
    }

    #[test]
    fn test_admin_role_check() {
        let ctx = AuthContext {
            profile_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            role: "editor".to_string(),
            request_id: "r1".to_string(),
        };
        assert!(ctx.require_admin().is_err());
        assert!(ctx.has_role("editor"));
    }
}
