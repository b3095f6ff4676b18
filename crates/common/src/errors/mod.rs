//! Error types for the Premiações services
//!
//! Provides a comprehensive error handling system with:
//! - Distinct error types for different failure modes
//! - HTTP status code mapping
//! - Structured error responses
//! - Error codes for client handling
//! - pt-BR user-facing messages for known codes

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

/// Error codes for machine-readable error identification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation errors (1xxx)
    ValidationError,
    MissingField,
    InvalidFormat,
    PayloadTooLarge,

    // Authentication errors (2xxx)
    Unauthorized,
    InvalidCredentials,
    ExpiredToken,
    InvalidResetCode,

    // Authorization errors (3xxx)
    Forbidden,
    OrganizationNotAllowed,

    // Resource errors (4xxx)
    NotFound,
    HonoreeNotFound,
    AwardNotFound,
    BrandNotFound,
    UnitNotFound,
    RegionalNotFound,
    HomeMediaNotFound,
    ProfileNotFound,

    // Conflict errors (5xxx)
    Conflict,
    BrandInUse,

    // Database errors (7xxx)
    DatabaseError,
    ConnectionError,

    // External service errors (8xxx)
    StorageError,

    // Internal errors (9xxx)
    InternalError,
    ConfigurationError,
    SerializationError,

    // Service unavailable
    ServiceUnavailable,
}

impl ErrorCode {
    /// Get the numeric code for this error
    pub fn as_code(&self) -> u16 {
        match self {
            // Validation (1xxx)
            ErrorCode::ValidationError => 1001,
            ErrorCode::MissingField => 1002,
            ErrorCode::InvalidFormat => 1003,
            ErrorCode::PayloadTooLarge => 1004,

            // Authn (2xxx)
            ErrorCode::Unauthorized => 2001,
            ErrorCode::InvalidCredentials => 2002,
            ErrorCode::ExpiredToken => 2003,
            ErrorCode::InvalidResetCode => 2004,

            // Authz (3xxx)
            ErrorCode::Forbidden => 3001,
            ErrorCode::OrganizationNotAllowed => 3002,

            // Resources (4xxx)
            ErrorCode::NotFound => 4001,
            ErrorCode::HonoreeNotFound => 4002,
            ErrorCode::AwardNotFound => 4003,
            ErrorCode::BrandNotFound => 4004,
            ErrorCode::UnitNotFound => 4005,
            ErrorCode::RegionalNotFound => 4006,
            ErrorCode::HomeMediaNotFound => 4007,
            ErrorCode::ProfileNotFound => 4008,

            // Conflicts (5xxx)
            ErrorCode::Conflict => 5001,
            ErrorCode::BrandInUse => 5002,

            // Database (7xxx)
            ErrorCode::DatabaseError => 7001,
            ErrorCode::ConnectionError => 7002,

            // External (8xxx)
            ErrorCode::StorageError => 8001,

            // Internal (9xxx)
            ErrorCode::InternalError => 9001,
            ErrorCode::ConfigurationError => 9002,
            ErrorCode::SerializationError => 9003,

            ErrorCode::ServiceUnavailable => 9999,
        }
    }

    /// pt-BR message shown to end users for known codes.
    /// Unknown codes fall back to the raw error message.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            ErrorCode::ValidationError | ErrorCode::MissingField => {
                Some("Preencha todos os campos obrigatórios.")
            }
            ErrorCode::Unauthorized => Some("Acesso não autorizado."),
            ErrorCode::InvalidCredentials => Some("Usuário ou senha inválidos."),
            ErrorCode::ExpiredToken => Some("Sua sessão expirou. Faça login novamente."),
            ErrorCode::InvalidResetCode => {
                Some("Código de redefinição inválido ou expirado.")
            }
            ErrorCode::OrganizationNotAllowed => {
                Some("Seu usuário não pertence à organização autorizada.")
            }
            ErrorCode::HonoreeNotFound => Some("Homenageado não encontrado."),
            ErrorCode::AwardNotFound => Some("Prêmio não encontrado."),
            ErrorCode::BrandNotFound => Some("Marca não encontrada."),
            ErrorCode::UnitNotFound => Some("Unidade não encontrada."),
            ErrorCode::RegionalNotFound => Some("Regional não encontrada."),
            ErrorCode::HomeMediaNotFound => {
                Some("Mídia da página inicial não encontrada.")
            }
            ErrorCode::ProfileNotFound => Some("Perfil não encontrado."),
            ErrorCode::BrandInUse => {
                Some("Não é possível excluir uma marca com unidades vinculadas.")
            }
            ErrorCode::StorageError => Some("Falha ao enviar o arquivo. Tente novamente."),
            _ => None,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation failed: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Required field missing: {field}")]
    MissingField { field: String },

    #[error("Invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("Payload too large: {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },

    // Authentication errors
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid or expired reset code")]
    InvalidResetCode,

    // Authorization errors
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Profile does not belong to the allowed organization")]
    OrganizationNotAllowed,

    // Resource errors
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound { resource_type: String, id: String },

    #[error("Honoree not found: {id}")]
    HonoreeNotFound { id: String },

    #[error("Award not found: {id}")]
    AwardNotFound { id: String },

    #[error("Brand not found: {id}")]
    BrandNotFound { id: String },

    #[error("Unit not found: {id}")]
    UnitNotFound { id: String },

    #[error("Regional not found: {id}")]
    RegionalNotFound { id: String },

    #[error("Home media not found: {id}")]
    HomeMediaNotFound { id: String },

    #[error("Profile not found: {id}")]
    ProfileNotFound { id: String },

    // Conflict errors
    #[error("Duplicate resource: {message}")]
    Duplicate { message: String },

    #[error("Brand {id} has {dependent_units} dependent unit(s)")]
    BrandInUse { id: String, dependent_units: u64 },

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Database connection error: {message}")]
    DatabaseConnection { message: String },

    // External service errors
    #[error("Storage service error: {message}")]
    Storage { message: String },

    #[error("Storage request error: {0}")]
    StorageTransport(#[from] reqwest::Error),

    // Internal errors
    #[error("Internal server error: {message}")]
    Internal { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Service unavailable: {message}")]
    ServiceUnavailable { message: String },

    // Generic
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { .. } => ErrorCode::ValidationError,
            AppError::MissingField { .. } => ErrorCode::MissingField,
            AppError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            AppError::PayloadTooLarge { .. } => ErrorCode::PayloadTooLarge,
            AppError::Unauthorized { .. } => ErrorCode::Unauthorized,
            AppError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AppError::ExpiredToken => ErrorCode::ExpiredToken,
            AppError::InvalidResetCode => ErrorCode::InvalidResetCode,
            AppError::Forbidden { .. } => ErrorCode::Forbidden,
            AppError::OrganizationNotAllowed => ErrorCode::OrganizationNotAllowed,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::HonoreeNotFound { .. } => ErrorCode::HonoreeNotFound,
            AppError::AwardNotFound { .. } => ErrorCode::AwardNotFound,
            AppError::BrandNotFound { .. } => ErrorCode::BrandNotFound,
            AppError::UnitNotFound { .. } => ErrorCode::UnitNotFound,
            AppError::RegionalNotFound { .. } => ErrorCode::RegionalNotFound,
            AppError::HomeMediaNotFound { .. } => ErrorCode::HomeMediaNotFound,
            AppError::ProfileNotFound { .. } => ErrorCode::ProfileNotFound,
            AppError::Duplicate { .. } => ErrorCode::Conflict,
            AppError::BrandInUse { .. } => ErrorCode::BrandInUse,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::DatabaseConnection { .. } => ErrorCode::ConnectionError,
            AppError::Storage { .. } => ErrorCode::StorageError,
            AppError::StorageTransport(_) => ErrorCode::StorageError,
            AppError::Internal { .. } => ErrorCode::InternalError,
            AppError::Configuration { .. } => ErrorCode::ConfigurationError,
            AppError::Serialization(_) => ErrorCode::SerializationError,
            AppError::ServiceUnavailable { .. } => ErrorCode::ServiceUnavailable,
            AppError::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            AppError::Validation { .. } |
            AppError::MissingField { .. } |
            AppError::InvalidFormat { .. } => StatusCode::BAD_REQUEST,

            // 401 Unauthorized
            AppError::Unauthorized { .. } |
            AppError::InvalidCredentials |
            AppError::ExpiredToken |
            AppError::InvalidResetCode => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            AppError::Forbidden { .. } |
            AppError::OrganizationNotAllowed => StatusCode::FORBIDDEN,

            // 404 Not Found
            AppError::NotFound { .. } |
            AppError::HonoreeNotFound { .. } |
            AppError::AwardNotFound { .. } |
            AppError::BrandNotFound { .. } |
            AppError::UnitNotFound { .. } |
            AppError::RegionalNotFound { .. } |
            AppError::HomeMediaNotFound { .. } |
            AppError::ProfileNotFound { .. } => StatusCode::NOT_FOUND,

            // 409 Conflict
            AppError::Duplicate { .. } |
            AppError::BrandInUse { .. } => StatusCode::CONFLICT,

            // 413 Payload Too Large
            AppError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,

            // 500 Internal Server Error
            AppError::Database(_) |
            AppError::DatabaseConnection { .. } |
            AppError::Internal { .. } |
            AppError::Configuration { .. } |
            AppError::Serialization(_) |
            AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 502 Bad Gateway
            AppError::Storage { .. } |
            AppError::StorageTransport(_) => StatusCode::BAD_GATEWAY,

            // 503 Service Unavailable
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Check if this error should be logged at error level
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }

    /// Check if this error is a client error
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Structured error response for API
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    /// pt-BR message for display; falls back to the raw message
    pub user_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let message = self.to_string();

        // Log based on severity
        if self.is_server_error() {
            tracing::error!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Server error"
            );
        } else if self.is_client_error() {
            tracing::warn!(
                error = %message,
                code = ?code,
                status = status.as_u16(),
                "Client error"
            );
        }

        let user_message = code
            .user_message()
            .map(String::from)
            .unwrap_or_else(|| message.clone());

        let body = ErrorResponse {
            error: ErrorDetails {
                code,
                message,
                user_message,
                request_id: None, // Should be filled by middleware
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_mapping() {
        let err = AppError::HonoreeNotFound { id: "test".into() };
        assert_eq!(err.code(), ErrorCode::HonoreeNotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_error() {
        let err = AppError::Validation {
            message: "Nome é obrigatório".into(),
            field: Some("name".into()),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(!err.is_server_error());
        assert!(err.is_client_error());
    }

    #[test]
    fn test_brand_in_use_is_conflict() {
        let err = AppError::BrandInUse {
            id: "b1".into(),
            dependent_units: 3,
        };
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.code().as_code(), 5002);
    }

    #[test]
    fn test_user_message_translation() {
        assert_eq!(
            ErrorCode::InvalidCredentials.user_message(),
            Some("Usuário ou senha inválidos.")
        );
        // Unknown codes fall back to the raw message
        assert_eq!(ErrorCode::InternalError.user_message(), None);
    }

    #[test]
    fn test_server_error() {
        let err = AppError::Internal {
            message: "Something went wrong".into(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_server_error());
    }
}
