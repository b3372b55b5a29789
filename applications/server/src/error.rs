/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cadence_core::CadenceError;
use cadence_playback::ResolveError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Database(#[from] CadenceError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<cadence_storage::StorageError> for ServerError {
    fn from(err: cadence_storage::StorageError) -> Self {
        ServerError::Database(err.into())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ServerError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Resolve(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ServerError::Database(e) => core_error_status(e),
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string())
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

fn core_error_status(err: CadenceError) -> (StatusCode, String) {
    match err {
        CadenceError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        CadenceError::Duplicate(_) => (StatusCode::CONFLICT, err.to_string()),
        CadenceError::InvalidInput(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        CadenceError::PermissionDenied(_) => (StatusCode::FORBIDDEN, err.to_string()),
        CadenceError::Unavailable(ref msg) => {
            tracing::warn!("Store unavailable: {}", msg);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable".to_string(),
            )
        }
        CadenceError::Storage(_) | CadenceError::Serialization(_) => {
            tracing::error!("Database error: {:?}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            )
        }
    }
}
