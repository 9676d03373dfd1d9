/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use melody_core::MelodyError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Catalog(#[from] MelodyError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Bcrypt error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

impl From<melody_storage::StorageError> for ServerError {
    fn from(err: melody_storage::StorageError) -> Self {
        ServerError::Catalog(err.into())
    }
}

/// Status for a catalog error; `None` means it is an internal failure
fn catalog_status(err: &MelodyError) -> Option<StatusCode> {
    let status = match err {
        MelodyError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
        MelodyError::PermissionDenied { .. } | MelodyError::PermissionDeniedWithContext(_) => {
            StatusCode::FORBIDDEN
        }
        MelodyError::TrackNotFound(_)
        | MelodyError::AlbumNotFound(_)
        | MelodyError::PlaylistNotFound(_)
        | MelodyError::PerformerNotFound(_)
        | MelodyError::UserNotFound(_)
        | MelodyError::MembershipNotFound { .. }
        | MelodyError::NotFavorited { .. } => StatusCode::NOT_FOUND,
        MelodyError::DuplicateMembership { .. }
        | MelodyError::AlreadyFavorited { .. }
        | MelodyError::UniquenessViolation(_)
        | MelodyError::DuplicateTrack { .. } => StatusCode::CONFLICT,
        MelodyError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        MelodyError::Storage(_) | MelodyError::Database(_) => return None,
    };
    Some(status)
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg, "authentication_failed"),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "bad_request"),
            ServerError::Catalog(ref e) => match catalog_status(e) {
                Some(status) => {
                    tracing::debug!(code = e.code(), "Request rejected: {}", e);
                    (status, e.to_string(), e.code())
                }
                None => {
                    tracing::error!("Catalog error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Database error".to_string(),
                        "internal",
                    )
                }
            },
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                    "internal",
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "internal",
                )
            }
            ServerError::Jwt(ref e) => {
                tracing::warn!("JWT error: {:?}", e);
                (
                    StatusCode::UNAUTHORIZED,
                    "Invalid token".to_string(),
                    "invalid_token",
                )
            }
            ServerError::Bcrypt(ref e) => {
                tracing::error!("Bcrypt error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Password error".to_string(),
                    "internal",
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
            "code": code,
        }));

        (status, body).into_response()
    }
}
