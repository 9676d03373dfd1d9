/// Core error types for the Melody catalog
use thiserror::Error;
use crate::types::{
    AlbumId, ContainerRef, FavoriteTarget, PerformerId, PlaylistId, TrackId, UserId,
};

/// Result type alias using `MelodyError`
pub type Result<T> = std::result::Result<T, MelodyError>;

/// Core error type for the Melody catalog
///
/// Every variant is a request-level failure: it is reported to the caller
/// with the offending identifier and never aborts the process.
#[derive(Error, Debug)]
pub enum MelodyError {
    /// The operation needs an authenticated caller
    #[error("Authentication required")]
    AuthenticationRequired,

    /// Caller does not own the container
    #[error("Permission denied: user {user_id} does not own {container}")]
    PermissionDenied {
        container: ContainerRef,
        user_id: UserId,
    },

    /// Permission denied with context
    #[error("Permission denied: {0}")]
    PermissionDeniedWithContext(String),

    /// Track is already a member of the container
    #[error("Track {track_id} is already in {container}")]
    DuplicateMembership {
        container: ContainerRef,
        track_id: TrackId,
    },

    /// Track is not a member of the container
    #[error("Track {track_id} is not in {container}")]
    MembershipNotFound {
        container: ContainerRef,
        track_id: TrackId,
    },

    /// The (user, target) favorite already exists
    #[error("{target} is already in favorites")]
    AlreadyFavorited { target: FavoriteTarget },

    /// The (user, target) favorite does not exist
    #[error("{target} is not in favorites")]
    NotFavorited { target: FavoriteTarget },

    /// A storage-level unique constraint rejected the write
    #[error("Uniqueness violation: {0}")]
    UniquenessViolation(String),

    /// Performer already has a track with this title
    #[error("Performer {performer_id} already has a track titled {title:?}")]
    DuplicateTrack {
        performer_id: PerformerId,
        title: String,
    },

    /// Track not found
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Album not found
    #[error("Album not found: {0}")]
    AlbumNotFound(AlbumId),

    /// Playlist not found
    #[error("Playlist not found: {0}")]
    PlaylistNotFound(PlaylistId),

    /// Performer not found
    #[error("Performer not found: {0}")]
    PerformerNotFound(PerformerId),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Database errors (for storage implementations)
    #[error("Database error: {0}")]
    Database(String),
}

impl MelodyError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a permission denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDeniedWithContext(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Not-found error for the given container
    pub fn container_not_found(container: ContainerRef) -> Self {
        use crate::types::ContainerKind;
        match container.kind {
            ContainerKind::Album => Self::AlbumNotFound(container.id),
            ContainerKind::Playlist => Self::PlaylistNotFound(container.id),
        }
    }

    /// Not-found error for the given favorite target
    pub fn target_not_found(target: FavoriteTarget) -> Self {
        use crate::types::FavoriteKind;
        match target.kind {
            FavoriteKind::Track => Self::TrackNotFound(target.id),
            FavoriteKind::Album => Self::AlbumNotFound(target.id),
            FavoriteKind::Playlist => Self::PlaylistNotFound(target.id),
        }
    }

    /// Stable machine-readable code, used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationRequired => "authentication_required",
            Self::PermissionDenied { .. } | Self::PermissionDeniedWithContext(_) => {
                "permission_denied"
            }
            Self::DuplicateMembership { .. } => "duplicate_membership",
            Self::MembershipNotFound { .. } => "membership_not_found",
            Self::AlreadyFavorited { .. } => "already_favorited",
            Self::NotFavorited { .. } => "not_favorited",
            Self::UniquenessViolation(_) => "uniqueness_violation",
            Self::DuplicateTrack { .. } => "duplicate_track",
            Self::TrackNotFound(_)
            | Self::AlbumNotFound(_)
            | Self::PlaylistNotFound(_)
            | Self::PerformerNotFound(_)
            | Self::UserNotFound(_) => "not_found",
            Self::InvalidInput(_) => "invalid_input",
            Self::Storage(_) | Self::Database(_) => "internal",
        }
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for MelodyError {
    fn from(err: sqlx::Error) -> Self {
        match err.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => {
                Self::UniquenessViolation(db_err.message().to_string())
            }
            // Length limits are validated up front; the schema's CHECKs
            // only fire for writes that skipped validation.
            Some(db_err) if db_err.is_check_violation() => {
                Self::InvalidInput(db_err.message().to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}
