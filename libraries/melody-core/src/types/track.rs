//! Track types

use super::limits::{require_text, MAX_TITLE_LEN};
use super::{AlbumId, PerformerId, TrackId};
use serde::{Deserialize, Serialize};

pub use super::performer::TrackAlbumRef;
use super::PerformerRef;

/// A track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub performer_id: PerformerId,
    pub performer_name: String, // Denormalized
    pub created_at: String,
}

/// Data for creating a new track
///
/// `album_ids` appends the new track to each album, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTrack {
    pub title: String,
    pub performer_id: PerformerId,
    #[serde(default)]
    pub album_ids: Vec<AlbumId>,
}

impl CreateTrack {
    pub fn validate(&self) -> crate::Result<()> {
        require_text("title", &self.title, MAX_TITLE_LEN)
    }
}

/// Track with its author and album memberships
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackView {
    pub id: TrackId,
    pub title: String,
    pub author: PerformerRef,
    pub albums: Vec<TrackAlbumRef>,
}
