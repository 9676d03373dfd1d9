//! Performer types

use super::limits::{require_text, MAX_NAME_LEN};
use super::{AlbumId, PerformerId, Position, TrackId, UserId};
use serde::{Deserialize, Serialize};

/// A performer (track and album author)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Performer {
    pub id: PerformerId,
    pub name: String,
    pub created_by: Option<UserId>,
    pub created_at: String,
}

/// Data for creating a new performer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePerformer {
    pub name: String,
}

impl CreatePerformer {
    pub fn validate(&self) -> crate::Result<()> {
        require_text("name", &self.name, MAX_NAME_LEN)
    }
}

/// Id and name of a performer, nested in other views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformerRef {
    pub id: PerformerId,
    pub name: String,
}

/// Performer with its tracks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformerView {
    pub id: PerformerId,
    pub name: String,
    pub tracks: Vec<PerformerTrack>,
}

/// Track of a performer, with the albums it appears on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformerTrack {
    pub id: TrackId,
    pub title: String,
    pub albums: Vec<TrackAlbumRef>,
}

/// Album a track belongs to, with the track's position there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackAlbumRef {
    pub id: AlbumId,
    pub title: String,
    pub position: Position,
}
