//! Ordered album/playlist membership types

use super::{AlbumId, PlaylistId, Position, TrackId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of container a track can be a member of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    Album,
    Playlist,
}

impl ContainerKind {
    /// Table holding the containers
    pub fn table(&self) -> &'static str {
        match self {
            ContainerKind::Album => "albums",
            ContainerKind::Playlist => "playlists",
        }
    }

    /// Join table holding the membership records
    pub fn membership_table(&self) -> &'static str {
        match self {
            ContainerKind::Album => "album_tracks",
            ContainerKind::Playlist => "playlist_tracks",
        }
    }

    /// Column of the join table referencing the container
    pub fn container_column(&self) -> &'static str {
        match self {
            ContainerKind::Album => "album_id",
            ContainerKind::Playlist => "playlist_id",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContainerKind::Album => "album",
            ContainerKind::Playlist => "playlist",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a single album or playlist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerRef {
    pub kind: ContainerKind,
    pub id: i64,
}

impl ContainerRef {
    pub fn new(kind: ContainerKind, id: i64) -> Self {
        Self { kind, id }
    }

    pub fn album(id: AlbumId) -> Self {
        Self::new(ContainerKind::Album, id)
    }

    pub fn playlist(id: PlaylistId) -> Self {
        Self::new(ContainerKind::Playlist, id)
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// Track entry inside a container, ordered by `position`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberView {
    pub track_id: TrackId,
    pub title: String,
    pub author: Option<String>,
    pub position: Position,
    pub added_at: String,
}

/// Container with its ordered members, returned after membership changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerView {
    pub id: i64,
    pub kind: ContainerKind,
    pub title: String,
    pub tracks: Vec<MemberView>,
}

impl ContainerView {
    /// Track ids in position order
    pub fn track_ids(&self) -> Vec<TrackId> {
        self.tracks.iter().map(|t| t.track_id).collect()
    }

    /// Position of a track, if it is a member
    pub fn position_of(&self, track_id: TrackId) -> Option<Position> {
        self.tracks
            .iter()
            .find(|t| t.track_id == track_id)
            .map(|t| t.position)
    }
}

/// Result of removing a single track from a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RemovalStatus {
    /// Membership deleted; later members were shifted down
    Removed { position: Position },
    /// The track was not a member
    MembershipNotFound,
}

/// Per-track outcome of a batch removal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalOutcome {
    pub track_id: TrackId,
    #[serde(flatten)]
    pub status: RemovalStatus,
}

/// Outcomes of a batch removal, in request order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalReport {
    pub container: ContainerRef,
    pub outcomes: Vec<RemovalOutcome>,
}

impl RemovalReport {
    pub fn removed(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, RemovalStatus::Removed { .. }))
            .map(|o| o.track_id)
    }

    pub fn missing(&self) -> impl Iterator<Item = TrackId> + '_ {
        self.outcomes
            .iter()
            .filter(|o| o.status == RemovalStatus::MembershipNotFound)
            .map(|o| o.track_id)
    }

    pub fn is_complete(&self) -> bool {
        self.missing().next().is_none()
    }
}
