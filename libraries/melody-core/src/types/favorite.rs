//! Favorite targets and the summary projection shared by listings

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of entity a user can favorite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Track,
    Album,
    Playlist,
}

impl FavoriteKind {
    /// Table holding the favorite records
    pub fn table(&self) -> &'static str {
        match self {
            FavoriteKind::Track => "favorite_tracks",
            FavoriteKind::Album => "favorite_albums",
            FavoriteKind::Playlist => "favorite_playlists",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteKind::Track => "track",
            FavoriteKind::Album => "album",
            FavoriteKind::Playlist => "playlist",
        }
    }
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A favoritable entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavoriteTarget {
    pub kind: FavoriteKind,
    pub id: i64,
}

impl FavoriteTarget {
    pub fn new(kind: FavoriteKind, id: i64) -> Self {
        Self { kind, id }
    }
}

impl fmt::Display for FavoriteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// Requested favorite mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteAction {
    Add,
    Remove,
}

/// Outcome of a favorite toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "summary", rename_all = "lowercase")]
pub enum FavoriteView {
    Added(Summary),
    Removed,
}

/// Compact projection of a track, album or playlist
///
/// `author` is the performer for tracks and albums, and the owner's username
/// for playlists. `track_count` is only set for albums and playlists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub id: i64,
    pub kind: FavoriteKind,
    pub title: String,
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_count: Option<i64>,
}
