//! Identifier types
//!
//! Every entity is keyed by its `SQLite` rowid.

/// User identifier
pub type UserId = i64;

/// Performer identifier
pub type PerformerId = i64;

/// Track identifier
pub type TrackId = i64;

/// Album identifier
pub type AlbumId = i64;

/// Playlist identifier
pub type PlaylistId = i64;

/// 1-based ordinal of a track inside an album or playlist
pub type Position = i64;
