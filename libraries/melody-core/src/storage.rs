//! Storage trait for the catalog

use crate::error::Result;
use crate::types::{
    AlbumId, AlbumView, Caller, ContainerRef, ContainerView, CreateAlbum, CreatePerformer,
    CreatePlaylist, CreateTrack, CreateUser, FavoriteAction, FavoriteKind, FavoriteTarget,
    FavoriteView, Performer, PerformerId, PerformerView, PlaylistId, PlaylistView, RemovalReport,
    Summary, Track, TrackId, TrackView, User, UserId,
};
use async_trait::async_trait;

/// Storage context providing access to catalog operations
///
/// Implementations hold only the persistence handle. The caller identity is
/// passed to every operation that needs authentication or ownership checks.
#[async_trait]
pub trait StorageContext: Send + Sync {
    // ========================================================================
    // Users
    // ========================================================================

    /// Register a new user
    async fn create_user(&self, user: CreateUser) -> Result<User>;

    /// Get user by ID
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Find user by exact username
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Get all users, ordered by username
    async fn get_all_users(&self) -> Result<Vec<User>>;

    /// Delete a user account (callers may only delete themselves)
    async fn delete_user(&self, caller: &Caller, id: UserId) -> Result<()>;

    /// Stored password hash of a user
    async fn get_password_hash(&self, id: UserId) -> Result<Option<String>>;

    /// Replace the caller's password hash
    async fn set_password_hash(&self, caller: &Caller, password_hash: &str) -> Result<()>;

    // ========================================================================
    // Performers
    // ========================================================================

    /// Get all performers
    async fn get_all_performers(&self) -> Result<Vec<Performer>>;

    /// Get performer with tracks
    async fn get_performer(&self, id: PerformerId) -> Result<Option<PerformerView>>;

    /// Create a new performer
    async fn create_performer(
        &self,
        caller: &Caller,
        performer: CreatePerformer,
    ) -> Result<Performer>;

    // ========================================================================
    // Tracks
    // ========================================================================

    /// Get all tracks
    async fn get_all_tracks(&self) -> Result<Vec<Track>>;

    /// Get track with author and albums
    async fn get_track(&self, id: TrackId) -> Result<Option<TrackView>>;

    /// Create a new track, optionally appending it to albums
    async fn create_track(&self, caller: &Caller, track: CreateTrack) -> Result<TrackView>;

    /// Delete a track
    async fn delete_track(&self, caller: &Caller, id: TrackId) -> Result<()>;

    // ========================================================================
    // Albums
    // ========================================================================

    /// Get all albums
    async fn get_all_albums(&self) -> Result<Vec<Summary>>;

    /// Get album with ordered tracks
    async fn get_album(&self, id: AlbumId) -> Result<Option<AlbumView>>;

    /// Create a new album owned by the caller
    async fn create_album(&self, caller: &Caller, album: CreateAlbum) -> Result<AlbumView>;

    /// Delete an album (owner only)
    async fn delete_album(&self, caller: &Caller, id: AlbumId) -> Result<()>;

    // ========================================================================
    // Playlists
    // ========================================================================

    /// Get all playlists
    async fn get_all_playlists(&self) -> Result<Vec<Summary>>;

    /// Get playlist with ordered tracks
    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<PlaylistView>>;

    /// Create a new playlist owned by the caller
    async fn create_playlist(
        &self,
        caller: &Caller,
        playlist: CreatePlaylist,
    ) -> Result<PlaylistView>;

    /// Delete a playlist (owner only)
    async fn delete_playlist(&self, caller: &Caller, id: PlaylistId) -> Result<()>;

    // ========================================================================
    // Memberships
    // ========================================================================

    /// Append tracks to an album or playlist, all or nothing
    async fn add_members(
        &self,
        caller: &Caller,
        container: ContainerRef,
        track_ids: &[TrackId],
    ) -> Result<ContainerView>;

    /// Remove tracks from an album or playlist, reporting each track
    async fn remove_members(
        &self,
        caller: &Caller,
        container: ContainerRef,
        track_ids: &[TrackId],
    ) -> Result<RemovalReport>;

    // ========================================================================
    // Favorites
    // ========================================================================

    /// Add or remove a favorite
    async fn toggle_favorite(
        &self,
        caller: &Caller,
        target: FavoriteTarget,
        action: FavoriteAction,
    ) -> Result<FavoriteView>;

    /// Everything of `kind` the caller has favorited
    async fn list_favorites(&self, caller: &Caller, kind: FavoriteKind) -> Result<Vec<Summary>>;
}
