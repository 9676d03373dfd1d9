use crate::{albums, favorites, memberships, performers, playlists, tracks, users};
use async_trait::async_trait;
use melody_core::{error::Result, storage::StorageContext, types::*};
use sqlx::SqlitePool;

/// Catalog storage backed by `SQLite`
///
/// Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct LocalStorageContext {
    pool: SqlitePool,
}

impl LocalStorageContext {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl StorageContext for LocalStorageContext {
    // Users
    async fn create_user(&self, user: CreateUser) -> Result<User> {
        users::create(&self.pool, user).await
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        users::find_by_username(&self.pool, username).await
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }

    async fn delete_user(&self, caller: &Caller, id: UserId) -> Result<()> {
        users::delete(&self.pool, caller, id).await
    }

    async fn get_password_hash(&self, id: UserId) -> Result<Option<String>> {
        users::get_password_hash(&self.pool, id).await
    }

    async fn set_password_hash(&self, caller: &Caller, password_hash: &str) -> Result<()> {
        users::set_password_hash(&self.pool, caller, password_hash).await
    }

    // Performers
    async fn get_all_performers(&self) -> Result<Vec<Performer>> {
        performers::get_all(&self.pool).await
    }

    async fn get_performer(&self, id: PerformerId) -> Result<Option<PerformerView>> {
        performers::get_view(&self.pool, id).await
    }

    async fn create_performer(
        &self,
        caller: &Caller,
        performer: CreatePerformer,
    ) -> Result<Performer> {
        performers::create(&self.pool, caller, performer).await
    }

    // Tracks
    async fn get_all_tracks(&self) -> Result<Vec<Track>> {
        tracks::get_all(&self.pool).await
    }

    async fn get_track(&self, id: TrackId) -> Result<Option<TrackView>> {
        tracks::get_view(&self.pool, id).await
    }

    async fn create_track(&self, caller: &Caller, track: CreateTrack) -> Result<TrackView> {
        tracks::create(&self.pool, caller, track).await
    }

    async fn delete_track(&self, caller: &Caller, id: TrackId) -> Result<()> {
        tracks::delete(&self.pool, caller, id).await
    }

    // Albums
    async fn get_all_albums(&self) -> Result<Vec<Summary>> {
        albums::get_all(&self.pool).await
    }

    async fn get_album(&self, id: AlbumId) -> Result<Option<AlbumView>> {
        albums::get_view(&self.pool, id).await
    }

    async fn create_album(&self, caller: &Caller, album: CreateAlbum) -> Result<AlbumView> {
        albums::create(&self.pool, caller, album).await
    }

    async fn delete_album(&self, caller: &Caller, id: AlbumId) -> Result<()> {
        albums::delete(&self.pool, caller, id).await
    }

    // Playlists
    async fn get_all_playlists(&self) -> Result<Vec<Summary>> {
        playlists::get_all(&self.pool).await
    }

    async fn get_playlist(&self, id: PlaylistId) -> Result<Option<PlaylistView>> {
        playlists::get_view(&self.pool, id).await
    }

    async fn create_playlist(
        &self,
        caller: &Caller,
        playlist: CreatePlaylist,
    ) -> Result<PlaylistView> {
        playlists::create(&self.pool, caller, playlist).await
    }

    async fn delete_playlist(&self, caller: &Caller, id: PlaylistId) -> Result<()> {
        playlists::delete(&self.pool, caller, id).await
    }

    // Memberships
    async fn add_members(
        &self,
        caller: &Caller,
        container: ContainerRef,
        track_ids: &[TrackId],
    ) -> Result<ContainerView> {
        memberships::add_members(&self.pool, caller, container, track_ids).await
    }

    async fn remove_members(
        &self,
        caller: &Caller,
        container: ContainerRef,
        track_ids: &[TrackId],
    ) -> Result<RemovalReport> {
        memberships::remove_members(&self.pool, caller, container, track_ids).await
    }

    // Favorites
    async fn toggle_favorite(
        &self,
        caller: &Caller,
        target: FavoriteTarget,
        action: FavoriteAction,
    ) -> Result<FavoriteView> {
        favorites::toggle(&self.pool, caller, target, action).await
    }

    async fn list_favorites(&self, caller: &Caller, kind: FavoriteKind) -> Result<Vec<Summary>> {
        favorites::list(&self.pool, caller, kind).await
    }
}
