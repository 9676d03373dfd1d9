/// Album API routes
use super::{favorites, members, TrackListRequest};
use crate::{
    error::Result,
    middleware::{AuthenticatedUser, CurrentCaller},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use melody_core::{
    AlbumId, AlbumView, ContainerRef, ContainerView, CreateAlbum, FavoriteKind, FavoriteTarget,
    MelodyError, RemovalReport, StorageContext, Summary,
};

/// GET /api/albums
pub async fn list_albums(State(app_state): State<AppState>) -> Result<Json<Vec<Summary>>> {
    let albums = app_state.db.get_all_albums().await?;
    Ok(Json(albums))
}

/// GET /api/albums/:id
pub async fn get_album(
    State(app_state): State<AppState>,
    Path(id): Path<AlbumId>,
) -> Result<Json<AlbumView>> {
    let album = app_state
        .db
        .get_album(id)
        .await?
        .ok_or(MelodyError::AlbumNotFound(id))?;
    Ok(Json(album))
}

/// POST /api/albums
pub async fn create_album(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreateAlbum>,
) -> Result<(StatusCode, Json<AlbumView>)> {
    let album = app_state.db.create_album(&user.caller(), req).await?;
    Ok((StatusCode::CREATED, Json(album)))
}

/// DELETE /api/albums/:id (owner only)
pub async fn delete_album(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<AlbumId>,
) -> Result<StatusCode> {
    app_state.db.delete_album(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/albums/:id/tracks
pub async fn add_tracks(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<AlbumId>,
    Json(req): Json<TrackListRequest>,
) -> Result<Json<ContainerView>> {
    members::add(&app_state, caller, ContainerRef::album(id), req).await
}

/// DELETE /api/albums/:id/tracks
pub async fn remove_tracks(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<AlbumId>,
    Json(req): Json<TrackListRequest>,
) -> Result<Json<RemovalReport>> {
    members::remove(&app_state, caller, ContainerRef::album(id), req).await
}

/// POST /api/albums/:id/favorite
pub async fn add_favorite(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<AlbumId>,
) -> Result<(StatusCode, Json<Summary>)> {
    favorites::add(&app_state, caller, FavoriteTarget::new(FavoriteKind::Album, id)).await
}

/// DELETE /api/albums/:id/favorite
pub async fn remove_favorite(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<AlbumId>,
) -> Result<StatusCode> {
    favorites::remove(&app_state, caller, FavoriteTarget::new(FavoriteKind::Album, id)).await
}

/// GET /api/albums/favorites
pub async fn list_favorites(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
) -> Result<Json<Vec<Summary>>> {
    favorites::list(&app_state, caller, FavoriteKind::Album).await
}
