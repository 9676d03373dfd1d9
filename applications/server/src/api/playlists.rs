/// Playlist API routes
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
    ContainerRef, ContainerView, CreatePlaylist, FavoriteKind, FavoriteTarget, MelodyError,
    PlaylistId, PlaylistView, RemovalReport, StorageContext, Summary,
};

/// GET /api/playlists
pub async fn list_playlists(State(app_state): State<AppState>) -> Result<Json<Vec<Summary>>> {
    let playlists = app_state.db.get_all_playlists().await?;
    Ok(Json(playlists))
}

/// GET /api/playlists/:id
pub async fn get_playlist(
    State(app_state): State<AppState>,
    Path(id): Path<PlaylistId>,
) -> Result<Json<PlaylistView>> {
    let playlist = app_state
        .db
        .get_playlist(id)
        .await?
        .ok_or(MelodyError::PlaylistNotFound(id))?;
    Ok(Json(playlist))
}

/// POST /api/playlists
pub async fn create_playlist(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreatePlaylist>,
) -> Result<(StatusCode, Json<PlaylistView>)> {
    let playlist = app_state.db.create_playlist(&user.caller(), req).await?;
    Ok((StatusCode::CREATED, Json(playlist)))
}

/// DELETE /api/playlists/:id (owner only)
pub async fn delete_playlist(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<PlaylistId>,
) -> Result<StatusCode> {
    app_state.db.delete_playlist(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/playlists/:id/tracks
pub async fn add_tracks(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<PlaylistId>,
    Json(req): Json<TrackListRequest>,
) -> Result<Json<ContainerView>> {
    members::add(&app_state, caller, ContainerRef::playlist(id), req).await
}

/// DELETE /api/playlists/:id/tracks
pub async fn remove_tracks(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<PlaylistId>,
    Json(req): Json<TrackListRequest>,
) -> Result<Json<RemovalReport>> {
    members::remove(&app_state, caller, ContainerRef::playlist(id), req).await
}

/// POST /api/playlists/:id/favorite
pub async fn add_favorite(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<PlaylistId>,
) -> Result<(StatusCode, Json<Summary>)> {
    favorites::add(&app_state, caller, FavoriteTarget::new(FavoriteKind::Playlist, id)).await
}

/// DELETE /api/playlists/:id/favorite
pub async fn remove_favorite(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<PlaylistId>,
) -> Result<StatusCode> {
    favorites::remove(&app_state, caller, FavoriteTarget::new(FavoriteKind::Playlist, id)).await
}

/// GET /api/playlists/favorites
pub async fn list_favorites(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
) -> Result<Json<Vec<Summary>>> {
    favorites::list(&app_state, caller, FavoriteKind::Playlist).await
}
