/// Track API routes
use super::favorites;
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
    CreateTrack, FavoriteKind, FavoriteTarget, MelodyError, StorageContext, Summary, Track,
    TrackId, TrackView,
};

/// GET /api/tracks
pub async fn list_tracks(State(app_state): State<AppState>) -> Result<Json<Vec<Track>>> {
    let tracks = app_state.db.get_all_tracks().await?;
    Ok(Json(tracks))
}

/// GET /api/tracks/:id
pub async fn get_track(
    State(app_state): State<AppState>,
    Path(id): Path<TrackId>,
) -> Result<Json<TrackView>> {
    let track = app_state
        .db
        .get_track(id)
        .await?
        .ok_or(MelodyError::TrackNotFound(id))?;
    Ok(Json(track))
}

/// POST /api/tracks
///
/// `album_ids` in the body appends the new track to those albums; the
/// caller must own each of them.
pub async fn create_track(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreateTrack>,
) -> Result<(StatusCode, Json<TrackView>)> {
    let track = app_state.db.create_track(&user.caller(), req).await?;
    Ok((StatusCode::CREATED, Json(track)))
}

/// DELETE /api/tracks/:id
pub async fn delete_track(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<TrackId>,
) -> Result<StatusCode> {
    app_state.db.delete_track(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/tracks/:id/favorite
pub async fn add_favorite(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<TrackId>,
) -> Result<(StatusCode, Json<Summary>)> {
    favorites::add(&app_state, caller, FavoriteTarget::new(FavoriteKind::Track, id)).await
}

/// DELETE /api/tracks/:id/favorite
pub async fn remove_favorite(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<TrackId>,
) -> Result<StatusCode> {
    favorites::remove(&app_state, caller, FavoriteTarget::new(FavoriteKind::Track, id)).await
}

/// GET /api/tracks/favorites
pub async fn list_favorites(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
) -> Result<Json<Vec<Summary>>> {
    favorites::list(&app_state, caller, FavoriteKind::Track).await
}
