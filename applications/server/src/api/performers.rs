/// Performer API routes (signed-in users only)
use crate::{error::Result, middleware::AuthenticatedUser, state::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use melody_core::{
    CreatePerformer, MelodyError, Performer, PerformerId, PerformerView, StorageContext,
};

/// GET /api/performers
pub async fn list_performers(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<Performer>>> {
    let performers = app_state.db.get_all_performers().await?;
    Ok(Json(performers))
}

/// GET /api/performers/:id
///
/// Lists every track with the albums it appears on and its position there.
pub async fn get_performer(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<PerformerId>,
) -> Result<Json<PerformerView>> {
    let performer = app_state
        .db
        .get_performer(id)
        .await?
        .ok_or(MelodyError::PerformerNotFound(id))?;
    Ok(Json(performer))
}

/// POST /api/performers
pub async fn create_performer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<CreatePerformer>,
) -> Result<(StatusCode, Json<Performer>)> {
    let performer = app_state.db.create_performer(&user.caller(), req).await?;
    Ok((StatusCode::CREATED, Json(performer)))
}
