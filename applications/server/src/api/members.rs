/// Membership endpoints shared by albums and playlists
use crate::{error::Result, state::AppState};
use axum::Json;
use melody_core::{Caller, ContainerRef, ContainerView, RemovalReport, StorageContext, TrackId};
use serde::Deserialize;

/// Body of `POST/DELETE /:id/tracks`
#[derive(Debug, Deserialize)]
pub struct TrackListRequest {
    pub tracks: Vec<TrackId>,
}

pub(crate) async fn add(
    app_state: &AppState,
    caller: Caller,
    container: ContainerRef,
    req: TrackListRequest,
) -> Result<Json<ContainerView>> {
    let view = app_state
        .db
        .add_members(&caller, container, &req.tracks)
        .await?;
    Ok(Json(view))
}

pub(crate) async fn remove(
    app_state: &AppState,
    caller: Caller,
    container: ContainerRef,
    req: TrackListRequest,
) -> Result<Json<RemovalReport>> {
    let report = app_state
        .db
        .remove_members(&caller, container, &req.tracks)
        .await?;
    Ok(Json(report))
}
