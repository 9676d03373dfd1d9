/// Favorite endpoints shared by tracks, albums and playlists
use crate::{
    error::{Result, ServerError},
    state::AppState,
};
use axum::{http::StatusCode, Json};
use melody_core::{
    Caller, FavoriteAction, FavoriteKind, FavoriteTarget, FavoriteView, StorageContext, Summary,
};

/// Add a favorite: 201 with the target's summary
pub(crate) async fn add(
    app_state: &AppState,
    caller: Caller,
    target: FavoriteTarget,
) -> Result<(StatusCode, Json<Summary>)> {
    match app_state
        .db
        .toggle_favorite(&caller, target, FavoriteAction::Add)
        .await?
    {
        FavoriteView::Added(summary) => Ok((StatusCode::CREATED, Json(summary))),
        FavoriteView::Removed => Err(ServerError::Internal(format!(
            "favorite add for {target} reported a removal"
        ))),
    }
}

/// Remove a favorite: 204
pub(crate) async fn remove(
    app_state: &AppState,
    caller: Caller,
    target: FavoriteTarget,
) -> Result<StatusCode> {
    app_state
        .db
        .toggle_favorite(&caller, target, FavoriteAction::Remove)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn list(
    app_state: &AppState,
    caller: Caller,
    kind: FavoriteKind,
) -> Result<Json<Vec<Summary>>> {
    let favorites = app_state.db.list_favorites(&caller, kind).await?;
    Ok(Json(favorites))
}
