/// User API routes
use crate::{
    error::{Result, ServerError},
    middleware::{AuthenticatedUser, CurrentCaller},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use melody_core::{CreateUser, MelodyError, StorageContext, User, UserId};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
pub struct SetPasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// POST /api/users
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>)> {
    if req.password.is_empty() {
        return Err(ServerError::BadRequest("Password must not be empty".to_string()));
    }

    let password_hash = app_state.auth_service.hash_password(&req.password)?;

    let user = app_state
        .db
        .create_user(CreateUser {
            username: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            password_hash,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users
pub async fn list_users(State(app_state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = app_state.db.get_all_users().await?;
    Ok(Json(users))
}

/// GET /api/users/me
pub async fn me(State(app_state): State<AppState>, user: AuthenticatedUser) -> Result<Json<User>> {
    let id = user.user_id();
    let user = app_state
        .db
        .get_user(id)
        .await?
        .ok_or(MelodyError::UserNotFound(id))?;
    Ok(Json(user))
}

/// GET /api/users/:id
pub async fn get_user(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<UserId>,
) -> Result<Json<User>> {
    let user = app_state
        .db
        .get_user(id)
        .await?
        .ok_or(MelodyError::UserNotFound(id))?;
    Ok(Json(user))
}

/// DELETE /api/users/:id (own account only)
pub async fn delete_user(
    State(app_state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Path(id): Path<UserId>,
) -> Result<StatusCode> {
    app_state.db.delete_user(&caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/users/set_password
///
/// The current password must verify before the new one is stored.
pub async fn set_password(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(req): Json<SetPasswordRequest>,
) -> Result<StatusCode> {
    if req.new_password.is_empty() {
        return Err(ServerError::BadRequest("Password must not be empty".to_string()));
    }

    let current_hash = app_state
        .db
        .get_password_hash(user.user_id())
        .await?
        .ok_or(MelodyError::UserNotFound(user.user_id()))?;

    if !app_state
        .auth_service
        .verify_password(&req.current_password, &current_hash)?
    {
        return Err(ServerError::BadRequest(
            "Current password is incorrect".to_string(),
        ));
    }

    let new_hash = app_state.auth_service.hash_password(&req.new_password)?;
    app_state
        .db
        .set_password_hash(&user.caller(), &new_hash)
        .await?;

    tracing::info!(user_id = user.user_id(), "Password changed");

    Ok(StatusCode::NO_CONTENT)
}
