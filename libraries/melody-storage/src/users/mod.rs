//! User accounts and credentials

use melody_core::{error::Result, types::*, MelodyError};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

const USER_COLUMNS: &str = "id, username, email, first_name, last_name, created_at";

/// Register a user together with their password hash
///
/// Username and e-mail are unique; a clash surfaces as
/// `MelodyError::UniquenessViolation`.
pub async fn create(pool: &SqlitePool, user: CreateUser) -> Result<User> {
    user.validate()?;
    let username = user.username.trim();

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO users (username, email, first_name, last_name) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(user.email.trim())
    .bind(&user.first_name)
    .bind(&user.last_name)
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();

    sqlx::query("INSERT INTO user_credentials (user_id, password_hash) VALUES (?, ?)")
        .bind(id)
        .bind(&user.password_hash)
        .execute(&mut *tx)
        .await?;

    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(user_id = id, username, "Registered user");

    Ok(from_row(&row))
}

pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

/// Look a user up by exact username
pub async fn find_by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"))
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY username"))
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(from_row).collect())
}

/// Delete a user account
///
/// Users may only delete their own account. Owned albums and playlists go
/// with it; performers they created are kept.
pub async fn delete(pool: &SqlitePool, caller: &Caller, id: UserId) -> Result<()> {
    let user_id = caller.require_user()?;
    if user_id != id {
        return Err(MelodyError::permission_denied(format!(
            "user {user_id} cannot delete user {id}"
        )));
    }

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MelodyError::UserNotFound(id));
    }

    tracing::info!(user_id = id, "Deleted user");

    Ok(())
}

/// Get a user's password hash for authentication
///
/// Returns `None` if the user has no credentials.
pub async fn get_password_hash(pool: &SqlitePool, user_id: UserId) -> Result<Option<String>> {
    let hash = sqlx::query_scalar("SELECT password_hash FROM user_credentials WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(hash)
}

/// Create or replace the caller's credentials
pub async fn set_password_hash(pool: &SqlitePool, caller: &Caller, password_hash: &str) -> Result<()> {
    let user_id = caller.require_user()?;

    if get_by_id(pool, user_id).await?.is_none() {
        return Err(MelodyError::UserNotFound(user_id));
    }

    sqlx::query(
        "INSERT INTO user_credentials (user_id, password_hash, updated_at)
         VALUES (?, ?, datetime('now'))
         ON CONFLICT(user_id)
         DO UPDATE SET password_hash = excluded.password_hash, updated_at = datetime('now')",
    )
    .bind(user_id)
    .bind(password_hash)
    .execute(pool)
    .await?;

    tracing::debug!(user_id, "Updated password");

    Ok(())
}

fn from_row(row: &SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        created_at: row.get("created_at"),
    }
}
