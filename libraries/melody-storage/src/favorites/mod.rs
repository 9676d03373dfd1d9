//! Per-user favorites of tracks, albums and playlists
//!
//! A favorite is just the existence of a (user, target) row. Adding an
//! existing favorite or removing a missing one is an error rather than a
//! silent no-op.

use crate::summaries;
use melody_core::{error::Result, types::*, MelodyError};
use sqlx::{Executor, Sqlite, SqlitePool};

/// Mark a target as favorite and return its summary
pub async fn add(pool: &SqlitePool, caller: &Caller, target: FavoriteTarget) -> Result<Summary> {
    let user_id = caller.require_user()?;

    let summary = summaries::get(pool, target)
        .await?
        .ok_or_else(|| MelodyError::target_not_found(target))?;

    if is_favorite(pool, user_id, target).await? {
        return Err(MelodyError::AlreadyFavorited { target });
    }

    // A concurrent add can still win the race; the primary key catches it.
    sqlx::query(&format!(
        "INSERT INTO {} (user_id, target_id) VALUES (?, ?)",
        target.kind.table()
    ))
    .bind(user_id)
    .bind(target.id)
    .execute(pool)
    .await
    .map_err(|err| match MelodyError::from(err) {
        MelodyError::UniquenessViolation(_) => MelodyError::AlreadyFavorited { target },
        other => other,
    })?;

    tracing::debug!(user_id, %target, "Added favorite");

    Ok(summary)
}

/// Remove a target from the caller's favorites
pub async fn remove(pool: &SqlitePool, caller: &Caller, target: FavoriteTarget) -> Result<()> {
    let user_id = caller.require_user()?;

    if summaries::get(pool, target).await?.is_none() {
        return Err(MelodyError::target_not_found(target));
    }

    let result = sqlx::query(&format!(
        "DELETE FROM {} WHERE user_id = ? AND target_id = ?",
        target.kind.table()
    ))
    .bind(user_id)
    .bind(target.id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(MelodyError::NotFavorited { target });
    }

    tracing::debug!(user_id, %target, "Removed favorite");

    Ok(())
}

/// Add or remove a favorite depending on `action`
pub async fn toggle(
    pool: &SqlitePool,
    caller: &Caller,
    target: FavoriteTarget,
    action: FavoriteAction,
) -> Result<FavoriteView> {
    match action {
        FavoriteAction::Add => add(pool, caller, target).await.map(FavoriteView::Added),
        FavoriteAction::Remove => remove(pool, caller, target)
            .await
            .map(|()| FavoriteView::Removed),
    }
}

/// Everything of `kind` the caller has favorited
pub async fn list(pool: &SqlitePool, caller: &Caller, kind: FavoriteKind) -> Result<Vec<Summary>> {
    let user_id = caller.require_user()?;
    summaries::get_favorites(pool, user_id, kind).await
}

/// Whether a user has favorited a target
pub async fn is_favorite<'e, E>(executor: E, user_id: UserId, target: FavoriteTarget) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: Option<i64> = sqlx::query_scalar(&format!(
        "SELECT 1 FROM {} WHERE user_id = ? AND target_id = ?",
        target.kind.table()
    ))
    .bind(user_id)
    .bind(target.id)
    .fetch_optional(executor)
    .await?;

    Ok(found.is_some())
}
