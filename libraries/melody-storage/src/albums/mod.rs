use crate::{error::is_foreign_key_violation, memberships, summaries};
use chrono::NaiveDate;
use melody_core::{error::Result, types::*, MelodyError};
use sqlx::{Row, SqliteConnection, SqlitePool};

/// Summaries of all albums (title, performer, track count)
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Summary>> {
    summaries::get_all(pool, FavoriteKind::Album).await
}

/// Album with its tracks in position order
pub async fn get_view(pool: &SqlitePool, id: AlbumId) -> Result<Option<AlbumView>> {
    let mut conn = pool.acquire().await?;
    view(&mut conn, id).await
}

/// Create an album owned by the caller
///
/// `track_ids` become the initial members at positions 1..=N; the whole
/// creation is rolled back if any of them is unknown or repeated. The album
/// insert is the transaction's first statement.
pub async fn create(pool: &SqlitePool, caller: &Caller, album: CreateAlbum) -> Result<AlbumView> {
    let user_id = caller.require_user()?;
    album.validate()?;
    let title = album.title.trim();

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO albums (title, release_date, performer_id, created_by)
         VALUES (?, ?, ?, ?)",
    )
    .bind(title)
    .bind(album.release_date)
    .bind(album.performer_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await
    .map_err(|err| {
        if is_foreign_key_violation(&err) {
            MelodyError::PerformerNotFound(album.performer_id)
        } else {
            err.into()
        }
    })?;

    let id = result.last_insert_rowid();

    if !album.track_ids.is_empty() {
        memberships::append_tracks(&mut tx, ContainerRef::album(id), &album.track_ids).await?;
    }

    let created = view(&mut tx, id)
        .await?
        .ok_or_else(|| MelodyError::storage("Failed to retrieve created album"))?;

    tx.commit().await?;

    tracing::info!(album_id = id, user_id, tracks = album.track_ids.len(), "Created album");

    Ok(created)
}

/// Delete an album (owner only)
pub async fn delete(pool: &SqlitePool, caller: &Caller, id: AlbumId) -> Result<()> {
    let user_id = caller.require_user()?;

    let mut tx = pool.begin().await?;

    memberships::authorize(&mut tx, ContainerRef::album(id), user_id).await?;

    sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(album_id = id, user_id, "Deleted album");

    Ok(())
}

async fn view(conn: &mut SqliteConnection, id: AlbumId) -> Result<Option<AlbumView>> {
    let row = sqlx::query(
        "SELECT a.id, a.title, a.release_date, a.created_by,
                p.id AS performer_id, p.name AS performer_name
         FROM albums a
         INNER JOIN performers p ON p.id = a.performer_id
         WHERE a.id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let tracks = memberships::members(conn, ContainerRef::album(id)).await?;

    Ok(Some(AlbumView {
        id: row.get("id"),
        title: row.get("title"),
        release_date: row.get::<NaiveDate, _>("release_date"),
        author: PerformerRef {
            id: row.get("performer_id"),
            name: row.get("performer_name"),
        },
        created_by: row.get("created_by"),
        tracks,
    }))
}
