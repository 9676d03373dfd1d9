use crate::{memberships, summaries};
use chrono::NaiveDate;
use melody_core::{error::Result, types::*, MelodyError};
use sqlx::{Row, SqliteConnection, SqlitePool};

/// Summaries of all playlists (title, owner, track count)
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Summary>> {
    summaries::get_all(pool, FavoriteKind::Playlist).await
}

/// Playlist with its tracks in position order
pub async fn get_view(pool: &SqlitePool, id: PlaylistId) -> Result<Option<PlaylistView>> {
    let mut conn = pool.acquire().await?;
    view(&mut conn, id).await
}

/// Create a playlist owned by the caller, with optional initial tracks
pub async fn create(
    pool: &SqlitePool,
    caller: &Caller,
    playlist: CreatePlaylist,
) -> Result<PlaylistView> {
    let user_id = caller.require_user()?;
    playlist.validate()?;

    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO playlists (title, description, created_by)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(playlist.title.trim())
    .bind(&playlist.description)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    let id = result.last_insert_rowid();

    if !playlist.track_ids.is_empty() {
        memberships::append_tracks(&mut tx, ContainerRef::playlist(id), &playlist.track_ids)
            .await?;
    }

    let created = view(&mut tx, id)
        .await?
        .ok_or_else(|| MelodyError::storage("Failed to retrieve created playlist"))?;

    tx.commit().await?;

    tracing::info!(playlist_id = id, user_id, "Created playlist");

    Ok(created)
}

/// Delete playlist (owner only)
pub async fn delete(pool: &SqlitePool, caller: &Caller, id: PlaylistId) -> Result<()> {
    let user_id = caller.require_user()?;

    let mut tx = pool.begin().await?;

    memberships::authorize(&mut tx, ContainerRef::playlist(id), user_id).await?;

    sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    tracing::info!(playlist_id = id, user_id, "Deleted playlist");

    Ok(())
}

async fn view(conn: &mut SqliteConnection, id: PlaylistId) -> Result<Option<PlaylistView>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, description, created_by, created_on
        FROM playlists
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let tracks = memberships::members(conn, ContainerRef::playlist(id)).await?;

    Ok(Some(PlaylistView {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        created_by: row.get("created_by"),
        created_on: row.get::<NaiveDate, _>("created_on"),
        tracks,
    }))
}
