use crate::tracks;
use melody_core::{error::Result, types::*, MelodyError};
use sqlx::{Row, SqlitePool};

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Performer>> {
    let rows = sqlx::query(
        "SELECT id, name, created_by, created_at
         FROM performers
         ORDER BY name, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Performer {
            id: row.get("id"),
            name: row.get("name"),
            created_by: row.get("created_by"),
            created_at: row.get("created_at"),
        })
        .collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: PerformerId) -> Result<Option<Performer>> {
    let row = sqlx::query(
        "SELECT id, name, created_by, created_at
         FROM performers
         WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Performer {
        id: row.get("id"),
        name: row.get("name"),
        created_by: row.get("created_by"),
        created_at: row.get("created_at"),
    }))
}

/// Performer with every track, each listing its albums and positions
pub async fn get_view(pool: &SqlitePool, id: PerformerId) -> Result<Option<PerformerView>> {
    let Some(performer) = get_by_id(pool, id).await? else {
        return Ok(None);
    };

    let mut conn = pool.acquire().await?;

    let track_rows = sqlx::query("SELECT id, title FROM tracks WHERE performer_id = ? ORDER BY id")
        .bind(id)
        .fetch_all(&mut *conn)
        .await?;

    let mut performer_tracks = Vec::with_capacity(track_rows.len());
    for row in track_rows {
        let track_id: TrackId = row.get("id");
        performer_tracks.push(PerformerTrack {
            id: track_id,
            title: row.get("title"),
            albums: tracks::album_refs(&mut conn, track_id).await?,
        });
    }

    Ok(Some(PerformerView {
        id: performer.id,
        name: performer.name,
        tracks: performer_tracks,
    }))
}

pub async fn create(
    pool: &SqlitePool,
    caller: &Caller,
    performer: CreatePerformer,
) -> Result<Performer> {
    let user_id = caller.require_user()?;
    performer.validate()?;
    let name = performer.name.trim();

    let result = sqlx::query("INSERT INTO performers (name, created_by) VALUES (?, ?)")
        .bind(name)
        .bind(user_id)
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();
    tracing::debug!(performer_id = id, user_id, "Created performer");

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| MelodyError::storage("Failed to retrieve created performer"))
}
