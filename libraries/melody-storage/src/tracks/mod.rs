use crate::{error::is_foreign_key_violation, memberships};
use melody_core::{error::Result, types::*, MelodyError};
use sqlx::{Executor, Row, Sqlite, SqliteConnection, SqlitePool};

/// Get all tracks with denormalized performer names
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Track>> {
    let rows = sqlx::query(
        r#"
        SELECT t.id, t.title, t.performer_id, p.name AS performer_name, t.created_at
        FROM tracks t
        INNER JOIN performers p ON p.id = t.performer_id
        ORDER BY t.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| Track {
            id: row.get("id"),
            title: row.get("title"),
            performer_id: row.get("performer_id"),
            performer_name: row.get("performer_name"),
            created_at: row.get("created_at"),
        })
        .collect())
}

/// Get a track with its author and the albums it appears on
pub async fn get_view(pool: &SqlitePool, id: TrackId) -> Result<Option<TrackView>> {
    let mut conn = pool.acquire().await?;
    view(&mut conn, id).await
}

/// Whether a track exists
pub async fn exists<'e, E>(executor: E, id: TrackId) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM tracks WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;

    Ok(found.is_some())
}

/// Create a track and append it to the requested albums
///
/// The performer must exist, the (title, performer) pair must be new, and
/// the caller must own every listed album. Everything happens in one
/// transaction, opened by the track insert so the write lock is taken
/// before anything is read.
pub async fn create(pool: &SqlitePool, caller: &Caller, track: CreateTrack) -> Result<TrackView> {
    let user_id = caller.require_user()?;
    track.validate()?;
    let title = track.title.trim();

    let mut tx = pool.begin().await?;

    let result = sqlx::query("INSERT INTO tracks (title, performer_id) VALUES (?, ?)")
        .bind(title)
        .bind(track.performer_id)
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            if is_foreign_key_violation(&err) {
                return MelodyError::PerformerNotFound(track.performer_id);
            }
            match MelodyError::from(err) {
                MelodyError::UniquenessViolation(_) => MelodyError::DuplicateTrack {
                    performer_id: track.performer_id,
                    title: title.to_string(),
                },
                other => other,
            }
        })?;

    let id = result.last_insert_rowid();

    for &album_id in &track.album_ids {
        let album = ContainerRef::album(album_id);
        memberships::authorize(&mut tx, album, user_id).await?;
        memberships::append_tracks(&mut tx, album, &[id]).await?;
    }

    let created = view(&mut tx, id)
        .await?
        .ok_or_else(|| MelodyError::storage("Failed to retrieve created track"))?;

    tx.commit().await?;

    tracing::info!(track_id = id, user_id, albums = track.album_ids.len(), "Created track");

    Ok(created)
}

/// Delete a track
///
/// Album and playlist positions behind the track are shifted down before its
/// memberships cascade away, so every container stays gap-free.
pub async fn delete(pool: &SqlitePool, caller: &Caller, id: TrackId) -> Result<()> {
    let user_id = caller.require_user()?;

    let mut tx = pool.begin().await?;

    for kind in [ContainerKind::Album, ContainerKind::Playlist] {
        let table = kind.membership_table();
        let column = kind.container_column();
        sqlx::query(&format!(
            r#"
            UPDATE {table} SET position = position - 1
            WHERE EXISTS (
                SELECT 1 FROM {table} m
                WHERE m.track_id = ?
                  AND m.{column} = {table}.{column}
                  AND m.position < {table}.position
            )
            "#
        ))
        .bind(id)
        .execute(&mut *tx)
        .await?;
    }

    let result = sqlx::query("DELETE FROM tracks WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(MelodyError::TrackNotFound(id));
    }

    tx.commit().await?;

    tracing::info!(track_id = id, user_id, "Deleted track");

    Ok(())
}

/// Albums a track appears on, with its position in each
pub async fn album_refs(conn: &mut SqliteConnection, id: TrackId) -> Result<Vec<TrackAlbumRef>> {
    let rows = sqlx::query(
        r#"
        SELECT a.id, a.title, m.position
        FROM album_tracks m
        INNER JOIN albums a ON a.id = m.album_id
        WHERE m.track_id = ?
        ORDER BY a.release_date, a.id
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| TrackAlbumRef {
            id: row.get("id"),
            title: row.get("title"),
            position: row.get("position"),
        })
        .collect())
}

pub(crate) async fn view(conn: &mut SqliteConnection, id: TrackId) -> Result<Option<TrackView>> {
    let row = sqlx::query(
        r#"
        SELECT t.id, t.title, p.id AS performer_id, p.name AS performer_name
        FROM tracks t
        INNER JOIN performers p ON p.id = t.performer_id
        WHERE t.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let albums = album_refs(conn, id).await?;

    Ok(Some(TrackView {
        id: row.get("id"),
        title: row.get("title"),
        author: PerformerRef {
            id: row.get("performer_id"),
            name: row.get("performer_name"),
        },
        albums,
    }))
}
