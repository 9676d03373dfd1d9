//! Summary projection of tracks, albums and playlists
//!
//! The same projection backs album/playlist listings and every favorites
//! listing, so an entity renders identically wherever it shows up.

use melody_core::{error::Result, types::*};
use sqlx::sqlite::SqliteRow;
use sqlx::{Executor, Row, Sqlite, SqlitePool};

/// Get the summary of a single entity
pub async fn get<'e, E>(executor: E, target: FavoriteTarget) -> Result<Option<Summary>>
where
    E: Executor<'e, Database = Sqlite>,
{
    let row = sqlx::query(&format!("{} WHERE e.id = ?", base_query(target.kind)))
        .bind(target.id)
        .fetch_optional(executor)
        .await?;

    Ok(row.map(|row| from_row(target.kind, &row)))
}

/// Summaries of every entity of a kind, oldest first
pub async fn get_all(pool: &SqlitePool, kind: FavoriteKind) -> Result<Vec<Summary>> {
    let rows = sqlx::query(&format!("{} ORDER BY e.id", base_query(kind)))
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(|row| from_row(kind, row)).collect())
}

/// Summaries of the entities a user has favorited, in favoriting order
pub async fn get_favorites(
    pool: &SqlitePool,
    user_id: UserId,
    kind: FavoriteKind,
) -> Result<Vec<Summary>> {
    let rows = sqlx::query(&format!(
        "{} INNER JOIN {} f ON f.target_id = e.id WHERE f.user_id = ? ORDER BY f.created_at, e.id",
        base_query(kind),
        kind.table(),
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(|row| from_row(kind, row)).collect())
}

fn base_query(kind: FavoriteKind) -> &'static str {
    match kind {
        FavoriteKind::Track => {
            "SELECT e.id, e.title, p.name AS author, NULL AS track_count
             FROM tracks e
             LEFT JOIN performers p ON p.id = e.performer_id"
        }
        FavoriteKind::Album => {
            "SELECT e.id, e.title, p.name AS author,
                    (SELECT COUNT(*) FROM album_tracks m WHERE m.album_id = e.id) AS track_count
             FROM albums e
             LEFT JOIN performers p ON p.id = e.performer_id"
        }
        FavoriteKind::Playlist => {
            "SELECT e.id, e.title, u.username AS author,
                    (SELECT COUNT(*) FROM playlist_tracks m WHERE m.playlist_id = e.id) AS track_count
             FROM playlists e
             LEFT JOIN users u ON u.id = e.created_by"
        }
    }
}

fn from_row(kind: FavoriteKind, row: &SqliteRow) -> Summary {
    Summary {
        id: row.get("id"),
        kind,
        title: row.get("title"),
        author: row.get("author"),
        track_count: row.get("track_count"),
    }
}
