//! Ordered album/playlist memberships
//!
//! A membership links one container (album or playlist) to one track and
//! carries a 1-based position. Positions are always `1..=N` in insertion
//! order:
//!
//! - a new member gets `MAX(position) + 1` (or 1 for an empty container)
//! - removing a member shifts every later member down by one
//!
//! Every mutation runs in one transaction whose first statement writes the
//! container row. That write takes `SQLite`'s write lock, so two concurrent
//! adds to the same container never compute the same next position.

use crate::tracks;
use melody_core::{error::Result, types::*, MelodyError};
use sqlx::{Row, SqliteConnection, SqlitePool};
use std::collections::HashSet;

/// Append tracks to a container, all or nothing
///
/// Fails with `DuplicateMembership` if any track is already a member (or is
/// listed twice), `TrackNotFound` for unknown tracks, and `PermissionDenied`
/// unless the caller owns the container. On failure nothing is inserted.
pub async fn add_members(
    pool: &SqlitePool,
    caller: &Caller,
    container: ContainerRef,
    track_ids: &[TrackId],
) -> Result<ContainerView> {
    let user_id = caller.require_user()?;
    if track_ids.is_empty() {
        return Err(MelodyError::invalid_input("at least one track id is required"));
    }

    let mut tx = pool.begin().await?;

    authorize(&mut tx, container, user_id).await?;
    let positions = append_tracks(&mut tx, container, track_ids).await?;
    let view = container_view(&mut tx, container).await?;

    tx.commit().await?;

    tracing::info!(
        %container,
        user_id,
        added = track_ids.len(),
        last_position = positions.last().copied().unwrap_or_default(),
        "Added tracks"
    );

    Ok(view)
}

/// Remove tracks from a container, reporting every requested track
///
/// The whole list is processed: present tracks are removed (closing the gap
/// behind them) and absent ones are reported as `MembershipNotFound` in the
/// returned report.
pub async fn remove_members(
    pool: &SqlitePool,
    caller: &Caller,
    container: ContainerRef,
    track_ids: &[TrackId],
) -> Result<RemovalReport> {
    let user_id = caller.require_user()?;
    if track_ids.is_empty() {
        return Err(MelodyError::invalid_input("at least one track id is required"));
    }

    let mut tx = pool.begin().await?;

    authorize(&mut tx, container, user_id).await?;

    let mut outcomes = Vec::with_capacity(track_ids.len());
    for &track_id in track_ids {
        let status = match delete_member(&mut tx, container, track_id).await? {
            Some(position) => RemovalStatus::Removed { position },
            None => RemovalStatus::MembershipNotFound,
        };
        outcomes.push(RemovalOutcome { track_id, status });
    }

    tx.commit().await?;

    let report = RemovalReport {
        container,
        outcomes,
    };

    tracing::info!(
        %container,
        user_id,
        removed = report.removed().count(),
        missing = report.missing().count(),
        "Removed tracks"
    );

    Ok(report)
}

/// Remove a single track from a container
pub async fn remove_member(
    pool: &SqlitePool,
    caller: &Caller,
    container: ContainerRef,
    track_id: TrackId,
) -> Result<()> {
    let report = remove_members(pool, caller, container, &[track_id]).await?;
    if report.is_complete() {
        Ok(())
    } else {
        Err(MelodyError::MembershipNotFound {
            container,
            track_id,
        })
    }
}

/// Insert one membership record at the end of the container
///
/// Returns the assigned position. A second record for the same
/// (container, track) pair is rejected by the table's unique constraint and
/// surfaces as `UniquenessViolation`.
pub async fn insert_member(
    conn: &mut SqliteConnection,
    container: ContainerRef,
    track_id: TrackId,
) -> Result<Position> {
    let kind = container.kind;

    let position: Position = sqlx::query_scalar(&format!(
        "SELECT COALESCE(MAX(position), 0) + 1 FROM {} WHERE {} = ?",
        kind.membership_table(),
        kind.container_column(),
    ))
    .bind(container.id)
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query(&format!(
        "INSERT INTO {} ({}, track_id, position) VALUES (?, ?, ?)",
        kind.membership_table(),
        kind.container_column(),
    ))
    .bind(container.id)
    .bind(track_id)
    .bind(position)
    .execute(&mut *conn)
    .await?;

    tracing::debug!(%container, track_id, position, "Inserted membership");

    Ok(position)
}

/// Ordered members of a container
pub async fn members(conn: &mut SqliteConnection, container: ContainerRef) -> Result<Vec<MemberView>> {
    let kind = container.kind;

    let rows = sqlx::query(&format!(
        r#"
        SELECT m.track_id, m.position, m.added_at, t.title, p.name AS author
        FROM {} m
        INNER JOIN tracks t ON t.id = m.track_id
        LEFT JOIN performers p ON p.id = t.performer_id
        WHERE m.{} = ?
        ORDER BY m.position
        "#,
        kind.membership_table(),
        kind.container_column(),
    ))
    .bind(container.id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| MemberView {
            track_id: row.get("track_id"),
            title: row.get("title"),
            author: row.get("author"),
            position: row.get("position"),
            added_at: row.get("added_at"),
        })
        .collect())
}

// Helpers shared with the album, playlist and track slices

/// Take the container's write lock and check the caller owns it
pub(crate) async fn authorize(
    conn: &mut SqliteConnection,
    container: ContainerRef,
    user_id: UserId,
) -> Result<()> {
    let owner = lock_container(conn, container).await?;
    if owner != user_id {
        tracing::warn!(%container, user_id, owner, "Rejected membership change by non-owner");
        return Err(MelodyError::PermissionDenied { container, user_id });
    }
    Ok(())
}

/// Validate a batch against the current members, then insert it in order
pub(crate) async fn append_tracks(
    conn: &mut SqliteConnection,
    container: ContainerRef,
    track_ids: &[TrackId],
) -> Result<Vec<Position>> {
    let mut seen = member_ids(conn, container).await?;
    for &track_id in track_ids {
        if !seen.insert(track_id) {
            return Err(MelodyError::DuplicateMembership {
                container,
                track_id,
            });
        }
        if !tracks::exists(&mut *conn, track_id).await? {
            return Err(MelodyError::TrackNotFound(track_id));
        }
    }

    let mut positions = Vec::with_capacity(track_ids.len());
    for &track_id in track_ids {
        let position = insert_member(conn, container, track_id)
            .await
            .map_err(|err| match err {
                MelodyError::UniquenessViolation(_) => MelodyError::DuplicateMembership {
                    container,
                    track_id,
                },
                other => other,
            })?;
        positions.push(position);
    }

    Ok(positions)
}

/// Container id, title and members
pub(crate) async fn container_view(
    conn: &mut SqliteConnection,
    container: ContainerRef,
) -> Result<ContainerView> {
    let title: Option<String> = sqlx::query_scalar(&format!(
        "SELECT title FROM {} WHERE id = ?",
        container.kind.table()
    ))
    .bind(container.id)
    .fetch_optional(&mut *conn)
    .await?;

    let title = title.ok_or_else(|| MelodyError::container_not_found(container))?;
    let tracks = members(conn, container).await?;

    Ok(ContainerView {
        id: container.id,
        kind: container.kind,
        title,
        tracks,
    })
}

/// Touch the container row and return its owner
///
/// Being the first write of the transaction, this takes the database write
/// lock, which serializes position assignment per container.
async fn lock_container(conn: &mut SqliteConnection, container: ContainerRef) -> Result<UserId> {
    let owner: Option<UserId> = sqlx::query_scalar(&format!(
        "UPDATE {} SET updated_at = datetime('now') WHERE id = ? RETURNING created_by",
        container.kind.table()
    ))
    .bind(container.id)
    .fetch_optional(&mut *conn)
    .await?;

    owner.ok_or_else(|| MelodyError::container_not_found(container))
}

async fn member_ids(conn: &mut SqliteConnection, container: ContainerRef) -> Result<HashSet<TrackId>> {
    let kind = container.kind;

    let ids: Vec<TrackId> = sqlx::query_scalar(&format!(
        "SELECT track_id FROM {} WHERE {} = ?",
        kind.membership_table(),
        kind.container_column(),
    ))
    .bind(container.id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(ids.into_iter().collect())
}

/// Delete a membership and close the gap; `None` if it did not exist
async fn delete_member(
    conn: &mut SqliteConnection,
    container: ContainerRef,
    track_id: TrackId,
) -> Result<Option<Position>> {
    let kind = container.kind;

    let removed: Option<Position> = sqlx::query_scalar(&format!(
        "DELETE FROM {} WHERE {} = ? AND track_id = ? RETURNING position",
        kind.membership_table(),
        kind.container_column(),
    ))
    .bind(container.id)
    .bind(track_id)
    .fetch_optional(&mut *conn)
    .await?;

    if let Some(position) = removed {
        sqlx::query(&format!(
            "UPDATE {} SET position = position - 1 WHERE {} = ? AND position > ?",
            kind.membership_table(),
            kind.container_column(),
        ))
        .bind(container.id)
        .bind(position)
        .execute(&mut *conn)
        .await?;
    }

    Ok(removed)
}
