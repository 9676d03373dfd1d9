//! Melody Catalog Storage
//!
//! `SQLite` persistence for the Melody music catalog.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each feature owns its own queries and logic
//! - **Explicit Caller**: every mutation takes the pool and a `Caller`
//! - **Ordered Memberships**: album/playlist tracks carry gap-free 1-based
//!   positions, assigned inside a write transaction
//!
//! # Example
//!
//! ```rust,no_run
//! use melody_storage::{LocalStorageContext, create_pool, run_migrations};
//! use melody_core::{Caller, ContainerRef, StorageContext};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://melody.db").await?;
//! run_migrations(&pool).await?;
//!
//! let storage = LocalStorageContext::new(pool);
//!
//! // Append tracks 4 and 9 to playlist 1 as user 1
//! let view = storage
//!     .add_members(&Caller::user(1), ContainerRef::playlist(1), &[4, 9])
//!     .await?;
//! println!("{} now has {} tracks", view.title, view.tracks.len());
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod albums;
pub mod favorites;
pub mod memberships;
pub mod performers;
pub mod playlists;
pub mod summaries;
pub mod tracks;
pub mod users;

pub use context::LocalStorageContext;
pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    tracing::debug!("Database migrations applied");
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://melody.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::info!(database_url, "Creating SQLite pool");

    // Foreign keys carry the cascade rules; writers wait on each other
    // instead of failing with SQLITE_BUSY.
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool created");

    Ok(pool)
}

/// Check that the database answers a trivial query
pub async fn check_connection(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
