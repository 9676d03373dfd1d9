//! Melody Catalog Core
//!
//! Storage-agnostic domain types, traits, and error handling for the Melody
//! music catalog.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `AlbumView`, `PlaylistView`, `Performer`, `User`, etc.
//! - **Membership Types**: ordered album/playlist membership records and views
//! - **Favorites**: per-user favorite targets and their summary projection
//! - **Caller Identity**: explicit `Caller` passed to every operation
//! - **Error Handling**: Unified `MelodyError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use melody_core::types::{Caller, ContainerKind, ContainerRef};
//!
//! let caller = Caller::user(7);
//! assert!(caller.is_authenticated());
//!
//! let album = ContainerRef::album(3);
//! assert_eq!(album.kind, ContainerKind::Album);
//! assert_eq!(album.to_string(), "album 3");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{MelodyError, Result};
pub use storage::StorageContext;

pub use types::{
    // Identity
    Caller, User, CreateUser, UserId,
    // Catalog
    Performer, CreatePerformer, PerformerView, PerformerTrack, PerformerId, PerformerRef,
    Track, CreateTrack, TrackView, TrackAlbumRef, TrackId,
    CreateAlbum, AlbumView, AlbumId,
    CreatePlaylist, PlaylistView, PlaylistId,
    // Memberships
    ContainerKind, ContainerRef, ContainerView, MemberView, Position,
    RemovalOutcome, RemovalReport, RemovalStatus,
    // Favorites
    FavoriteAction, FavoriteKind, FavoriteTarget, FavoriteView, Summary,
};
