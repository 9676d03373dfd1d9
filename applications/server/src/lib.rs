//! Melody Server Library
//!
//! HTTP boundary for the Melody catalog: JWT authentication, catalog CRUD,
//! ordered album/playlist memberships and per-user favorites.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::auth::AuthService;
pub use state::AppState;
