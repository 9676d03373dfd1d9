/// API route modules
pub mod albums;
pub mod auth;
pub mod health;
pub mod performers;
pub mod playlists;
pub mod tracks;
pub mod users;

mod favorites;
mod members;

use crate::{middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub use members::TrackListRequest;

/// Build the full `/api` router
///
/// Every route passes through the auth middleware, which resolves the
/// caller; handlers that need a signed-in user reject anonymous callers
/// themselves.
pub fn create_router(app_state: AppState) -> Router {
    let auth_service = Arc::clone(&app_state.auth_service);

    let routes = Router::new()
        .route("/health", get(health::health))
        // Auth
        .route("/auth/token", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        // Users
        .route("/users", get(users::list_users).post(users::register))
        .route("/users/me", get(users::me))
        .route("/users/set_password", post(users::set_password))
        .route("/users/:id", get(users::get_user).delete(users::delete_user))
        // Performers
        .route(
            "/performers",
            get(performers::list_performers).post(performers::create_performer),
        )
        .route("/performers/:id", get(performers::get_performer))
        // Tracks
        .route("/tracks", get(tracks::list_tracks).post(tracks::create_track))
        .route("/tracks/favorites", get(tracks::list_favorites))
        .route("/tracks/:id", get(tracks::get_track).delete(tracks::delete_track))
        .route(
            "/tracks/:id/favorite",
            post(tracks::add_favorite).delete(tracks::remove_favorite),
        )
        // Albums
        .route("/albums", get(albums::list_albums).post(albums::create_album))
        .route("/albums/favorites", get(albums::list_favorites))
        .route("/albums/:id", get(albums::get_album).delete(albums::delete_album))
        .route(
            "/albums/:id/tracks",
            post(albums::add_tracks).delete(albums::remove_tracks),
        )
        .route(
            "/albums/:id/favorite",
            post(albums::add_favorite).delete(albums::remove_favorite),
        )
        // Playlists
        .route(
            "/playlists",
            get(playlists::list_playlists).post(playlists::create_playlist),
        )
        .route("/playlists/favorites", get(playlists::list_favorites))
        .route(
            "/playlists/:id",
            get(playlists::get_playlist).delete(playlists::delete_playlist),
        )
        .route(
            "/playlists/:id/tracks",
            post(playlists::add_tracks).delete(playlists::remove_tracks),
        )
        .route(
            "/playlists/:id/favorite",
            post(playlists::add_favorite).delete(playlists::remove_favorite),
        )
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", routes)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
