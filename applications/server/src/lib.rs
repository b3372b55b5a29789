//! Cadence Server Library
//!
//! Stateless HTTP front for the queue resolver: JWT authentication, a
//! capability check per route group, and the player, history, catalog and
//! admin endpoints.
//!
//! This library exposes the router and its components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{PlayerSettings, ServerConfig};
pub use error::{Result, ServerError};
pub use services::auth::AuthService;
pub use state::AppState;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use cadence_core::Capability;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router
pub fn create_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/auth/login", post(api::auth::login))
        .route("/auth/refresh", post(api::auth::refresh));

    let playback_routes = Router::new()
        .route("/player/next", post(api::player::next))
        .route("/player/previous", post(api::player::previous))
        .route("/player/queue", post(api::player::queue))
        .route("/tracks/:id", get(api::tracks::get_track));

    let record_routes = Router::new().route("/player/history", post(api::history::record_play));
    let view_routes = Router::new().route("/player/history", get(api::history::list_history));

    let playlist_routes = Router::new()
        .route(
            "/playlists",
            get(api::playlists::list_playlists).post(api::playlists::create_playlist),
        )
        .route("/playlists/:id", get(api::playlists::get_playlist))
        .route("/playlists/:id/tracks", post(api::playlists::add_track))
        .route(
            "/playlists/:id/tracks/:position",
            delete(api::playlists::remove_track),
        );

    let publish_routes = Router::new().route("/tracks", post(api::tracks::publish_track));

    let admin_routes = Router::new().route(
        "/admin/users",
        get(api::admin::list_users).post(api::admin::create_user),
    );

    // Protected routes: authenticate, then check the group's capability
    let protected_routes = Router::new()
        .merge(gated(playback_routes, Capability::ControlPlayback))
        .merge(gated(record_routes, Capability::RecordHistory))
        .merge(gated(view_routes, Capability::ViewHistory))
        .merge(gated(playlist_routes, Capability::ManagePlaylists))
        .merge(gated(publish_routes, Capability::PublishTracks))
        .merge(gated(admin_routes, Capability::ManageUsers))
        .layer(axum_middleware::from_fn_with_state(
            app_state.auth_service.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

fn gated(routes: Router<AppState>, capability: Capability) -> Router<AppState> {
    routes.route_layer(axum_middleware::from_fn_with_state(
        capability,
        middleware::require_capability,
    ))
}
