//! Room Directory Backend
//!
//! REST backend for searching campus rooms and administering room records.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod search;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let json_layer = config
        .log_json
        .then(|| tracing_subscriber::fmt::layer().json());
    let text_layer = (!config.log_json).then(|| tracing_subscriber::fmt::layer());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    tracing::info!("Starting Room Directory Backend");
    tracing::info!("Bind address: {}", config.bind_addr);

    let repo = open_repository(&config).await?;
    tracing::info!("Room store: {}", repo.backend_name());

    let state = AppState {
        repo: Arc::new(repo),
        config: Arc::new(config.clone()),
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Open the backend selected by the configuration.
async fn open_repository(config: &Config) -> Result<Repository, Box<dyn std::error::Error>> {
    match &config.db_path {
        Some(db_path) => {
            tracing::info!("Database path: {:?}", db_path);
            let pool = db::init_database(db_path).await?;
            Ok(Repository::sqlite(pool, config.seed_sample_data).await?)
        }
        None if config.seed_sample_data => Ok(Repository::in_memory()),
        None => Ok(Repository::empty()),
    }
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let admin_only = middleware::from_fn(auth::require_admin);

    let api_routes = Router::new()
        // Auth
        .route("/auth/student-login", post(api::student_login))
        .route("/auth/admin-login", post(api::admin_login))
        // Rooms, public reads
        .route("/rooms", get(api::list_rooms))
        .route("/rooms/search", get(api::search_rooms))
        .route("/rooms/{id}", get(api::get_room))
        // Rooms, admin mutations
        .route(
            "/rooms",
            post(api::create_room).route_layer(admin_only.clone()),
        )
        .route(
            "/rooms/{id}",
            patch(api::update_room)
                .delete(api::delete_room)
                .route_layer(admin_only),
        )
        // Sync
        .route("/sync/version", get(api::get_sync_version))
        .route("/ping", get(api::ping));

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(errors::handle_panic))
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
