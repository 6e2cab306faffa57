// Library exports for the mini-app settings API
// This allows the modules to be tested

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

pub use config::Config;
pub use database::PgSettingsStore;
pub use error::{AppError, AppResult};
pub use store::{MemorySettingsStore, SettingsStore, StoreError};

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SettingsStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn SettingsStore>, config: Config) -> Self {
        Self { store, config }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .nest("/settings", create_settings_routes())
        // Middleware stack
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

fn create_settings_routes() -> Router<AppState> {
    Router::new()
        .route("/save", post(handlers::settings::save_settings))
        .route("/load", post(handlers::settings::load_settings))
}
