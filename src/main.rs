use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use miniapp_settings_api::{
    config::StoreBackend, create_app, AppError, AppResult, AppState, Config, MemorySettingsStore,
    PgSettingsStore, SettingsStore,
};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting mini-app settings API");

    // Load configuration
    let config = Config::new()?;
    info!("Configuration loaded");

    let store = create_store(&config).await?;

    let app = create_app(AppState::new(store, config.clone()));

    let host: IpAddr = config
        .server
        .host
        .parse()
        .map_err(|_| AppError::Config(format!("Invalid HOST '{}'", config.server.host)))?;
    let addr = SocketAddr::from((host, config.server.port));
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn create_store(config: &Config) -> AppResult<Arc<dyn SettingsStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            warn!("Using in-memory settings store; data is lost on restart");
            Ok(Arc::new(MemorySettingsStore::new()))
        }
        StoreBackend::Postgres => {
            let store = PgSettingsStore::new(config)?;
            info!("Database pool initialized");

            // A failed provisioning only surfaces later as per-request store
            // errors unless SCHEMA_FAIL_FAST is set.
            match store.ensure_table().await {
                Ok(()) => info!("user_settings table is ready"),
                Err(e) if config.store.schema_fail_fast => {
                    error!("Error creating user_settings table: {}", e);
                    return Err(e.into());
                }
                Err(e) => error!("Error creating user_settings table: {}", e),
            }

            Ok(Arc::new(store))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            warn!("Received SIGTERM, shutting down gracefully");
        },
    }
}
