use axum::{extract::State, response::Json};
use chrono::Utc;
use crate::{models::HealthResponse, AppState};

/// Health check endpoint with store status
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_healthy = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            false
        }
    };

    let status = if database_healthy { "healthy" } else { "unhealthy" };

    Json(HealthResponse {
        status: status.to_string(),
        database: database_healthy,
        timestamp: Utc::now(),
    })
}
