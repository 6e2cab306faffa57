use axum::extract::{rejection::JsonRejection, Json, State};

use crate::{
    error::{AppError, AppResult},
    handlers::authenticate,
    models::{LoadSettingsRequest, LoadSettingsResponse, SaveSettingsRequest, SaveSettingsResponse},
    store::empty_settings,
    AppState,
};

/// Store the caller's settings document, replacing any previous one
/// POST /settings/save
pub async fn save_settings(
    State(state): State<AppState>,
    payload: Result<Json<SaveSettingsRequest>, JsonRejection>,
) -> AppResult<Json<SaveSettingsResponse>> {
    let Json(request) = payload.map_err(|e| AppError::internal(format!("/settings/save body: {}", e.body_text())))?;

    let identity = authenticate(&state, request.init_data())?;

    let settings = request
        .settings
        .ok_or_else(|| AppError::internal(format!("no settings document for user {}", identity.user_id)))?;

    state.store.save(identity.user_id, &settings).await?;
    tracing::debug!("Saved settings for user {}", identity.user_id);

    Ok(Json(SaveSettingsResponse { ok: true }))
}

/// Return the caller's settings document, `{}` if nothing was saved yet
/// POST /settings/load
pub async fn load_settings(
    State(state): State<AppState>,
    payload: Result<Json<LoadSettingsRequest>, JsonRejection>,
) -> AppResult<Json<LoadSettingsResponse>> {
    let Json(request) = payload.map_err(|e| AppError::internal(format!("/settings/load body: {}", e.body_text())))?;

    let identity = authenticate(&state, request.init_data())?;

    let mut settings = state.store.load(identity.user_id).await?;
    if settings.is_null() {
        settings = empty_settings();
    }

    Ok(Json(LoadSettingsResponse { ok: true, settings }))
}
