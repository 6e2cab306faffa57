pub mod health;
pub mod settings;

// Common handler utilities
use crate::{
    error::{AppError, AppResult},
    services::{
        auth,
        identity::{self, VerifiedIdentity},
        init_data::InitData,
    },
    AppState,
};

/// Check the initData signature and resolve the caller's user id.
///
/// Signature problems (unparseable payload, missing or wrong hash, stale
/// auth_date) are `InvalidAuth`. A verified payload whose user object cannot
/// be read is `MalformedIdentity`.
pub fn authenticate(state: &AppState, raw_init_data: &str) -> AppResult<VerifiedIdentity> {
    let init_data = InitData::parse(raw_init_data)
        .map_err(|e| AppError::invalid_auth(format!("unparseable initData: {}", e)))?;

    if !auth::verify_init_data(&init_data, &state.config.security.bot_token) {
        return Err(AppError::invalid_auth("initData signature mismatch"));
    }

    if let Some(max_age) = state.config.init_data_max_age() {
        auth::check_freshness(&init_data, max_age, chrono::Utc::now().timestamp())
            .map_err(AppError::InvalidAuth)?;
    }

    let user = identity::extract_user(&init_data)?;

    Ok(VerifiedIdentity { user_id: user.id })
}
