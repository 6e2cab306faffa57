use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::services::init_data::{InitData, InitDataError};

const USER_KEY: &str = "user";

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("initData could not be parsed: {0}")]
    Payload(#[from] InitDataError),

    #[error("initData has no user field")]
    MissingUser,

    #[error("user field is not a valid user object: {0}")]
    InvalidUserJson(#[from] serde_json::Error),
}

/// The `user` object embedded in `initData`.
///
/// Only `id` is typed. Profile fields (`first_name`, `username`,
/// `is_premium`, ...) are kept as raw JSON so a client sending an unexpected
/// type for one of them still resolves to its id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebAppUser {
    pub id: i64,
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}

impl WebAppUser {
    pub fn username(&self) -> Option<&str> {
        self.profile.get("username").and_then(|v| v.as_str())
    }
}

/// Identity of a caller whose `initData` signature has been checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub user_id: i64,
}

pub fn extract_user(init_data: &InitData) -> Result<WebAppUser, IdentityError> {
    let raw_user = init_data.get(USER_KEY).ok_or(IdentityError::MissingUser)?;
    Ok(serde_json::from_str(raw_user)?)
}

/// Only call this on a payload that already passed signature verification.
pub fn extract_user_id(payload: &str) -> Result<i64, IdentityError> {
    let init_data = InitData::parse(payload)?;
    Ok(extract_user(&init_data)?.id)
}
