use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::{services::identity::IdentityError, store::StoreError};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid auth: {0}")]
    InvalidAuth(String),

    #[error("Malformed identity: {0}")]
    MalformedIdentity(#[from] IdentityError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidAuth(_) => StatusCode::FORBIDDEN,
            AppError::MalformedIdentity(_)
            | AppError::Store(_)
            | AppError::Config(_)
            | AppError::Io(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The only text a client ever sees for this error.
    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::InvalidAuth(_) => "Invalid auth",
            _ => "Server error",
        }
    }

    pub fn invalid_auth(msg: impl Into<String>) -> Self {
        AppError::InvalidAuth(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("API Error: {} - {}", status.as_u16(), self);
        } else {
            tracing::warn!("API Error: {} - {}", status.as_u16(), self);
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}
