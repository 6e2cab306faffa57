use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Per-user settings persistence. One JSON document per user id.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Insert or fully replace the document stored for `user_id`.
    async fn save(&self, user_id: i64, settings: &Value) -> Result<(), StoreError>;

    /// Stored document, or an empty object when the user has none.
    async fn load(&self, user_id: i64) -> Result<Value, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

pub fn empty_settings() -> Value {
    Value::Object(serde_json::Map::new())
}

// In-process store for tests and local development (STORE_BACKEND=memory)
#[derive(Default)]
pub struct MemorySettingsStore {
    records: RwLock<HashMap<i64, Value>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn save(&self, user_id: i64, settings: &Value) -> Result<(), StoreError> {
        self.records.write().await.insert(user_id, settings.clone());
        Ok(())
    }

    async fn load(&self, user_id: i64) -> Result<Value, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_else(empty_settings))
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
