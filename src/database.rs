use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    store::{empty_settings, SettingsStore, StoreError},
};

const CREATE_USER_SETTINGS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS user_settings (
        user_id BIGINT PRIMARY KEY,
        settings JSONB NOT NULL
    )
"#;

#[derive(Clone)]
pub struct PgSettingsStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgSettingsStore {
    /// Build the pool without connecting; the first query opens a connection.
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut options = PgConnectOptions::from_str(&config.database.url)
            .map_err(|e| AppError::Config(format!("Invalid DATABASE_URL: {}", e)))?;

        if let Some(mode) = &config.database.ssl_mode {
            let ssl_mode = PgSslMode::from_str(mode)
                .map_err(|e| AppError::Config(format!("Invalid DATABASE_SSL_MODE '{}': {}", mode, e)))?;
            options = options.ssl_mode(ssl_mode);
        }

        let timeout = config.store_timeout();
        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .min_connections(config.database.min_connections)
            .acquire_timeout(timeout)
            .connect_lazy_with(options);

        Ok(Self::from_pool(pool, timeout))
    }

    pub fn from_pool(pool: PgPool, timeout: Duration) -> Self {
        PgSettingsStore { pool, timeout }
    }

    /// Create the `user_settings` table if it does not exist yet.
    pub async fn ensure_table(&self) -> Result<(), StoreError> {
        self.with_timeout(sqlx::query(CREATE_USER_SETTINGS_TABLE).execute(&self.pool))
            .await?;
        Ok(())
    }

    async fn with_timeout<T, F>(&self, operation: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn save(&self, user_id: i64, settings: &Value) -> Result<(), StoreError> {
        let query = sqlx::query(
            r#"INSERT INTO user_settings (user_id, settings)
               VALUES ($1, $2)
               ON CONFLICT (user_id) DO UPDATE SET settings = EXCLUDED.settings"#,
        )
        .bind(user_id)
        .bind(Json(settings));

        self.with_timeout(query.execute(&self.pool)).await?;
        Ok(())
    }

    async fn load(&self, user_id: i64) -> Result<Value, StoreError> {
        let query = sqlx::query("SELECT settings FROM user_settings WHERE user_id = $1")
            .bind(user_id);

        let row = self.with_timeout(query.fetch_optional(&self.pool)).await?;

        match row {
            Some(row) => {
                let Json(settings): Json<Value> = row.try_get("settings")?;
                Ok(settings)
            }
            None => Ok(empty_settings()),
        }
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let row = self
            .with_timeout(sqlx::query("SELECT 1 as health").fetch_one(&self.pool))
            .await?;
        let health: i32 = row.try_get("health")?;
        Ok(health == 1)
    }
}
