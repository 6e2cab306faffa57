use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

// Request bodies sent by the mini-app. initData is accepted as any JSON value
// so a wrong type fails signature verification instead of body parsing. A null
// settings document is rejected the same way as a missing one.
#[derive(Debug, Deserialize)]
pub struct SaveSettingsRequest {
    #[serde(rename = "initData", default)]
    pub init_data: Option<serde_json::Value>,
    #[serde(default)]
    pub settings: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct LoadSettingsRequest {
    #[serde(rename = "initData", default)]
    pub init_data: Option<serde_json::Value>,
}

/// Raw initData string, or the empty payload when it is missing or not a string.
fn raw_init_data(value: &Option<serde_json::Value>) -> &str {
    value.as_ref().and_then(|v| v.as_str()).unwrap_or_default()
}

impl SaveSettingsRequest {
    pub fn init_data(&self) -> &str {
        raw_init_data(&self.init_data)
    }
}

impl LoadSettingsRequest {
    pub fn init_data(&self) -> &str {
        raw_init_data(&self.init_data)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveSettingsResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoadSettingsResponse {
    pub ok: bool,
    pub settings: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: bool,
    pub timestamp: DateTime<Utc>,
}
