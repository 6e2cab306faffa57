use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::Duration;

use crate::services::init_data::InitData;

type HmacSha256 = Hmac<Sha256>;

/// Key used by Telegram to derive the Web App secret from the bot token.
const WEB_APP_DATA_KEY: &[u8] = b"WebAppData";

const HASH_KEY: &str = "hash";
const AUTH_DATE_KEY: &str = "auth_date";

/// Verify a raw `initData` string against the bot token.
///
/// Returns false for payloads that fail to parse, lack a `hash` field, or
/// carry a signature that does not match.
pub fn verify(payload: &str, secret: &str) -> bool {
    match InitData::parse(payload) {
        Ok(init_data) => verify_init_data(&init_data, secret),
        Err(e) => {
            tracing::debug!("initData rejected before signature check: {}", e);
            false
        }
    }
}

pub fn verify_init_data(init_data: &InitData, secret: &str) -> bool {
    let Some(claimed) = init_data.get(HASH_KEY) else {
        return false;
    };

    let expected = sign(init_data, secret);
    constant_time_eq(expected.as_bytes(), claimed.as_bytes())
}

/// Sorted, newline-joined `key=value` lines of every non-hash pair.
pub fn data_check_string(init_data: &InitData) -> String {
    let mut lines: Vec<String> = init_data
        .pairs()
        .filter(|(key, _)| *key != HASH_KEY)
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();

    lines.sort_unstable();
    lines.join("\n")
}

/// Lowercase hex HMAC-SHA256 signature the platform would attach to this payload.
pub fn sign(init_data: &InitData, secret: &str) -> String {
    let secret_key = hmac_sha256(WEB_APP_DATA_KEY, secret.as_bytes());
    let signature = hmac_sha256(&secret_key, data_check_string(init_data).as_bytes());
    hex::encode(signature)
}

/// Reject payloads whose `auth_date` is older than `max_age` at `now` (unix seconds).
pub fn check_freshness(init_data: &InitData, max_age: Duration, now: i64) -> Result<(), String> {
    let auth_date = init_data
        .get(AUTH_DATE_KEY)
        .ok_or_else(|| "missing auth_date".to_string())?;

    let auth_date: i64 = auth_date
        .parse()
        .map_err(|_| format!("unparseable auth_date '{}'", auth_date))?;

    let age = now.saturating_sub(auth_date);
    let limit = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
    if age > limit {
        return Err(format!("initData is {}s old, limit is {}s", age, max_age.as_secs()));
    }

    Ok(())
}

fn hmac_sha256(key: &[u8], message: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can accept any key length");
    mac.update(message);
    mac.finalize().into_bytes().to_vec()
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
