use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InitDataError {
    #[error("invalid percent-encoding at byte {position}")]
    InvalidPercentEncoding { position: usize },

    #[error("decoded initData is not valid UTF-8")]
    InvalidUtf8,
}

/// Decoded `initData` payload as sent by the Telegram Web App client.
///
/// Pairs keep their original order and duplicates are not merged, so the
/// signed content can be rebuilt exactly as the platform saw it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitData {
    pairs: Vec<(String, String)>,
}

impl InitData {
    /// Parse a form-encoded query string (`key=value&key=value`).
    pub fn parse(raw: &str) -> Result<Self, InitDataError> {
        let mut pairs = Vec::new();
        let mut offset = 0;

        for segment in raw.split('&') {
            let start = offset;
            offset += segment.len() + 1;

            // `a=1&&b=2` only has two pairs
            if segment.is_empty() {
                continue;
            }

            let (key, value) = match segment.split_once('=') {
                Some((key, value)) => (key, value),
                None => (segment, ""),
            };

            let value_start = start + key.len() + 1;
            pairs.push((decode_component(key, start)?, decode_component(value, value_start)?));
        }

        Ok(InitData { pairs })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

// `+` means space in form encoding; it has to be swapped before percent
// decoding so that an encoded `%2B` survives as a literal plus.
fn decode_component(component: &str, position: usize) -> Result<String, InitDataError> {
    let bytes = component.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(InitDataError::InvalidPercentEncoding { position: position + i });
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let spaced = component.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| InitDataError::InvalidUtf8)
}
