//! Display derivations for a received response.

use serde_json::Value;

use crate::error::RequestError;
use crate::params::ParamMap;

/// Render headers as `Name: Value` lines sorted by name, without a trailing
/// newline.
pub fn format_headers(headers: &ParamMap) -> String {
    headers
        .iter()
        .map(|(name, value)| format!("{name}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn parse_json(raw_body: &[u8]) -> Result<Value, RequestError> {
    serde_json::from_slice(raw_body).map_err(|e| RequestError::JsonDecode(e.to_string()))
}

/// `Some` iff `raw_body` is a complete JSON document.
pub fn detect_json(raw_body: &[u8]) -> Option<Value> {
    match parse_json(raw_body) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::trace!(%err, "response body is not JSON");
            None
        }
    }
}

/// Re-serialize `value` with indentation. Object keys come out sorted.
pub fn prettify(value: &Value) -> Result<Vec<u8>, RequestError> {
    serde_json::to_vec_pretty(value).map_err(|e| RequestError::JsonEncode(e.to_string()))
}
