//! Derivation of the outgoing body text.

use crate::error::RequestError;
use crate::http::HttpMethod;
use crate::params::ParamMap;
use crate::request::RequestSpec;
use crate::url_builder::{generate_url, INVALID_URL_TEXT};

/// Body text shown when the parameters cannot be encoded.
pub const JSON_ENCODE_FAILURE_TEXT: &str = "Cannot encode body as JSON.";

/// The body a request built from `spec` would carry.
///
/// A custom body wins. Otherwise GET previews the full URL (parameters travel
/// in the query string) and every other method sends the parameters as a
/// pretty-printed JSON object with sorted keys. Never fails: problems are
/// rendered as fallback text.
pub fn generated_body(spec: &RequestSpec) -> String {
    if spec.use_custom_body() {
        return spec.custom_body.clone();
    }
    if spec.method == HttpMethod::Get {
        return generate_url(spec, true)
            .map(String::from)
            .unwrap_or_else(|_| INVALID_URL_TEXT.to_string());
    }
    encode_json_parameters(&spec.body_parameters).unwrap_or_else(|_| JSON_ENCODE_FAILURE_TEXT.to_string())
}

/// Serialize `params` as an indented JSON object, keys ascending.
pub fn encode_json_parameters(params: &ParamMap) -> Result<String, RequestError> {
    serde_json::to_string_pretty(params).map_err(|e| RequestError::JsonEncode(e.to_string()))
}
