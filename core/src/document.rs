//! Persisted document format.
//!
//! # Design
//! A document is a JSON object `{ "version": <int>, "data": <RequestSpec> }`.
//! The version is read on its own first, so a file from a newer format is
//! rejected before its payload is interpreted as a `RequestSpec`.

use serde::{Deserialize, Serialize};

use crate::error::RequestError;
use crate::request::RequestSpec;

/// Highest document version this crate reads, and the one it writes.
pub const DOCUMENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDocument {
    pub version: u32,
    pub data: RequestSpec,
}

impl Default for RequestDocument {
    fn default() -> Self {
        Self::new(RequestSpec::default())
    }
}

#[derive(Deserialize)]
struct VersionHeader {
    version: u32,
}

impl RequestDocument {
    pub fn new(data: RequestSpec) -> Self {
        Self {
            version: DOCUMENT_VERSION,
            data,
        }
    }

    /// Decode a document, refusing versions newer than [`DOCUMENT_VERSION`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self, RequestError> {
        let header: VersionHeader =
            serde_json::from_slice(bytes).map_err(|e| RequestError::Document(e.to_string()))?;
        if header.version > DOCUMENT_VERSION {
            tracing::warn!(found = header.version, supported = DOCUMENT_VERSION, "incompatible document version");
            return Err(RequestError::IncompatibleFileVersion {
                found: header.version,
                supported: DOCUMENT_VERSION,
            });
        }

        serde_json::from_slice(bytes).map_err(|e| RequestError::Document(e.to_string()))
    }

    pub fn to_vec(&self) -> Result<Vec<u8>, RequestError> {
        serde_json::to_vec_pretty(self).map_err(|e| RequestError::JsonEncode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpMethod, Protocol};

    const SAMPLE: &str = r#"{
        "version": 1,
        "data": {
            "requestProtocol": "https",
            "domain": "api.example.com",
            "path": "/users/:id",
            "requestMethod": "PATCH",
            "tokens": { "id": "7" },
            "headers": { "Accept": "application/json" },
            "bodyParameters": { "name": "Ada" },
            "useCustomBody": false,
            "customBody": ""
        }
    }"#;

    #[test]
    fn decodes_schema() {
        let document = RequestDocument::from_slice(SAMPLE.as_bytes()).unwrap();
        let spec = &document.data;
        assert_eq!(spec.protocol, Protocol::Https);
        assert_eq!(spec.method, HttpMethod::Patch);
        assert_eq!(spec.path(), "/users/:id");
        assert_eq!(spec.tokens.get("id"), Some("7"));
        assert_eq!(spec.headers.get("Accept"), Some("application/json"));
        assert!(!spec.use_custom_body());
    }

    #[test]
    fn newer_version_is_rejected_before_payload() {
        // The payload would not even decode as a RequestSpec.
        let raw = r#"{"version": 2, "data": {"requestMethod": "TRACE"}}"#;
        let err = RequestDocument::from_slice(raw.as_bytes()).unwrap_err();
        assert_eq!(err, RequestError::IncompatibleFileVersion { found: 2, supported: 1 });
    }

    #[test]
    fn malformed_document_is_reported() {
        assert!(matches!(RequestDocument::from_slice(b"not json"), Err(RequestError::Document(_))));
        assert!(matches!(
            RequestDocument::from_slice(br#"{"data": {}}"#),
            Err(RequestError::Document(_))
        ));
    }

    #[test]
    fn loading_restores_token_invariant() {
        let raw = r#"{"version": 1, "data": {"path": "/a/:x", "tokens": {"stale": ""}}}"#;
        let document = RequestDocument::from_slice(raw.as_bytes()).unwrap();
        assert_eq!(document.data.tokens.get("x"), Some(""));
        assert!(!document.data.tokens.contains_key("stale"));
    }

    #[test]
    fn written_document_reads_back() {
        let document = RequestDocument::from_slice(SAMPLE.as_bytes()).unwrap();
        let bytes = document.to_vec().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["data"]["requestProtocol"], "https");
        assert_eq!(RequestDocument::from_slice(&bytes).unwrap(), document);
    }

    #[test]
    fn default_document_uses_current_version() {
        let document = RequestDocument::default();
        assert_eq!(document.version, DOCUMENT_VERSION);
        assert_eq!(document.data.method, HttpMethod::Get);
    }
}
