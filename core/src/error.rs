//! Error types for request composition, execution and persistence.
//!
//! # Design
//! One enum covers every failure the core can report. None of them is fatal
//! to the process: URL and JSON problems surface as absent results or fallback
//! text, network problems become `ExecutionState::Failed`, and only
//! `IncompatibleFileVersion` / `Document` abort the operation that raised them
//! (opening a document).

/// Errors produced by the request core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// Domain and path cannot be composed into a syntactically valid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The persisted document was written by a newer format version.
    #[error("the version of this file is incompatible (found {found}, supported up to {supported})")]
    IncompatibleFileVersion { found: u32, supported: u32 },

    /// The transport failed before an HTTP response was received.
    #[error("network error: {0}")]
    Network(String),

    /// A value could not be serialized to JSON.
    #[error("cannot encode JSON: {0}")]
    JsonEncode(String),

    /// A byte sequence is not valid JSON.
    #[error("cannot decode JSON: {0}")]
    JsonDecode(String),

    /// The persisted document is not valid JSON or does not match the schema.
    #[error("malformed document: {0}")]
    Document(String),
}
