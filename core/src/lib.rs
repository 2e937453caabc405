//! Request composition and execution core.
//!
//! # Overview
//! A `RequestSpec` describes one parameterized HTTP request: protocol, domain,
//! a path template with `:token` placeholders, method, headers and body
//! parameters. Pure derivations turn it into a URL (`generate_url`) and a body
//! (`generated_body`); `RequestExecutor` sends it through a `Transport` and
//! publishes the outcome as an `ExecutionState` carrying an inspected
//! `Response`.
//!
//! # Design
//! - Everything except `Transport` implementations is free of I/O, so the
//!   derivations are deterministic and the executor is testable with stubs.
//! - `RequestSpec` and `ExecutionState` are owned by the caller-facing layer;
//!   the executor is the only writer of its state.
//! - `RequestDocument` is the persisted form, guarded by a format version.

pub mod body;
pub mod config;
pub mod document;
pub mod error;
pub mod executor;
pub mod http;
pub mod inspector;
pub mod params;
pub mod request;
pub mod response;
pub mod tokens;
pub mod transport;
pub mod url_builder;

pub use body::generated_body;
pub use config::TransportConfig;
pub use document::{RequestDocument, DOCUMENT_VERSION};
pub use error::RequestError;
pub use executor::{ExecutionState, RequestExecutor};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Protocol};
pub use params::ParamMap;
pub use request::RequestSpec;
pub use response::Response;
pub use tokens::sync_tokens;
pub use transport::{ReqwestTransport, Transport};
pub use url_builder::{generate_url, url_preview};
