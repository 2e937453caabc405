//! The editable request description.
//!
//! # Design
//! Most fields are plain public data that a UI layer binds to directly. The
//! two fields whose writes have consequences are private and only change
//! through setters: `path` (re-synchronizes `tokens`) and `use_custom_body`
//! (seeds or clears `custom_body`). The serialized field names follow the
//! persisted document schema; decoding goes through `StoredRequestSpec` so
//! a decoded spec already satisfies the token invariant.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::body::generated_body;
use crate::error::RequestError;
use crate::http::{HttpMethod, HttpRequest, Protocol};
use crate::params::ParamMap;
use crate::tokens::sync_tokens;
use crate::url_builder::generate_url;

/// A parameterized HTTP request as composed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredRequestSpec")]
pub struct RequestSpec {
    #[serde(rename = "requestProtocol")]
    pub protocol: Protocol,
    /// Host with optional port, no scheme.
    pub domain: String,
    path: String,
    #[serde(rename = "requestMethod")]
    pub method: HttpMethod,
    pub tokens: ParamMap,
    pub headers: ParamMap,
    pub body_parameters: ParamMap,
    use_custom_body: bool,
    pub custom_body: String,
}

/// Wire shape of `RequestSpec`; missing fields take their defaults.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct StoredRequestSpec {
    request_protocol: Protocol,
    domain: String,
    path: String,
    request_method: HttpMethod,
    tokens: ParamMap,
    headers: ParamMap,
    body_parameters: ParamMap,
    use_custom_body: bool,
    custom_body: String,
}

impl From<StoredRequestSpec> for RequestSpec {
    fn from(stored: StoredRequestSpec) -> Self {
        let mut spec = Self {
            protocol: stored.request_protocol,
            domain: stored.domain,
            path: stored.path,
            method: stored.request_method,
            tokens: stored.tokens,
            headers: stored.headers,
            body_parameters: stored.body_parameters,
            use_custom_body: stored.use_custom_body,
            custom_body: stored.custom_body,
        };
        spec.update_tokens();
        spec
    }
}

impl RequestSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Replace the path template and reconcile `tokens` with it.
    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
        self.update_tokens();
    }

    /// Reconcile `tokens` with the current path template.
    pub fn update_tokens(&mut self) {
        self.tokens = sync_tokens(&self.tokens, &self.path);
    }

    pub fn use_custom_body(&self) -> bool {
        self.use_custom_body
    }

    /// Switch between the derived body and a hand-written one.
    ///
    /// Turning the custom body on seeds `custom_body` with the current
    /// [`generated_body`] so editing starts from what would have been sent.
    /// Turning it off clears `custom_body`. Setting the current value again
    /// leaves `custom_body` untouched.
    pub fn set_use_custom_body(&mut self, enabled: bool) {
        if enabled == self.use_custom_body {
            return;
        }
        if enabled {
            let seed = generated_body(self);
            self.custom_body = seed;
            self.use_custom_body = true;
        } else {
            self.use_custom_body = false;
            self.custom_body.clear();
        }
    }

    /// Set an `Authorization: Basic` header for `username` / `password`.
    pub fn set_basic_authorization(&mut self, username: &str, password: &str) {
        let credentials = STANDARD.encode(format!("{username}:{password}"));
        self.headers.set("Authorization", format!("Basic {credentials}"));
    }

    /// The request a "run" action sends: query parameters applied for GET,
    /// headers as entered, and the generated body.
    pub fn prepare(&self) -> Result<HttpRequest, RequestError> {
        let url = generate_url(self, true)?;
        let body = generated_body(self);
        Ok(crate::executor::build_request(url, self.method, &self.headers, &body))
    }
}
