//! Asynchronous execution of one request at a time.
//!
//! # Design
//! `RequestExecutor` owns the current `ExecutionState` inside a
//! `tokio::sync::watch` sender. That sender is the single serialized update
//! path: every transition replaces the whole state, and observers read a
//! consistent snapshot through `state()` or a subscribed receiver.
//!
//! `perform_request` publishes `Loading` before it returns, then spawns one
//! task that awaits the transport and publishes exactly one terminal state.
//! Calls are not tagged or cancelled; when several overlap, the one that
//! completes last determines the final state.

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use url::Url;

use crate::error::RequestError;
use crate::http::{HttpMethod, HttpRequest};
use crate::params::ParamMap;
use crate::response::Response;
use crate::request::RequestSpec;
use crate::transport::Transport;

/// Lifecycle of the most recent request attempt.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExecutionState {
    #[default]
    Idle,
    Loading,
    Finished(Response),
    /// Human-readable failure description.
    Failed(String),
}

impl ExecutionState {
    pub fn response(&self) -> Option<&Response> {
        match self {
            ExecutionState::Finished(response) => Some(response),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ExecutionState::Loading)
    }
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionState::Idle => f.write_str("Idle"),
            ExecutionState::Loading => f.write_str("Loading"),
            ExecutionState::Finished(_) => f.write_str("Finished"),
            ExecutionState::Failed(message) => write!(f, "Failed: {message}"),
        }
    }
}

/// Assemble the outgoing request.
///
/// Every method but GET carries `body` as UTF-8. User headers keep map order;
/// POST always ends with `Content-Type: application/json`, replacing any
/// user-supplied content type (names compared ignoring ASCII case).
pub fn build_request(url: Url, method: HttpMethod, headers: &ParamMap, body: &str) -> HttpRequest {
    let forces_json = method == HttpMethod::Post;
    let mut header_list: Vec<(String, String)> = headers
        .iter()
        .filter(|(name, _)| !(forces_json && name.eq_ignore_ascii_case("content-type")))
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    if forces_json {
        header_list.push(("Content-Type".to_string(), "application/json".to_string()));
    }

    HttpRequest {
        url,
        method,
        headers: header_list,
        body: (method != HttpMethod::Get).then(|| body.as_bytes().to_vec()),
    }
}

/// Runs requests through a `Transport` and publishes their outcome.
pub struct RequestExecutor<T> {
    transport: Arc<T>,
    state: Arc<watch::Sender<ExecutionState>>,
}

impl<T> Clone for RequestExecutor<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Transport + 'static> RequestExecutor<T> {
    pub fn new(transport: T) -> Self {
        Self::with_shared_transport(Arc::new(transport))
    }

    pub fn with_shared_transport(transport: Arc<T>) -> Self {
        let (state, _) = watch::channel(ExecutionState::Idle);
        Self {
            transport,
            state: Arc::new(state),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ExecutionState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every transition.
    pub fn subscribe(&self) -> watch::Receiver<ExecutionState> {
        self.state.subscribe()
    }

    /// Start one request. The state is `Loading` when this returns; the
    /// handle resolves after the terminal state has been published.
    ///
    /// Must be called from within a tokio runtime.
    pub fn perform_request(&self, url: Url, method: HttpMethod, headers: &ParamMap, body: &str) -> JoinHandle<()> {
        self.dispatch(build_request(url, method, headers, body))
    }

    /// Run the request described by `spec`. An invalid URL is reported
    /// without sending anything or touching the state.
    pub fn perform(&self, spec: &RequestSpec) -> Result<JoinHandle<()>, RequestError> {
        Ok(self.dispatch(spec.prepare()?))
    }

    fn dispatch(&self, request: HttpRequest) -> JoinHandle<()> {
        self.state.send_replace(ExecutionState::Loading);
        tracing::info!(method = %request.method, url = %request.url, "sending request");

        let transport = Arc::clone(&self.transport);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let next = execute(transport.as_ref(), request).await;
            state.send_replace(next);
        })
    }

    /// Replace the finished response's body with its indented JSON form.
    ///
    /// Returns `false` and leaves the state alone when there is no finished
    /// JSON response.
    pub fn prettify_json_response(&self) -> bool {
        self.state.send_if_modified(|state| {
            let pretty = match state.response().map(Response::prettified) {
                Some(Ok(Some(pretty))) => pretty,
                Some(Err(err)) => {
                    tracing::warn!(%err, "cannot prettify response body");
                    return false;
                }
                _ => return false,
            };
            *state = ExecutionState::Finished(pretty);
            true
        })
    }
}

async fn execute<T: Transport + ?Sized>(transport: &T, request: HttpRequest) -> ExecutionState {
    match transport.send(request).await {
        Ok(raw) => {
            let response = Response::from(raw);
            tracing::debug!(status = response.status_code, json = response.is_json(), "request finished");
            ExecutionState::Finished(response)
        }
        Err(err) => {
            tracing::warn!(%err, "request failed");
            ExecutionState::Failed(err.to_string())
        }
    }
}
