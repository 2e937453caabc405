//! The inspected result of one successful round-trip.

use serde_json::Value;

use crate::error::RequestError;
use crate::http::HttpResponse;
use crate::inspector::{detect_json, format_headers, prettify};
use crate::params::ParamMap;

/// A received HTTP response together with its display derivations.
///
/// Built once per completed request; the derived fields are computed up front
/// so observers never see a response without them.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status_code: u16,
    pub header_map: ParamMap,
    pub raw_body: Vec<u8>,
    pub parsed_json: Option<Value>,
    pub formatted_headers: String,
}

impl Response {
    pub fn new(status_code: u16, headers: Vec<(String, String)>, raw_body: Vec<u8>) -> Self {
        let mut header_map = ParamMap::new();
        for (name, value) in headers {
            let merged = match header_map.get(&name) {
                Some(existing) => format!("{existing}, {value}"),
                None => value,
            };
            header_map.set(name, merged);
        }
        let formatted_headers = format_headers(&header_map);
        let parsed_json = detect_json(&raw_body);
        Self {
            status_code,
            header_map,
            raw_body,
            parsed_json,
            formatted_headers,
        }
    }

    pub fn is_json(&self) -> bool {
        self.parsed_json.is_some()
    }

    /// Body decoded as UTF-8, invalid sequences replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.raw_body).into_owned()
    }

    /// `"404 - Not Found"`, or just the code when it has no standard reason.
    pub fn status_line(&self) -> String {
        match reqwest::StatusCode::from_u16(self.status_code)
            .ok()
            .and_then(|status| status.canonical_reason())
        {
            Some(reason) => format!("{} - {reason}", self.status_code),
            None => self.status_code.to_string(),
        }
    }

    /// A copy whose raw body is the indented form of `parsed_json`.
    ///
    /// Returns `Ok(None)` for non-JSON bodies. The original byte layout is
    /// not kept.
    pub fn prettified(&self) -> Result<Option<Self>, RequestError> {
        let Some(value) = &self.parsed_json else {
            return Ok(None);
        };
        Ok(Some(Self {
            raw_body: prettify(value)?,
            ..self.clone()
        }))
    }
}

impl From<HttpResponse> for Response {
    fn from(response: HttpResponse) -> Self {
        Self::new(response.status, response.headers, response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn derives_json_and_header_text() {
        let response = Response::new(
            200,
            headers(&[("server", "mock"), ("content-type", "application/json")]),
            br#"{"ok":true}"#.to_vec(),
        );
        assert!(response.is_json());
        assert_eq!(response.formatted_headers, "content-type: application/json\nserver: mock");
    }

    #[test]
    fn repeated_headers_are_joined() {
        let response = Response::new(200, headers(&[("vary", "a"), ("vary", "b")]), Vec::new());
        assert_eq!(response.header_map.get("vary"), Some("a, b"));
    }

    #[test]
    fn status_line_includes_reason() {
        assert_eq!(Response::new(404, Vec::new(), Vec::new()).status_line(), "404 - Not Found");
        assert_eq!(Response::new(599, Vec::new(), Vec::new()).status_line(), "599");
    }

    #[test]
    fn prettified_replaces_raw_body() {
        let response = Response::new(200, Vec::new(), br#"{"b":1,"a":2}"#.to_vec());
        let pretty = response.prettified().unwrap().unwrap();
        assert_eq!(pretty.body_text(), "{\n  \"a\": 2,\n  \"b\": 1\n}");
        assert_eq!(pretty.parsed_json, response.parsed_json);
    }

    #[test]
    fn prettified_skips_plain_text() {
        let response = Response::new(200, Vec::new(), b"hello".to_vec());
        assert_eq!(response.prettified().unwrap(), None);
    }
}
