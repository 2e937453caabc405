//! Composition of protocol, domain and substituted path into a URL.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::Url;

use crate::error::RequestError;
use crate::http::HttpMethod;
use crate::request::RequestSpec;
use crate::tokens::{PathTemplate, Segment};

/// Text shown in place of a URL that cannot be built.
pub const INVALID_URL_TEXT: &str = "Invalid URL";

/// Characters escaped inside one path component. `/`, `?`, `#` and `%` are
/// included so a component can never change the URL's structure.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'\\')
    .add(b'%')
    .add(b'^')
    .add(b'|')
    .add(b'[')
    .add(b']');

/// Build the request URL described by `spec`.
///
/// Token placeholders are replaced by their values; components that end up
/// empty (doubled slashes, missing or empty tokens) are dropped. Each
/// remaining component is percent-encoded on its own, so reserved characters
/// in token values stay inside their path component. A trailing slash on the
/// template is kept. When `include_query_params` is set and the method is GET,
/// body parameters are appended as query pairs in key order.
pub fn generate_url(spec: &RequestSpec, include_query_params: bool) -> Result<Url, RequestError> {
    validate_domain(&spec.domain)?;

    let base = format!("{}://{}/", spec.protocol, spec.domain);
    let mut url = Url::parse(&base).map_err(|e| RequestError::InvalidUrl(format!("{base}: {e}")))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(RequestError::InvalidUrl(format!("{base}: missing host")));
    }

    let template = PathTemplate::parse(spec.path());
    let mut components = Vec::new();
    for segment in template.segments() {
        let component = match segment {
            Segment::Literal(text) => text.as_str(),
            Segment::Token(name) => spec.tokens.get(name).unwrap_or_default(),
        };
        if component.is_empty() {
            continue;
        }
        // URL parsers resolve these even when percent-encoded.
        if component == "." || component == ".." {
            return Err(RequestError::InvalidUrl(format!("{component:?} cannot be sent as a path component")));
        }
        components.push(utf8_percent_encode(component, PATH_SEGMENT).to_string());
    }

    let mut path = format!("/{}", components.join("/"));
    // The root path already ends in '/'.
    if template.trailing_slash() && !components.is_empty() {
        path.push('/');
    }
    url.set_path(&path);

    if include_query_params && spec.method == HttpMethod::Get && !spec.body_parameters.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in spec.body_parameters.iter() {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

/// The URL without query parameters, or [`INVALID_URL_TEXT`].
pub fn url_preview(spec: &RequestSpec) -> String {
    generate_url(spec, false)
        .map(String::from)
        .unwrap_or_else(|_| INVALID_URL_TEXT.to_string())
}

/// Reject domains that cannot be a bare `host[:port]` before the URL parser
/// gets a chance to reinterpret them (e.g. as path or userinfo).
fn validate_domain(domain: &str) -> Result<(), RequestError> {
    if domain.is_empty() {
        return Err(RequestError::InvalidUrl("domain is empty".to_string()));
    }
    if domain.contains(['/', '\\', '?', '#', '@']) || domain.chars().any(char::is_whitespace) {
        return Err(RequestError::InvalidUrl(format!("{domain:?} is not a valid host")));
    }
    Ok(())
}
