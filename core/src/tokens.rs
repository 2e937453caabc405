//! Path template parsing and token bookkeeping.
//!
//! A path template is split on `/`. Empty components (from leading, trailing
//! or doubled slashes) are dropped, but a trailing slash is remembered so URL
//! generation can restore it. A component starting with `:` is a token
//! placeholder; the rest of the component is the token name.

use std::collections::BTreeSet;

use crate::params::ParamMap;

/// One non-empty component of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// `:name`. A bare `:` yields an empty name, which never becomes a token.
    Token(String),
}

/// A parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    segments: Vec<Segment>,
    trailing_slash: bool,
}

impl PathTemplate {
    pub fn parse(path: &str) -> Self {
        let segments = split_segments(path)
            .into_iter()
            .map(|component| match component.strip_prefix(':') {
                Some(name) => Segment::Token(name.to_string()),
                None => Segment::Literal(component.to_string()),
            })
            .collect();
        Self {
            segments,
            trailing_slash: has_trailing_slash(path),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }
}

/// Split `path` on `/`, dropping empty components.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

pub fn has_trailing_slash(path: &str) -> bool {
    path.ends_with('/')
}

/// Names of all tokens referenced by `path`; empty names are ignored.
pub fn token_names(path: &str) -> BTreeSet<String> {
    split_segments(path)
        .into_iter()
        .filter_map(|component| component.strip_prefix(':'))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reconcile `current` with the tokens referenced by `new_path`.
///
/// Newly referenced tokens are added with an empty value. A token that is no
/// longer referenced is removed only when its value is empty; a filled-in
/// value survives template edits. Idempotent for a fixed `new_path`.
pub fn sync_tokens(current: &ParamMap, new_path: &str) -> ParamMap {
    let referenced = token_names(new_path);
    let mut updated = current.clone();
    for name in &referenced {
        if !updated.contains_key(name) {
            updated.set(name.as_str(), "");
        }
    }
    updated.retain(|name, value| referenced.contains(name) || !value.is_empty());
    updated
}
