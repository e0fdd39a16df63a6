//! Content Security Policy directives.
//!
//! A [`CspPolicy`] keeps directives in insertion order, which is also the
//! order they appear in the emitted header.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SRC: &str = "default-src";
pub const SCRIPT_SRC: &str = "script-src";
pub const STYLE_SRC: &str = "style-src";
pub const IMG_SRC: &str = "img-src";
pub const FONT_SRC: &str = "font-src";
pub const CONNECT_SRC: &str = "connect-src";
pub const MEDIA_SRC: &str = "media-src";
pub const FRAME_SRC: &str = "frame-src";
pub const BLOCK_ALL_MIXED_CONTENT: &str = "block-all-mixed-content";
pub const REQUIRE_SRI_FOR: &str = "require-sri-for";

pub const SELF: &str = "'self'";
pub const UNSAFE_INLINE: &str = "'unsafe-inline'";

/// Value of a single directive.
///
/// `Token("")` renders as the bare directive name (e.g. `block-all-mixed-content`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CspValue {
    Token(String),
    Sources(Vec<String>),
}

impl CspValue {
    /// The empty token, rendered as the directive name alone.
    pub fn flag() -> Self {
        Self::Token(String::new())
    }

    fn render(&self, directive: &str) -> String {
        match self {
            Self::Token(token) if token.is_empty() => directive.to_string(),
            Self::Token(token) => format!("{directive} {token}"),
            Self::Sources(sources) if sources.is_empty() => directive.to_string(),
            Self::Sources(sources) => format!("{directive} {}", sources.join(" ")),
        }
    }

    fn into_sources(self) -> Vec<String> {
        match self {
            Self::Token(token) if token.is_empty() => Vec::new(),
            Self::Token(token) => vec![token],
            Self::Sources(sources) => sources,
        }
    }
}

impl From<&str> for CspValue {
    fn from(token: &str) -> Self {
        Self::Token(token.to_string())
    }
}

impl From<String> for CspValue {
    fn from(token: String) -> Self {
        Self::Token(token)
    }
}

impl From<Vec<String>> for CspValue {
    fn from(sources: Vec<String>) -> Self {
        Self::Sources(sources)
    }
}

impl<const N: usize> From<[&str; N]> for CspValue {
    fn from(sources: [&str; N]) -> Self {
        Self::Sources(sources.iter().map(|s| s.to_string()).collect())
    }
}

/// Ordered directive map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CspPolicy {
    directives: IndexMap<String, CspValue>,
}

impl CspPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites a directive wholesale.
    pub fn set(&mut self, directive: impl Into<String>, value: impl Into<CspValue>) -> &mut Self {
        self.directives.insert(directive.into(), value.into());
        self
    }

    pub fn get(&self, directive: &str) -> Option<&CspValue> {
        self.directives.get(directive)
    }

    /// Merges sources into a directive's list.
    ///
    /// An existing single token becomes the first list element. The merged
    /// list never holds the same source twice.
    pub fn allow<I, S>(&mut self, directive: impl Into<String>, sources: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entry = self
            .directives
            .entry(directive.into())
            .or_insert_with(|| CspValue::Sources(Vec::new()));

        let existing = std::mem::replace(entry, CspValue::Sources(Vec::new())).into_sources();
        let mut merged: Vec<String> = Vec::with_capacity(existing.len());
        for source in existing.into_iter().chain(sources.into_iter().map(Into::into)) {
            if !merged.contains(&source) {
                merged.push(source);
            }
        }

        *entry = CspValue::Sources(merged);
        self
    }

    pub fn remove(&mut self, directive: &str) -> Option<CspValue> {
        self.directives.shift_remove(directive)
    }

    pub fn directives(&self) -> impl Iterator<Item = (&str, &CspValue)> {
        self.directives.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Builds the `Content-Security-Policy` header value.
    ///
    /// Directives are joined with `"; "` in insertion order. An empty policy
    /// yields an empty string.
    pub fn header_value(&self) -> String {
        self.directives
            .iter()
            .map(|(directive, value)| value.render(directive))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
