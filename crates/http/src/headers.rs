//! Pure header synthesis from page state.
//!
//! Every function here maps a [`Page`] to header lines without touching a
//! transport, so the rules can be checked in isolation.

use pagekit_core::Page;

/// A header name and value, in emission order.
pub type HeaderLine = (String, String);

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const CONTENT_ENCODING: &str = "Content-Encoding";
pub const VARY: &str = "Vary";
pub const CONTENT_SECURITY_POLICY: &str = "Content-Security-Policy";
pub const STRICT_TRANSPORT_SECURITY: &str = "Strict-Transport-Security";
pub const X_ROBOTS_TAG: &str = "X-Robots-Tag";
pub const CACHE_CONTROL: &str = "Cache-Control";
pub const PRAGMA: &str = "Pragma";
pub const EXPIRES: &str = "Expires";

pub const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";

/// Sent on every response regardless of page flags.
pub const STATIC_SECURITY_HEADERS: [(&str, &str); 4] = [
    ("X-Content-Type-Options", "nosniff"),
    ("X-Frame-Options", "SAMEORIGIN"),
    ("X-XSS-Protection", "1; mode=block"),
    ("Referrer-Policy", "strict-origin-when-cross-origin"),
];

fn line(name: &str, value: impl Into<String>) -> HeaderLine {
    (name.to_string(), value.into())
}

pub fn content_type(page: &Page) -> HeaderLine {
    line(CONTENT_TYPE, format!("text/html; charset={}", page.charset()))
}

/// CSP (when enabled and non-empty), HSTS (when forced) and the static set.
pub fn security_headers(page: &Page) -> Vec<HeaderLine> {
    let mut headers = Vec::with_capacity(STATIC_SECURITY_HEADERS.len() + 2);

    if page.is_csp_enabled() {
        let policy = page.csp().header_value();
        if !policy.is_empty() {
            headers.push(line(CONTENT_SECURITY_POLICY, policy));
        }
    }

    if page.is_https_forced() {
        headers.push(line(STRICT_TRANSPORT_SECURITY, HSTS_VALUE));
    }

    headers.extend(
        STATIC_SECURITY_HEADERS
            .iter()
            .map(|(name, value)| line(name, *value)),
    );
    headers
}

/// `X-Robots-Tag` when the page opts out of indexing or link following.
pub fn robots_header(page: &Page) -> Option<HeaderLine> {
    let mut directives = Vec::with_capacity(2);
    if page.is_no_index() {
        directives.push("noindex");
    }
    if page.is_no_follow() {
        directives.push("nofollow");
    }

    (!directives.is_empty()).then(|| line(X_ROBOTS_TAG, directives.join(", ")))
}

pub fn cache_headers(page: &Page) -> Vec<HeaderLine> {
    if !page.is_no_cache() {
        return Vec::new();
    }

    vec![
        line(CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
        line(PRAGMA, "no-cache"),
        line(EXPIRES, "0"),
    ]
}
