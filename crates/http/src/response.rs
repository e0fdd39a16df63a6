//! Per-request response: render, compress, emit.
//!
//! A `Response` borrows a renderer and a page for one HTTP exchange.
//! [`Response::send`] consumes it, so headers can only ever be emitted once.

use indexmap::IndexMap;
use pagekit_core::{Page, Renderer};

use crate::{
    config::{ResponseConfig, DEFAULT_COMPRESSION_LEVEL},
    encoding::{self, clamp_level, Encoding},
    error::Result,
    headers::{self, HeaderLine},
    transport::{RequestContext, Transport},
};

/// Separator placed between renderer fragments.
const FRAGMENT_SEPARATOR: &str = "\n";

pub struct Response<'a, R: Renderer + ?Sized> {
    renderer: &'a R,
    page: &'a Page,
    compression: bool,
    compression_level: u32,
    status: u16,
    headers: IndexMap<String, String>,
    encodings: Vec<String>,
    negotiated: Option<Encoding>,
}

impl<'a, R: Renderer + ?Sized> Response<'a, R> {
    /// Creates a 200 response with gzip compression enabled at level 6.
    pub fn new(renderer: &'a R, page: &'a Page) -> Self {
        Self {
            renderer,
            page,
            compression: true,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            status: 200,
            headers: IndexMap::new(),
            encodings: vec!["gzip".to_string()],
            negotiated: None,
        }
    }

    /// Applies compression settings from a loaded [`ResponseConfig`].
    pub fn with_config(mut self, config: &ResponseConfig) -> Self {
        self.set_compression(config.compression)
            .set_compression_level(i64::from(config.compression_level))
            .set_supported_encodings(config.encodings.clone());
        self
    }

    pub fn page(&self) -> &Page {
        self.page
    }

    pub fn set_compression(&mut self, enabled: bool) -> &mut Self {
        self.compression = enabled;
        self
    }

    pub fn compression(&self) -> bool {
        self.compression
    }

    /// Sets the gzip level, clamped into `1..=9`.
    pub fn set_compression_level(&mut self, level: i64) -> &mut Self {
        self.compression_level = clamp_level(level);
        self
    }

    pub fn compression_level(&self) -> u32 {
        self.compression_level
    }

    pub fn set_status(&mut self, status: u16) -> &mut Self {
        self.status = status;
        self
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Adds a custom header. Setting the same name again replaces the value
    /// but keeps the original position.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn custom_headers(&self) -> &IndexMap<String, String> {
        &self.headers
    }

    pub fn set_supported_encodings(&mut self, encodings: Vec<String>) -> &mut Self {
        self.encodings = encodings;
        self
    }

    pub fn supported_encodings(&self) -> &[String] {
        &self.encodings
    }

    /// Encoding chosen by the last [`Response::render`], if any.
    pub fn negotiated_encoding(&self) -> Option<Encoding> {
        self.negotiated
    }

    /// Renders the page, joins the fragments with newlines and compresses
    /// the result when the request allows it.
    pub fn render<C: RequestContext + ?Sized>(&mut self, request: &C) -> Result<Vec<u8>> {
        let fragments = self.renderer.render(self.page)?;
        let output = fragments.join(FRAGMENT_SEPARATOR);

        tracing::debug!(
            fragments = fragments.len(),
            bytes = output.len(),
            template = self.page.canvas().template(),
            "rendered page"
        );

        Ok(self.apply_compression(output.into_bytes(), request))
    }

    /// Compresses `output` if enabled and negotiated, otherwise returns it
    /// untouched. Compression failures fall back to the identity body.
    pub fn apply_compression<C: RequestContext + ?Sized>(
        &mut self,
        output: Vec<u8>,
        request: &C,
    ) -> Vec<u8> {
        self.negotiated = None;

        if !self.compression {
            return output;
        }

        let accept = request.header("accept-encoding");
        let Some(selected) = encoding::negotiate(accept.as_deref(), &self.encodings) else {
            return output;
        };

        match encoding::compress(selected, &output, self.compression_level) {
            Ok(compressed) => {
                tracing::debug!(
                    encoding = selected.as_str(),
                    level = self.compression_level,
                    original = output.len(),
                    compressed = compressed.len(),
                    "compressed response body"
                );
                self.negotiated = Some(selected);
                compressed
            }
            Err(e) => {
                tracing::warn!(
                    encoding = selected.as_str(),
                    error = %e,
                    "compression failed, sending uncompressed body"
                );
                output
            }
        }
    }

    /// All headers for a body of `body_len` bytes, in emission order.
    ///
    /// Reflects the negotiation done by the last [`Response::render`].
    pub fn build_headers(&self, body_len: usize) -> Vec<HeaderLine> {
        let mut lines = Vec::new();

        if let Some(encoding) = self.negotiated {
            lines.push((headers::CONTENT_ENCODING.to_string(), encoding.as_str().to_string()));
            lines.push((headers::VARY.to_string(), "Accept-Encoding".to_string()));
        }

        lines.push(headers::content_type(self.page));
        if self.negotiated.is_none() {
            lines.push((headers::CONTENT_LENGTH.to_string(), body_len.to_string()));
        }

        lines.extend(headers::security_headers(self.page));
        lines.extend(headers::robots_header(self.page));
        lines.extend(headers::cache_headers(self.page));
        lines.extend(
            self.headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        lines
    }

    /// Renders and writes status, headers and body to `transport`.
    pub fn send<C, T>(mut self, request: &C, transport: &mut T) -> Result<()>
    where
        C: RequestContext + ?Sized,
        T: Transport + ?Sized,
    {
        let body = self.render(request)?;

        transport.write_status(self.status)?;
        for (name, value) in self.build_headers(body.len()) {
            tracing::trace!(header = %name, value = %value, "emit header");
            transport.write_header(&name, &value)?;
        }
        transport.write_body(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HeaderList, RecordingTransport};
    use pagekit_core::{CoreError, Node};

    type Fragments = pagekit_core::Result<Vec<String>>;

    fn lines(_: &Page) -> Fragments {
        Ok(vec!["line1".to_string(), "line2".to_string()])
    }

    fn hello(_: &Page) -> Fragments {
        Ok(vec!["hello".to_string()])
    }

    fn gzip_request() -> HeaderList {
        HeaderList::new().with("Accept-Encoding", "gzip, deflate")
    }

    #[cfg(feature = "gzip")]
    fn gunzip(bytes: &[u8]) -> String {
        use std::io::Read;

        let mut out = String::new();
        flate2::read::GzDecoder::new(bytes)
            .read_to_string(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_defaults() {
        let page = Page::new("x");
        let response = Response::new(&hello, &page);

        assert!(response.compression());
        assert_eq!(response.compression_level(), 6);
        assert_eq!(response.status(), 200);
        assert_eq!(response.supported_encodings(), ["gzip"]);
        assert!(response.custom_headers().is_empty());
    }

    #[test]
    fn test_render_joins_with_newline() {
        let page = Page::new("x");
        let mut response = Response::new(&lines, &page);
        response.set_compression(false);

        let body = response.render(&gzip_request()).unwrap();

        assert_eq!(body, b"line1\nline2");
        assert_eq!(response.negotiated_encoding(), None);
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_render_gzip_when_accepted() {
        let page = Page::new("x");
        let mut response = Response::new(&hello, &page);

        let body = response.render(&gzip_request()).unwrap();

        assert_eq!(gunzip(&body), "hello");
        assert_eq!(response.negotiated_encoding(), Some(Encoding::Gzip));
    }

    #[test]
    fn test_render_identity_leaves_body() {
        let page = Page::new("x");
        let mut response = Response::new(&hello, &page);

        let body = response
            .render(&HeaderList::new().with("Accept-Encoding", "identity"))
            .unwrap();

        assert_eq!(body, b"hello");
        assert_eq!(response.negotiated_encoding(), None);
    }

    #[test]
    fn test_render_without_accept_encoding() {
        let page = Page::new("x");
        let mut response = Response::new(&hello, &page);

        assert_eq!(response.render(&HeaderList::new()).unwrap(), b"hello");
    }

    #[test]
    fn test_render_when_gzip_not_supported_locally() {
        let page = Page::new("x");
        let mut response = Response::new(&hello, &page);
        response.set_supported_encodings(vec!["br".to_string()]);

        assert_eq!(response.render(&gzip_request()).unwrap(), b"hello");
    }

    #[test]
    fn test_renderer_error_propagates() {
        let failing = |_: &Page| -> Fragments { Err(CoreError::Render("boom".to_string())) };
        let page = Page::new("x");
        let mut response = Response::new(&failing, &page);

        assert!(response.render(&HeaderList::new()).is_err());
    }

    #[test]
    fn test_compression_level_clamped_at_set_time() {
        let page = Page::new("x");
        let mut response = Response::new(&hello, &page);

        response.set_compression_level(0);
        assert_eq!(response.compression_level(), 1);
        response.set_compression_level(99);
        assert_eq!(response.compression_level(), 9);
    }

    #[test]
    fn test_with_config() {
        let page = Page::new("x");
        let config = ResponseConfig {
            compression: false,
            compression_level: 2,
            encodings: vec!["gzip".to_string(), "br".to_string()],
        };

        let response = Response::new(&hello, &page).with_config(&config);

        assert!(!response.compression());
        assert_eq!(response.compression_level(), 2);
        assert_eq!(response.supported_encodings(), ["gzip", "br"]);
    }

    #[test]
    fn test_send_uncompressed_headers() {
        let page = Page::new("x");
        let mut transport = RecordingTransport::default();
        let mut response = Response::new(&hello, &page);
        response.set_status(404);

        response.send(&HeaderList::new(), &mut transport).unwrap();

        assert_eq!(transport.status, Some(404));
        assert_eq!(transport.body, b"hello");
        assert_eq!(
            transport.header_value("Content-Type"),
            Some("text/html; charset=UTF-8")
        );
        assert_eq!(transport.header_value("Content-Length"), Some("5"));
        assert_eq!(transport.header_value("Content-Encoding"), None);
        assert_eq!(transport.header_value("X-Frame-Options"), Some("SAMEORIGIN"));
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_send_compressed_headers() {
        let page = Page::new("x");
        let mut transport = RecordingTransport::default();

        Response::new(&hello, &page)
            .send(&gzip_request(), &mut transport)
            .unwrap();

        assert_eq!(transport.header_value("Content-Encoding"), Some("gzip"));
        assert_eq!(transport.header_value("Vary"), Some("Accept-Encoding"));
        assert_eq!(transport.header_value("Content-Length"), None);
        assert_eq!(gunzip(&transport.body), "hello");
    }

    #[test]
    fn test_send_csp_header() {
        let mut page = Page::new("x");
        page.set_csp("default-src", ["'self'"]).enable_csp(true);
        let mut transport = RecordingTransport::default();

        Response::new(&hello, &page)
            .send(&HeaderList::new(), &mut transport)
            .unwrap();

        assert_eq!(
            transport.header_value("Content-Security-Policy"),
            Some("default-src 'self'")
        );
    }

    #[test]
    fn test_send_robots_header() {
        let mut page = Page::new("x");
        page.no_index(true).no_follow(true);
        let mut transport = RecordingTransport::default();

        Response::new(&hello, &page)
            .send(&HeaderList::new(), &mut transport)
            .unwrap();

        assert_eq!(
            transport.header_value("X-Robots-Tag"),
            Some("noindex, nofollow")
        );
    }

    #[test]
    fn test_send_cache_and_hsts_headers() {
        let mut page = Page::new("x");
        page.no_cache(true).force_https(true);
        let mut transport = RecordingTransport::default();

        Response::new(&hello, &page)
            .send(&HeaderList::new(), &mut transport)
            .unwrap();

        assert_eq!(
            transport.header_value("Cache-Control"),
            Some("no-cache, no-store, must-revalidate")
        );
        assert_eq!(transport.header_value("Pragma"), Some("no-cache"));
        assert_eq!(transport.header_value("Expires"), Some("0"));
        assert_eq!(
            transport.header_value("Strict-Transport-Security"),
            Some("max-age=31536000; includeSubDomains")
        );
    }

    #[test]
    fn test_custom_headers_last_write_wins_in_order() {
        let page = Page::new("x");
        let mut transport = RecordingTransport::default();
        let mut response = Response::new(&hello, &page);
        response
            .set_header("X-First", "1")
            .set_header("X-Second", "2")
            .set_header("X-First", "3");

        response.send(&HeaderList::new(), &mut transport).unwrap();

        let names = transport.header_names();
        let first = names.iter().position(|n| *n == "X-First").unwrap();
        let second = names.iter().position(|n| *n == "X-Second").unwrap();
        assert!(first < second);
        assert_eq!(*names.last().unwrap(), "X-Second");
        assert_eq!(transport.header_value("X-First"), Some("3"));
    }

    #[test]
    fn test_custom_header_overrides_builtin() {
        let page = Page::new("x");
        let mut transport = RecordingTransport::default();
        let mut response = Response::new(&hello, &page);
        response.set_header("X-Frame-Options", "DENY");

        response.send(&HeaderList::new(), &mut transport).unwrap();

        assert_eq!(transport.header_value("X-Frame-Options"), Some("DENY"));
    }

    #[test]
    fn test_build_headers_order() {
        let mut page = Page::new("x");
        page.use_strict_policy()
            .enable_csp(true)
            .no_index(true)
            .no_cache(true);
        let mut response = Response::new(&hello, &page);
        response.set_header("X-Custom", "yes");
        response.render(&HeaderList::new()).unwrap();

        let names: Vec<String> = response
            .build_headers(5)
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(
            names,
            vec![
                "Content-Type",
                "Content-Length",
                "Content-Security-Policy",
                "X-Content-Type-Options",
                "X-Frame-Options",
                "X-XSS-Protection",
                "Referrer-Policy",
                "X-Robots-Tag",
                "Cache-Control",
                "Pragma",
                "Expires",
                "X-Custom",
            ]
        );
    }

    #[test]
    fn test_renderer_sees_canvas_tree() {
        let page = Page::new("x");
        let item = Node::new("item");
        item.set_prop("label", "first");
        page.canvas().add_child(&item);

        let renderer = |page: &Page| -> Fragments {
            Ok(page
                .canvas()
                .children()
                .iter()
                .filter_map(|n| n.prop("label"))
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect())
        };
        let mut response = Response::new(&renderer, &page);

        assert_eq!(response.render(&HeaderList::new()).unwrap(), b"first");
    }
}
