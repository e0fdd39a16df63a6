//! axum integration: request headers as context, responses as transport.

use std::borrow::Cow;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
};
use pagekit_core::Renderer;

use crate::{
    error::{HttpError, Result},
    response::Response,
    transport::{join_values, RequestContext, Transport},
};

impl RequestContext for HeaderMap {
    fn header(&self, name: &str) -> Option<Cow<'_, str>> {
        join_values(self.get_all(name).iter().filter_map(|v| v.to_str().ok()))
    }
}

/// Transport that assembles an [`axum::response::Response`].
#[derive(Debug, Default)]
pub struct AxumTransport {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl AxumTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_response(self) -> axum::response::Response {
        let mut response = axum::response::Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl Transport for AxumTransport {
    fn write_status(&mut self, code: u16) -> Result<()> {
        self.status = StatusCode::from_u16(code).map_err(|_| HttpError::InvalidStatus(code))?;
        Ok(())
    }

    fn write_header(&mut self, name: &str, value: &str) -> Result<()> {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| HttpError::InvalidHeader {
                name: name.to_string(),
                reason: e.to_string(),
            })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| HttpError::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        self.headers.insert(header_name, header_value);
        Ok(())
    }

    fn write_body(&mut self, body: Vec<u8>) -> Result<()> {
        self.body = body;
        Ok(())
    }
}

impl<R: Renderer + ?Sized> Response<'_, R> {
    /// Sends through an [`AxumTransport`] and returns the finished response.
    pub fn into_axum(self, request: &HeaderMap) -> Result<axum::response::Response> {
        let mut transport = AxumTransport::new();
        self.send(request, &mut transport)?;
        Ok(transport.into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;
    use pagekit_core::Page;

    fn hello(_: &Page) -> pagekit_core::Result<Vec<String>> {
        Ok(vec!["hello".to_string()])
    }

    #[test]
    fn test_header_map_context() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        assert_eq!(
            RequestContext::header(&headers, "Accept-Encoding").as_deref(),
            Some("gzip")
        );
        assert_eq!(RequestContext::header(&headers, "accept"), None);
    }

    #[test]
    fn test_header_map_joins_repeated_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::ACCEPT_ENCODING, HeaderValue::from_static("identity"));
        headers.append(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip"));

        assert_eq!(
            RequestContext::header(&headers, "accept-encoding").as_deref(),
            Some("identity, gzip")
        );
    }

    #[cfg(feature = "gzip")]
    #[test]
    fn test_gzip_negotiated_from_second_header_line() {
        let mut headers = HeaderMap::new();
        headers.append(header::ACCEPT_ENCODING, HeaderValue::from_static("identity"));
        headers.append(header::ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        let page = Page::new("x");

        let http = Response::new(&hello, &page).into_axum(&headers).unwrap();

        assert_eq!(http.headers()["content-encoding"], "gzip");
    }

    #[test]
    fn test_into_axum_response() {
        let mut page = Page::new("x");
        page.no_index(true);
        let mut response = Response::new(&hello, &page);
        response.set_status(201).set_header("X-Request-Id", "abc");

        let http = response.into_axum(&HeaderMap::new()).unwrap();

        assert_eq!(http.status(), StatusCode::CREATED);
        assert_eq!(http.headers()["content-length"], "5");
        assert_eq!(http.headers()["x-robots-tag"], "noindex");
        assert_eq!(http.headers()["x-request-id"], "abc");
        assert_eq!(
            http.headers()["content-type"],
            "text/html; charset=UTF-8"
        );
    }

    #[test]
    fn test_invalid_status_rejected() {
        let page = Page::new("x");
        let mut response = Response::new(&hello, &page);
        response.set_status(1000);

        assert!(matches!(
            response.into_axum(&HeaderMap::new()),
            Err(HttpError::InvalidStatus(1000))
        ));
    }

    #[test]
    fn test_invalid_header_value_rejected() {
        let page = Page::new("x");
        let mut response = Response::new(&hello, &page);
        response.set_header("X-Bad", "line\nbreak");

        assert!(matches!(
            response.into_axum(&HeaderMap::new()),
            Err(HttpError::InvalidHeader { .. })
        ));
    }
}
