//! HTTP Response Pipeline - Imperative Shell.
//!
//! This crate turns a [`pagekit_core::Page`] into an HTTP exchange using a
//! [`pagekit_core::Renderer`]: fragments are joined, compressed when the
//! client accepts it, and emitted with headers derived from the page's
//! flags and CSP policy.
//!
//! # Architecture
//!
//! - **Functional Core** (`pagekit_core`): node tree, page model, renderers
//! - **Imperative Shell** (this crate): negotiation, compression, transport
//!
//! The incoming request and outgoing exchange are injected as
//! [`RequestContext`] and [`Transport`], so nothing here touches a socket.
//!
//! # Example
//!
//! ```
//! use pagekit_core::{Page, SpaShellRenderer};
//! use pagekit_http::{HeaderList, RecordingTransport, Response};
//!
//! let mut page = Page::new("Home");
//! page.use_strict_policy().enable_csp(true).no_cache(true);
//!
//! let renderer = SpaShellRenderer::new();
//! let request = HeaderList::new().with("Accept-Encoding", "identity");
//! let mut transport = RecordingTransport::default();
//!
//! Response::new(&renderer, &page)
//!     .send(&request, &mut transport)
//!     .unwrap();
//!
//! assert_eq!(transport.status, Some(200));
//! assert_eq!(
//!     transport.header_value("Content-Security-Policy"),
//!     Some("default-src 'self'")
//! );
//! ```

#[cfg(feature = "axum")]
mod adapter;
mod config;
mod encoding;
mod error;
pub mod headers;
mod response;
mod transport;

// Re-export core types for convenience
pub use pagekit_core::{Page, Renderer};

#[cfg(feature = "axum")]
pub use adapter::AxumTransport;
pub use config::{ResponseConfig, DEFAULT_COMPRESSION_LEVEL};
pub use encoding::{clamp_level, compress, negotiate, Encoding};
pub use error::{HttpError, Result};
pub use response::Response;
pub use transport::{HeaderList, RecordingTransport, RequestContext, Transport};
