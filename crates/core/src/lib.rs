//! Pure page model - no I/O, no HTTP, no side effects.
//!
//! This crate provides:
//! - A mutable node tree ([`Node`]) with parent/child link maintenance
//! - The document root ([`Canvas`]) carrying a template identifier
//! - Page metadata, SEO tags, CSP policy and behavior flags ([`Page`])
//! - The [`Renderer`] contract and a reference SPA shell renderer
//! - Serializable snapshots used as hydration payloads
//!
//! # Example
//!
//! ```
//! use pagekit_core::{Node, Page, PageFlags};
//!
//! let mut page = Page::new("Dashboard");
//!
//! let header = Node::new("header");
//! header.set_prop("title", "Welcome");
//! page.canvas().add_child(&header);
//!
//! page.use_strict_policy()
//!     .allow_script_from(["https://cdn.example.com"])
//!     .enable_csp(true)
//!     .no_index(true);
//!
//! assert!(page.flags().contains(PageFlags::NO_INDEX));
//! assert_eq!(
//!     page.csp().header_value(),
//!     "default-src 'self'; script-src https://cdn.example.com"
//! );
//!
//! let state = page.to_value().unwrap();
//! assert_eq!(state["canvas"]["children"][0]["name"], "header");
//! ```

mod canvas;
pub mod csp;
mod error;
mod flags;
mod node;
mod page;
pub mod render;

pub use canvas::{Canvas, CanvasSnapshot, CANVAS_NODE_NAME};
pub use csp::{CspPolicy, CspValue};
pub use error::{CoreError, Result};
pub use flags::PageFlags;
pub use node::{Node, NodeSnapshot, Props};
pub use page::{Page, PageSnapshot, DEFAULT_CHARSET, DEFAULT_LOCALE, DEFAULT_TEMPLATE};
pub use render::{Renderer, SpaShellRenderer};
