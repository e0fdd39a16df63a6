//! Shared application state.
//!
//! Only immutable configuration lives here. Every request builds and drops
//! its own page tree.

use std::sync::Arc;

use pagekit_core::SpaShellRenderer;
use pagekit_http::ResponseConfig;

use crate::config::SiteConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub site: Arc<SiteConfig>,
    pub response_config: Arc<ResponseConfig>,
    pub renderer: Arc<SpaShellRenderer>,
}

impl AppState {
    pub fn new(site: SiteConfig, response_config: ResponseConfig) -> Self {
        let mut renderer = SpaShellRenderer::new();
        if let Some(url) = &site.client_bundle_url {
            renderer = renderer.with_client_bundle(url.clone());
        }

        Self {
            site: Arc::new(site),
            response_config: Arc::new(response_config),
            renderer: Arc::new(renderer),
        }
    }

    pub fn from_env() -> Self {
        Self::new(SiteConfig::from_env(), ResponseConfig::from_env())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SiteConfig::default(), ResponseConfig::default())
    }
}
