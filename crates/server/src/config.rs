use std::env;

/// Site-wide settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Site name used in titles and headers (default: "pagekit")
    pub site_name: String,
    /// Locale for every page (default: "en-GB")
    pub locale: String,
    /// Send HSTS on every page (default: false)
    pub force_https: bool,
    /// URL of the client bundle the shell loads (default: none)
    pub client_bundle_url: Option<String>,
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SITE_NAME` - Site name (default: "pagekit")
    /// - `SITE_LOCALE` - Page locale (default: "en-GB")
    /// - `FORCE_HTTPS` - Any value enables HSTS (default: unset)
    /// - `CLIENT_BUNDLE_URL` - Client module script URL (default: unset)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            site_name: env::var("SITE_NAME").unwrap_or(defaults.site_name),
            locale: env::var("SITE_LOCALE").unwrap_or(defaults.locale),
            force_https: env::var("FORCE_HTTPS").is_ok(),
            client_bundle_url: env::var("CLIENT_BUNDLE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "pagekit".to_string(),
            locale: pagekit_core::DEFAULT_LOCALE.to_string(),
            force_https: false,
            client_bundle_url: None,
        }
    }
}
