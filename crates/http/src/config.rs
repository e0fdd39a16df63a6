use std::env;

use crate::encoding::clamp_level;

pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Response pipeline settings, usually loaded once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseConfig {
    /// Compress bodies when the client accepts it (default: true)
    pub compression: bool,
    /// gzip level, always within 1..=9 (default: 6)
    pub compression_level: u32,
    /// Encodings this server is willing to use (default: ["gzip"])
    pub encodings: Vec<String>,
}

impl ResponseConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PAGEKIT_COMPRESSION` - `true`/`false`, `1`/`0`, `on`/`off` (default: true)
    /// - `PAGEKIT_COMPRESSION_LEVEL` - gzip level, clamped to 1..=9 (default: 6)
    /// - `PAGEKIT_ENCODINGS` - comma-separated list (default: "gzip")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let compression = lookup("PAGEKIT_COMPRESSION")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.compression);

        let compression_level = lookup("PAGEKIT_COMPRESSION_LEVEL")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(clamp_level)
            .unwrap_or(defaults.compression_level);

        let encodings = lookup("PAGEKIT_ENCODINGS")
            .map(|v| {
                v.split(',')
                    .map(|e| e.trim().to_ascii_lowercase())
                    .filter(|e| !e.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.encodings);

        Self {
            compression,
            compression_level,
            encodings,
        }
    }
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            compression: true,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            encodings: vec!["gzip".to_string()],
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
