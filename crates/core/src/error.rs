//! Core error types (pure - no I/O variants).

use thiserror::Error;

/// Errors raised by the page model and renderers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Page serialization failed: {0}")]
    Serialization(String),

    #[error("Render failed: {0}")]
    Render(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_display() {
        assert_eq!(
            CoreError::Serialization("bad value".to_string()).to_string(),
            "Page serialization failed: bad value"
        );
        assert_eq!(
            CoreError::Render("template".to_string()).to_string(),
            "Render failed: template"
        );
    }
}
