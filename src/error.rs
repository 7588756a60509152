//! Error types for the harness's outer surfaces.
//!
//! The wrapping pipeline itself never fails; these cover language tags,
//! configuration and request handling.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Source too large: {size} bytes (limit {limit})")]
    SourceTooLarge { size: usize, limit: usize },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_language_display() {
        let err = HarnessError::UnsupportedLanguage("rust".to_string());
        assert_eq!(format!("{err}"), "Unsupported language: rust");
    }

    #[test]
    fn test_source_too_large_display() {
        let err = HarnessError::SourceTooLarge { size: 10, limit: 5 };
        assert_eq!(format!("{err}"), "Source too large: 10 bytes (limit 5)");
    }
}
