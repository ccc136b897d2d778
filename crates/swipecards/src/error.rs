//! Error types for swipecards.
//!
//! Interaction never fails: drags and swipes on an empty, missing or
//! exhausted source are silently ignored. Errors only arise while loading and
//! validating a [`CardStackConfig`](crate::config::CardStackConfig).

use std::path::PathBuf;

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// TOML parse error.
    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parse error.
    #[error("Invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error.
    #[error("Failed to read configuration '{}': {}", path.display(), source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file extension does not name a supported format.
    #[error("Unsupported configuration format '{}' (expected .toml or .json)", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// A field holds a value outside its valid range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl Error {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}
