//! Error types for loading configuration files.
//!
//! Only two conditions abort a load on their own: a file that cannot be
//! found and an action the parser cannot apply. Everything else the parser
//! encounters is reported as a diagnostic and skipped.

use thiserror::Error;

/// Main error type for the webconfig library.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration source was created with an empty path.
    #[error("Path for configuration cannot be empty")]
    EmptyPath,

    /// A required configuration file (or a configSource target) is missing.
    #[error("Could not find configuration file: [{path}]")]
    FileNotFound { path: String },

    /// A configuration file is not well-formed XML.
    #[error("XML parsing failed for {path}: {source}")]
    XmlParse {
        path: String,
        #[source]
        source: roxmltree::Error,
    },

    /// An element name that does not map to a supported action.
    #[error("Unsupported action: [{0}]")]
    UnsupportedAction(String),

    /// A requested key is not present in the loaded configuration.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl ConfigError {
    /// Shorthand for a [`ConfigError::FileNotFound`] on the given path.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

/// Result type alias for webconfig operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
