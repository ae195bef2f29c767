// Error types module

use thiserror::Error;

/// Errors raised while building an imgproxy URL
///
/// `MissingSource` is a programming error in the calling sequence; the
/// others are detected once when the endpoint is configured.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UriError {
    /// The URL was materialized before a source locator was set
    #[error("Cannot build imgproxy URL: no source set")]
    MissingSource,

    /// The endpoint is not a well-formed absolute URL
    #[error("Invalid imgproxy endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// A signing or encryption key could not be used
    #[error("Invalid {name}: {reason}")]
    InvalidKey { name: String, reason: String },

    /// Encrypting or decrypting the source locator failed
    #[error("Source encryption failed: {0}")]
    Encryption(String),
}

impl UriError {
    pub fn invalid_endpoint(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        UriError::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_key(name: impl Into<String>, reason: impl Into<String>) -> Self {
        UriError::InvalidKey {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by an image service while processing a task
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service has no usable endpoint configuration
    #[error("Image service is not configured")]
    NotConfigured,

    /// The task does not match the service's capabilities
    #[error("Task '{task}' with MIME type '{mime_type}' is not supported")]
    Unsupported { task: String, mime_type: String },

    /// The source locator for the file could not be resolved
    #[error("Source resolution failed: {0}")]
    SourceResolution(String),

    #[error(transparent)]
    Uri(#[from] UriError),
}

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Environment variable '{0}' is referenced but not set")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
