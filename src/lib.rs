// imgproxy-uri: processing directive compiler and URL signer

pub mod config;
pub mod constants;
pub mod directive;
pub mod error;
pub mod logging;
pub mod service;
pub mod uri;

pub use error::{ConfigError, ServiceError, UriError};
