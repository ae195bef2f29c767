// Logging module for structured logging using the tracing crate

use std::error::Error;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::constants::DEFAULT_LOG_FILTER;

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines for log aggregation systems
    Json,
    /// Human-readable output
    #[default]
    Pretty,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// Filter directive used when `RUST_LOG` is unset (default: info)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Initialize the tracing subscriber for structured logging
///
/// The subscriber is configured with:
/// - JSON or pretty formatting
/// - Filtering from `RUST_LOG`, falling back to the configured filter
/// - Output to stderr so that stdout carries only command output
///
/// # Errors
///
/// Returns an error if the filter does not parse or a global subscriber is
/// already installed.
///
/// # Examples
///
/// ```
/// use imgproxy_uri::logging::{init_subscriber, LoggingConfig};
///
/// init_subscriber(&LoggingConfig::default()).expect("Failed to initialize logging");
/// tracing::info!("Application started");
/// ```
pub fn init_subscriber(config: &LoggingConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
    let filter = build_filter(config)?;

    match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
    }
}

fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, Box<dyn Error + Send + Sync>> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directive = config.filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER);
    Ok(EnvFilter::try_new(directive)?)
}
