// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::ENCRYPTION_KEY_LEN;
use crate::error::{ConfigError, UriError};
use crate::logging::LoggingConfig;
use crate::uri::EndpointConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub imgproxy: ImgProxyOptions,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Strategy used to turn a stored file into a source locator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceLoader {
    /// Public URL of the file, joined onto `source_uri` when relative
    #[default]
    Uri,
    /// `local:///` locator read from imgproxy's local filesystem root
    Local,
}

/// Options recognized by the imgproxy image service
///
/// Keys and salt are hex-encoded. A key is only used while its enable flag
/// is set; an empty string counts as unset.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ImgProxyOptions {
    /// Base URL of the imgproxy instance
    #[serde(default)]
    pub api_endpoint: Option<String>,

    /// How source locators are resolved (default: uri)
    #[serde(default)]
    pub source_loader: SourceLoader,

    /// Public base URL of this site, used for relative and preview URLs
    #[serde(default)]
    pub source_uri: Option<String>,

    #[serde(default)]
    pub encryption: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encryption_key: Option<String>,

    #[serde(default)]
    pub signature: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_salt: Option<String>,

    /// Truncated signature length in bytes (0 = full digest)
    #[serde(default)]
    pub signature_size: usize,

    /// Accept `application/pdf` sources
    #[serde(default)]
    pub processing_pdf: bool,
}

impl ImgProxyOptions {
    /// Build the immutable endpoint configuration, validating it once
    pub fn endpoint_config(&self) -> Result<EndpointConfig, UriError> {
        let endpoint = self
            .api_endpoint
            .as_deref()
            .filter(|e| !e.is_empty())
            .ok_or_else(|| UriError::invalid_endpoint("", "no endpoint configured"))?;

        let mut config = EndpointConfig::new(endpoint)?;

        // An enabled feature requires all of its key material
        if self.signature {
            let key = decode_hex("signature_key", self.signature_key.as_deref())?.ok_or_else(
                || UriError::invalid_key("signature_key", "signature is enabled but no key is set"),
            )?;
            let salt = decode_hex("signature_salt", self.signature_salt.as_deref())?.ok_or_else(
                || UriError::invalid_key("signature_salt", "signature is enabled but no salt is set"),
            )?;
            config = config.with_signature(key, salt, self.signature_size);
        }

        if self.encryption {
            let key = decode_hex("encryption_key", self.encryption_key.as_deref())?
                .ok_or_else(|| {
                    UriError::invalid_key(
                        "encryption_key",
                        format!(
                            "encryption is enabled but no key is set (expected {} hex-encoded bytes)",
                            ENCRYPTION_KEY_LEN
                        ),
                    )
                })?;
            config = config.with_encryption(key)?;
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.endpoint_config()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if let Some(source_uri) = self.source_uri.as_deref().filter(|s| !s.is_empty()) {
            url::Url::parse(source_uri).map_err(|e| {
                ConfigError::Invalid(format!("source_uri '{}' is not a valid URL: {}", source_uri, e))
            })?;
        }

        Ok(())
    }
}

fn decode_hex(name: &str, value: Option<&str>) -> Result<Option<Vec<u8>>, UriError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(hex_value) => hex::decode(hex_value)
            .map(Some)
            .map_err(|e| UriError::invalid_key(name, e.to_string())),
        None => Ok(None),
    }
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, ConfigError> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        // First, check that all referenced environment variables exist
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            std::env::var(var_name).map_err(|_| ConfigError::MissingEnvVar(var_name.to_string()))?;
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        let config: Config = serde_yaml::from_str(&substituted)?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.imgproxy.validate()
    }
}
