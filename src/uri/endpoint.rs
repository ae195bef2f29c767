//! Endpoint configuration
//!
//! Immutable settings shared by every URL built against one imgproxy
//! instance. Validated once, read-only afterwards, safe to share across
//! threads.

use std::fmt;

use url::Url;

use crate::constants::ENCRYPTION_KEY_LEN;
use crate::error::UriError;

/// HMAC signing material
#[derive(Clone, PartialEq, Eq)]
pub struct SigningConfig {
    pub key: Vec<u8>,
    pub salt: Vec<u8>,
    /// Number of leading digest bytes kept; 0 keeps the full digest
    pub size: usize,
}

/// Remote proxy endpoint plus optional signing and encryption
#[derive(Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    endpoint: String,
    signing: Option<SigningConfig>,
    encryption_key: Option<Vec<u8>>,
}

impl EndpointConfig {
    /// Create an insecure, unencrypted endpoint configuration.
    ///
    /// Fails unless `endpoint` is a well-formed absolute URL that can carry a
    /// path (`https://imgproxy.example`, not `mailto:x` or `/relative`) and
    /// has no query string or fragment.
    pub fn new(endpoint: &str) -> Result<Self, UriError> {
        let parsed =
            Url::parse(endpoint).map_err(|e| UriError::invalid_endpoint(endpoint, e.to_string()))?;

        if parsed.cannot_be_a_base() || !parsed.has_host() {
            return Err(UriError::invalid_endpoint(
                endpoint,
                "endpoint must be an absolute URL with a host",
            ));
        }

        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(UriError::invalid_endpoint(
                endpoint,
                "endpoint must not carry a query string or fragment",
            ));
        }

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            signing: None,
            encryption_key: None,
        })
    }

    /// Enable signing. Signing stays off unless both key and salt are non-empty.
    pub fn with_signature(
        mut self,
        key: impl Into<Vec<u8>>,
        salt: impl Into<Vec<u8>>,
        size: usize,
    ) -> Self {
        let key = key.into();
        let salt = salt.into();
        self.signing = if key.is_empty() || salt.is_empty() {
            None
        } else {
            Some(SigningConfig { key, salt, size })
        };
        self
    }

    /// Enable source encryption with an AES-256 key. An empty key disables it.
    pub fn with_encryption(mut self, key: impl Into<Vec<u8>>) -> Result<Self, UriError> {
        let key = key.into();
        if key.is_empty() {
            self.encryption_key = None;
            return Ok(self);
        }
        if key.len() != ENCRYPTION_KEY_LEN {
            return Err(UriError::invalid_key(
                "encryption key",
                format!(
                    "expected {} bytes, got {}",
                    ENCRYPTION_KEY_LEN,
                    key.len()
                ),
            ));
        }
        self.encryption_key = Some(key);
        Ok(self)
    }

    /// Endpoint without a trailing slash
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn signing(&self) -> Option<&SigningConfig> {
        self.signing.as_ref()
    }

    pub fn encryption_key(&self) -> Option<&[u8]> {
        self.encryption_key.as_deref()
    }

    pub fn is_signing_enabled(&self) -> bool {
        self.signing.is_some()
    }

    pub fn is_encryption_enabled(&self) -> bool {
        self.encryption_key.is_some()
    }
}

// Key material stays out of logs
impl fmt::Debug for EndpointConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointConfig")
            .field("endpoint", &self.endpoint)
            .field("signing", &self.signing)
            .field("encryption", &self.is_encryption_enabled())
            .finish()
    }
}

impl fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningConfig")
            .field("key", &"<redacted>")
            .field("salt", &"<redacted>")
            .field("size", &self.size)
            .finish()
    }
}
