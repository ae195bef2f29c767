//! imgproxy URL builder
//!
//! Accumulates processing options and a source locator, then materializes
//! the final URL:
//! ```text
//! {endpoint}/{signature|insecure}/{options...}/{source}
//! ```
//! Options are serialized in a fixed canonical order that does not depend on
//! the order in which setters were called.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

use super::encryption::encrypt_source;
use super::endpoint::EndpointConfig;
use super::signer::sign_path;
use crate::constants::{
    ENCRYPTED_SOURCE_PREFIX, GRAVITY_FOCUS_POINT, GRAVITY_TOP_LEFT, INSECURE_SIGNATURE,
};
use crate::directive::{DirectiveOption, Gravity, ProcessingDirective, ResizeType};
use crate::error::UriError;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Crop {
    width: u32,
    height: u32,
    gravity: Gravity,
}

/// Request-scoped URL builder bound to a shared endpoint configuration
///
/// Setters overwrite; calling one twice keeps only the last value.
#[derive(Debug, Clone)]
pub struct ImgProxyUri<'a> {
    endpoint: &'a EndpointConfig,
    source: Option<String>,
    resize_type: Option<ResizeType>,
    width: Option<u32>,
    height: Option<u32>,
    min_width: Option<u32>,
    min_height: Option<u32>,
    gravity: Option<Gravity>,
    crop: Option<Crop>,
    dpr: Option<f64>,
    hash: Option<String>,
}

impl<'a> ImgProxyUri<'a> {
    pub fn new(endpoint: &'a EndpointConfig) -> Self {
        Self {
            endpoint,
            source: None,
            resize_type: None,
            width: None,
            height: None,
            min_width: None,
            min_height: None,
            gravity: None,
            crop: None,
            dpr: None,
            hash: None,
        }
    }

    /// Set the absolute URL of the upstream asset
    pub fn set_source(&mut self, source: impl Into<String>) -> &mut Self {
        self.source = Some(source.into());
        self
    }

    pub fn set_type(&mut self, resize_type: ResizeType) -> &mut Self {
        self.resize_type = Some(resize_type);
        self
    }

    pub fn set_width(&mut self, width: u32) -> &mut Self {
        self.width = Some(width);
        self
    }

    pub fn set_min_width(&mut self, min_width: u32) -> &mut Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn set_height(&mut self, height: u32) -> &mut Self {
        self.height = Some(height);
        self
    }

    pub fn set_min_height(&mut self, min_height: u32) -> &mut Self {
        self.min_height = Some(min_height);
        self
    }

    pub fn set_crop(&mut self, width: u32, height: u32, gravity: Gravity) -> &mut Self {
        self.crop = Some(Crop {
            width,
            height,
            gravity,
        });
        self
    }

    pub fn set_gravity(&mut self, gravity: Gravity) -> &mut Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn set_device_pixel_ratio(&mut self, dpr: f64) -> &mut Self {
        self.dpr = Some(dpr);
        self
    }

    /// Attach the source fingerprint. Metadata only; not part of the path.
    pub fn set_hash(&mut self, hash: impl Into<String>) -> &mut Self {
        self.hash = Some(hash.into());
        self
    }

    /// Feed every option of a directive through the matching setter
    pub fn apply(&mut self, directive: &ProcessingDirective) -> &mut Self {
        for option in directive.iter() {
            match *option {
                DirectiveOption::ResizeType { value } => self.set_type(value),
                DirectiveOption::Width { value } => self.set_width(value),
                DirectiveOption::Height { value } => self.set_height(value),
                DirectiveOption::MinWidth { value } => self.set_min_width(value),
                DirectiveOption::MinHeight { value } => self.set_min_height(value),
                DirectiveOption::Crop {
                    width,
                    height,
                    gravity,
                } => self.set_crop(width, height, gravity),
                DirectiveOption::Gravity { value } => self.set_gravity(value),
                DirectiveOption::Dpr { value } => self.set_device_pixel_ratio(value),
            };
        }
        if let Some(hash) = directive.hash() {
            self.set_hash(hash);
        }
        self
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Processing options joined with `/`, in canonical order
    pub fn options_path(&self) -> String {
        let mut segments = Vec::new();

        if let Some(resize_type) = self.resize_type {
            segments.push(format!("rt:{}", resize_type));
        }

        if self.width.is_some() || self.height.is_some() {
            segments.push(format!(
                "s:{}:{}",
                self.width.unwrap_or(0),
                self.height.unwrap_or(0)
            ));
        }

        if let Some(min_width) = self.min_width {
            segments.push(format!("mw:{}", min_width));
        }

        if let Some(min_height) = self.min_height {
            segments.push(format!("mh:{}", min_height));
        }

        if let Some(gravity) = &self.gravity {
            segments.push(format!("g:{}", gravity_args(gravity)));
        }

        if let Some(crop) = &self.crop {
            segments.push(format!(
                "c:{}:{}:{}",
                crop.width,
                crop.height,
                gravity_args(&crop.gravity)
            ));
        }

        if let Some(dpr) = self.dpr {
            segments.push(format!("dpr:{}", dpr));
        }

        segments.join("/")
    }

    /// Source segment: encrypted when a key is configured, plain base64url otherwise
    pub fn source_segment(&self) -> Result<String, UriError> {
        let source = self.source.as_deref().ok_or(UriError::MissingSource)?;

        match self.endpoint.encryption_key() {
            Some(key) => Ok(format!(
                "{}/{}",
                ENCRYPTED_SOURCE_PREFIX,
                encrypt_source(key, source)?
            )),
            None => Ok(URL_SAFE_NO_PAD.encode(source.as_bytes())),
        }
    }

    /// Unsigned path, starting with `/`; this is what the signature covers
    pub fn path(&self) -> Result<String, UriError> {
        let source = self.source_segment()?;
        let options = self.options_path();

        if options.is_empty() {
            Ok(format!("/{}", source))
        } else {
            Ok(format!("/{}/{}", options, source))
        }
    }

    /// Materialize the final URL.
    ///
    /// Never mutates the builder. Without encryption the output is
    /// deterministic; with encryption every call uses a fresh nonce.
    pub fn build(&self) -> Result<String, UriError> {
        let path = self.path()?;

        let signature = match self.endpoint.signing() {
            Some(signing) => sign_path(signing, &path)?,
            None => INSECURE_SIGNATURE.to_string(),
        };

        tracing::debug!(
            signed = self.endpoint.is_signing_enabled(),
            encrypted = self.endpoint.is_encryption_enabled(),
            options = %self.options_path(),
            "Built imgproxy URL"
        );

        Ok(format!("{}/{}{}", self.endpoint.endpoint(), signature, path))
    }
}

fn gravity_args(gravity: &Gravity) -> String {
    match gravity {
        Gravity::TopLeft { x, y } => format!("{}:{}:{}", GRAVITY_TOP_LEFT, x, y),
        Gravity::FocusPoint { x, y } => format!("{}:{}:{}", GRAVITY_FOCUS_POINT, x, y),
    }
}
