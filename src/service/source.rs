//! Source locator resolution
//!
//! Turns a stored file into the absolute locator imgproxy fetches. Online
//! media (youtube, vimeo) has no stored image; for those the locally
//! generated preview is published under `source_uri` instead.

use url::Url;

use super::task::SourceFile;
use crate::config::{ImgProxyOptions, SourceLoader};
use crate::constants::{ONLINE_MEDIA_EXTENSIONS, ONLINE_MEDIA_PREVIEW_MARKER};
use crate::error::ServiceError;

/// Resolves the upstream locator for a stored file
pub trait SourceResolver: Send + Sync {
    fn resolve(&self, file: &SourceFile) -> Result<String, ServiceError>;
}

/// Resolves to the file's public URL
///
/// Relative public URLs are joined onto `base`.
#[derive(Debug, Clone, Default)]
pub struct UriSourceResolver {
    base: Option<String>,
}

impl UriSourceResolver {
    pub fn new(base: Option<String>) -> Self {
        Self {
            base: base.filter(|b| !b.is_empty()),
        }
    }
}

impl SourceResolver for UriSourceResolver {
    fn resolve(&self, file: &SourceFile) -> Result<String, ServiceError> {
        let public_url = file.public_url.as_deref().ok_or_else(|| {
            ServiceError::SourceResolution(format!("'{}' has no public URL", file.identifier))
        })?;

        if Url::parse(public_url).is_ok() {
            return Ok(public_url.to_string());
        }

        match &self.base {
            Some(base) => Ok(join_url(base, public_url)),
            None => Err(ServiceError::SourceResolution(format!(
                "public URL '{}' is relative and no source_uri is configured",
                public_url
            ))),
        }
    }
}

/// Resolves to a `local:///` locator served from imgproxy's local root
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSourceResolver;

impl SourceResolver for LocalSourceResolver {
    fn resolve(&self, file: &SourceFile) -> Result<String, ServiceError> {
        if file.identifier.is_empty() {
            return Err(ServiceError::SourceResolution(
                "file has an empty identifier".to_string(),
            ));
        }
        Ok(format!(
            "local:///{}",
            file.identifier.trim_start_matches('/')
        ))
    }
}

/// Resolver for the configured source loader
pub fn resolver_for(options: &ImgProxyOptions) -> Box<dyn SourceResolver> {
    match options.source_loader {
        SourceLoader::Uri => Box::new(UriSourceResolver::new(options.source_uri.clone())),
        SourceLoader::Local => Box::new(LocalSourceResolver),
    }
}

/// Produces the locally generated preview image for an online media file
pub trait OnlineMediaHelper: Send + Sync {
    /// Absolute filesystem path of the preview image
    fn preview_image(&self, file: &SourceFile) -> Result<String, ServiceError>;
}

pub fn is_online_media(file: &SourceFile) -> bool {
    ONLINE_MEDIA_EXTENSIONS.contains(&file.extension.as_str())
}

/// Public URL of an online media preview
///
/// The part of `preview_path` from the online-media marker onwards is
/// appended to `source_uri`; a path without the marker is appended whole.
pub fn online_media_preview_url(source_uri: &str, preview_path: &str) -> String {
    let suffix = preview_path
        .find(ONLINE_MEDIA_PREVIEW_MARKER)
        .map_or(preview_path, |index| &preview_path[index..]);
    join_url(source_uri, suffix)
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
