//! imgproxy image service
//!
//! Binds the directive mapper and the URL builder to a host processing task.

use super::dimension::ImageDimension;
use super::source::{
    is_online_media, online_media_preview_url, resolver_for, OnlineMediaHelper, SourceResolver,
};
use super::task::{ProcessingTask, SourceFile};
use super::{ImageService, ImageServiceResult};
use crate::config::ImgProxyOptions;
use crate::constants::{
    IMGPROXY_SERVICE_IDENTIFIER, PDF_MIME_TYPE, SUPPORTED_MIME_TYPES, SUPPORTED_TASK_NAMES,
};
use crate::directive::{map_directive, ResizeType};
use crate::error::ServiceError;
use crate::uri::{EndpointConfig, ImgProxyUri};

pub struct ImgProxyImageService {
    source: Box<dyn SourceResolver>,
    online_media: Option<Box<dyn OnlineMediaHelper>>,
    options: ImgProxyOptions,
    endpoint: Option<EndpointConfig>,
}

impl ImgProxyImageService {
    /// Create the service with an explicit source resolver.
    ///
    /// The endpoint is validated here, once. An invalid endpoint leaves the
    /// service unconfigured: [`ImageService::has_configuration`] reports
    /// `false` and no task is accepted.
    pub fn new(source: Box<dyn SourceResolver>, options: ImgProxyOptions) -> Self {
        let endpoint = match options.endpoint_config() {
            Ok(endpoint) => {
                tracing::info!(
                    endpoint = %endpoint.endpoint(),
                    signed = endpoint.is_signing_enabled(),
                    encrypted = endpoint.is_encryption_enabled(),
                    "imgproxy image service configured"
                );
                Some(endpoint)
            }
            Err(e) => {
                tracing::warn!(error = %e, "imgproxy image service is not configured");
                None
            }
        };

        Self {
            source,
            online_media: None,
            options,
            endpoint,
        }
    }

    /// Create the service with the resolver selected by `source_loader`
    pub fn from_options(options: ImgProxyOptions) -> Self {
        Self::new(resolver_for(&options), options)
    }

    pub fn with_online_media_helper(mut self, helper: Box<dyn OnlineMediaHelper>) -> Self {
        self.online_media = Some(helper);
        self
    }

    pub fn options(&self) -> &ImgProxyOptions {
        &self.options
    }

    pub fn endpoint(&self) -> Option<&EndpointConfig> {
        self.endpoint.as_ref()
    }

    fn resolve_source(&self, file: &SourceFile) -> Result<String, ServiceError> {
        if !is_online_media(file) {
            return self.source.resolve(file);
        }

        let helper = self.online_media.as_ref().ok_or_else(|| {
            ServiceError::SourceResolution(format!(
                "no online media helper for '{}'",
                file.extension
            ))
        })?;
        let source_uri = self
            .options
            .source_uri
            .as_deref()
            .filter(|uri| !uri.is_empty())
            .ok_or_else(|| {
                ServiceError::SourceResolution(
                    "source_uri is required for online media previews".to_string(),
                )
            })?;

        let preview = helper.preview_image(file)?;
        Ok(online_media_preview_url(source_uri, &preview))
    }
}

impl ImageService for ImgProxyImageService {
    fn identifier(&self) -> &'static str {
        IMGPROXY_SERVICE_IDENTIFIER
    }

    fn has_configuration(&self) -> bool {
        self.endpoint.is_some()
    }

    fn supported_mime_types(&self) -> Vec<&'static str> {
        let mut mime_types = SUPPORTED_MIME_TYPES.to_vec();
        if self.options.processing_pdf {
            mime_types.push(PDF_MIME_TYPE);
        }
        mime_types
    }

    fn can_process_task(&self, task: &ProcessingTask) -> bool {
        self.has_configuration()
            && task.source_file.is_public()
            && SUPPORTED_TASK_NAMES.contains(&task.name.as_str())
            && self
                .supported_mime_types()
                .contains(&task.source_file.mime_type.as_str())
    }

    fn process_task(&self, task: &ProcessingTask) -> Result<ImageServiceResult, ServiceError> {
        let endpoint = self.endpoint.as_ref().ok_or(ServiceError::NotConfigured)?;

        if !self.can_process_task(task) {
            return Err(ServiceError::Unsupported {
                task: task.name.clone(),
                mime_type: task.source_file.mime_type.clone(),
            });
        }

        let file = &task.source_file;
        let source = self.resolve_source(file)?;
        let directive = map_directive(&task.configuration, &file.metadata());

        let mut uri = ImgProxyUri::new(endpoint);
        uri.set_source(source).apply(&directive);
        let url = uri.build()?;

        let dimension = ImageDimension::from_task(
            task,
            directive.resize_type().unwrap_or(ResizeType::Force),
        );

        tracing::debug!(
            task = %task.name,
            identifier = %file.identifier,
            width = dimension.width,
            height = dimension.height,
            "Processed task with imgproxy"
        );

        Ok(ImageServiceResult {
            url,
            dimension,
            hash: directive.hash().map(str::to_string),
        })
    }
}
