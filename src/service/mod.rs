//! Image services
//!
//! A host pipeline holds several interchangeable processing backends and
//! asks each, via [`ImageService::can_process_task`], whether it handles a
//! given task. A negative answer is not an error: the host falls back to
//! another backend.

pub mod dimension;
pub mod imgproxy;
pub mod source;
pub mod task;

use serde::Serialize;

use crate::error::ServiceError;

pub use dimension::ImageDimension;
pub use imgproxy::ImgProxyImageService;
pub use source::{
    resolver_for, LocalSourceResolver, OnlineMediaHelper, SourceResolver, UriSourceResolver,
};
pub use task::{ProcessingTask, SourceFile, Storage};

/// Final URL paired with the output dimensions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageServiceResult {
    pub url: String,
    pub dimension: ImageDimension,
    /// Source fingerprint, usable as a cache key or ETag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// A processing backend the host can select per task
pub trait ImageService: Send + Sync {
    fn identifier(&self) -> &'static str;

    /// Whether the service was configured with a usable endpoint
    fn has_configuration(&self) -> bool;

    fn supported_mime_types(&self) -> Vec<&'static str>;

    /// Eligibility check; never fails
    fn can_process_task(&self, task: &ProcessingTask) -> bool;

    fn process_task(&self, task: &ProcessingTask) -> Result<ImageServiceResult, ServiceError>;
}

/// First service in `services` that accepts the task
pub fn select_service<'a>(
    services: &'a [Box<dyn ImageService>],
    task: &ProcessingTask,
) -> Option<&'a dyn ImageService> {
    services
        .iter()
        .map(|service| service.as_ref())
        .find(|service| service.can_process_task(task))
}
