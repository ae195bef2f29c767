//! Host-provided processing task
//!
//! Plain immutable values handed in by the host. The image service only
//! reads them.

use crate::directive::{ProcessingConfiguration, SourceMetadata};

/// Storage the source file lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Storage {
    /// Whether files in this storage are reachable from the public web
    pub public: bool,
}

impl Storage {
    pub fn public() -> Self {
        Self { public: true }
    }

    pub fn private() -> Self {
        Self { public: false }
    }
}

/// The stored asset a task operates on
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFile {
    /// Storage-relative identifier, e.g. `/user_upload/a.jpg`
    pub identifier: String,
    /// Public URL, absolute or relative to the site root
    pub public_url: Option<String>,
    /// File extension without the dot
    pub extension: String,
    pub mime_type: String,
    /// SHA-1 of the file contents (hex)
    pub sha1: Option<String>,
    /// Width in pixels, 0 when unknown
    pub width: u32,
    /// Height in pixels, 0 when unknown
    pub height: u32,
    pub storage: Option<Storage>,
}

impl SourceFile {
    pub fn new(identifier: impl Into<String>, mime_type: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let extension = identifier
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .unwrap_or_default();

        Self {
            identifier,
            extension,
            mime_type: mime_type.into(),
            ..Default::default()
        }
    }

    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = Some(url.into());
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_sha1(mut self, sha1: impl Into<String>) -> Self {
        self.sha1 = Some(sha1.into());
        self
    }

    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// A file without storage is treated as non-public
    pub fn is_public(&self) -> bool {
        self.storage.is_some_and(|s| s.public)
    }

    pub fn metadata(&self) -> SourceMetadata {
        SourceMetadata {
            width: self.width,
            height: self.height,
            sha1: self.sha1.clone(),
        }
    }
}

/// One processing request from the host
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingTask {
    /// Task name, e.g. `Preview` or `CropScaleMask`
    pub name: String,
    pub source_file: SourceFile,
    pub configuration: ProcessingConfiguration,
}

impl ProcessingTask {
    pub fn new(
        name: impl Into<String>,
        source_file: SourceFile,
        configuration: ProcessingConfiguration,
    ) -> Self {
        Self {
            name: name.into(),
            source_file,
            configuration,
        }
    }
}
