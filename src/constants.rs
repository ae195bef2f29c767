// Constants module - centralized default values and wire tokens
//
// This module defines the fixed tokens of the imgproxy path grammar and the
// defaults used by configuration and the image service.

// =============================================================================
// URL grammar
// =============================================================================

/// Placeholder segment used in place of a signature when signing is disabled
pub const INSECURE_SIGNATURE: &str = "insecure";

/// Path prefix marking an encrypted source segment
pub const ENCRYPTED_SOURCE_PREFIX: &str = "enc";

/// Gravity type tag for a fixed top-left anchor with pixel offsets
pub const GRAVITY_TOP_LEFT: &str = "nowe";

/// Gravity type tag for a normalized focus-point anchor
pub const GRAVITY_FOCUS_POINT: &str = "fp";

// =============================================================================
// Cryptography
// =============================================================================

/// AES-256-GCM key length in bytes
pub const ENCRYPTION_KEY_LEN: usize = 32;

/// AES-GCM nonce length in bytes (prepended to the ciphertext)
pub const ENCRYPTION_NONCE_LEN: usize = 12;

/// Full HMAC-SHA256 digest length in bytes
pub const SIGNATURE_DIGEST_LEN: usize = 32;

// =============================================================================
// Image service defaults
// =============================================================================

/// Identifier the imgproxy service registers under
pub const IMGPROXY_SERVICE_IDENTIFIER: &str = "imgproxy";

/// Task name for backend-generated previews
pub const TASK_PREVIEW: &str = "Preview";

/// Task name for crop/scale/mask processing
pub const TASK_CROP_SCALE_MASK: &str = "CropScaleMask";

/// Task names the imgproxy service accepts
pub const SUPPORTED_TASK_NAMES: &[&str] = &[TASK_PREVIEW, TASK_CROP_SCALE_MASK];

/// MIME types always accepted by the imgproxy service
pub const SUPPORTED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/png",
    "image/webp",
    "image/avif",
    "image/gif",
    "image/ico",
    "image/heic",
    "image/heif",
    "image/bmp",
    "image/tiff",
    "video/youtube",
    "video/vimeo",
];

/// MIME type added to the allow-list when PDF processing is enabled
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// File extensions of externally hosted media represented by a preview image
pub const ONLINE_MEDIA_EXTENSIONS: &[&str] = &["youtube", "vimeo"];

/// Path fragment where locally generated online-media previews live
pub const ONLINE_MEDIA_PREVIEW_MARKER: &str = "/typo3temp/assets/online_media";

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";
