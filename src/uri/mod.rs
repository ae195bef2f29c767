//! imgproxy URL construction
//!
//! Serializes a [`ProcessingDirective`](crate::directive::ProcessingDirective)
//! and a source locator into imgproxy's path grammar:
//!
//! ```text
//! https://imgproxy.example/{signature}/rt:fit/s:300:0/aHR0cHM6Ly9jZG4uZXhhbXBsZS9hLmpwZw
//! ```
//!
//! # Security
//!
//! When signing is configured the signature segment is an HMAC-SHA256 over
//! `salt || path`; otherwise the literal `insecure` is used. When an
//! encryption key is configured the source is sealed with AES-256-GCM and
//! emitted as `enc/{payload}`.

pub mod builder;
pub mod encryption;
pub mod endpoint;
pub mod signer;

pub use builder::ImgProxyUri;
pub use encryption::{decrypt_source, encrypt_source, encrypt_source_with_nonce};
pub use endpoint::{EndpointConfig, SigningConfig};
pub use signer::{sign_path, verify_signature};
