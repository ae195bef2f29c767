//! URL signing with HMAC-SHA256
//!
//! The signature is computed as:
//! ```text
//! signature = base64url(truncate(HMAC-SHA256(key, salt + path), size))
//! ```
//! where `path` is the unsigned path starting with `/` and `size` 0 keeps
//! the full 32-byte digest.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::endpoint::SigningConfig;
use crate::error::UriError;

type HmacSha256 = Hmac<Sha256>;

/// Sign an unsigned path and return the base64url signature segment
pub fn sign_path(config: &SigningConfig, path: &str) -> Result<String, UriError> {
    let digest = compute_hmac_signature(&config.key, &config.salt, path)?;
    Ok(URL_SAFE_NO_PAD.encode(truncate(&digest, config.size)))
}

/// Check a signature segment against an unsigned path
pub fn verify_signature(
    config: &SigningConfig,
    signature: &str,
    path: &str,
) -> Result<bool, UriError> {
    let expected = sign_path(config, path)?;
    Ok(constant_time_compare(signature, &expected))
}

/// Compute HMAC-SHA256 over `salt || path`
fn compute_hmac_signature(key: &[u8], salt: &[u8], path: &str) -> Result<Vec<u8>, UriError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key)
        .map_err(|e| UriError::invalid_key("signature key", e.to_string()))?;

    mac.update(salt);
    mac.update(path.as_bytes());

    Ok(mac.finalize().into_bytes().to_vec())
}

fn truncate(digest: &[u8], size: usize) -> &[u8] {
    if size == 0 || size >= digest.len() {
        digest
    } else {
        &digest[..size]
    }
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SIGNATURE_DIGEST_LEN;

    fn signing(size: usize) -> SigningConfig {
        SigningConfig {
            key: b"secret-key".to_vec(),
            salt: b"secret-salt".to_vec(),
            size,
        }
    }

    fn decoded_len(signature: &str) -> usize {
        URL_SAFE_NO_PAD.decode(signature).unwrap().len()
    }

    #[test]
    fn test_signs_salt_then_path() {
        let config = SigningConfig {
            key: b"secret".to_vec(),
            salt: b"hello".to_vec(),
            size: 0,
        };
        let path = "/rs:fit:300:300/plain/http://img.example.com/pretty/image.jpg";

        let expected = "vZ6TInXHD_gdx-w5FK0bcxhSYxKd-2GkBizoDIGgzSU";

        assert_eq!(sign_path(&config, path).unwrap(), expected);
    }

    #[test]
    fn test_full_length_when_size_zero() {
        let sig = sign_path(&signing(0), "/rt:fit/abc").unwrap();
        assert_eq!(decoded_len(&sig), SIGNATURE_DIGEST_LEN);
    }

    #[test]
    fn test_truncated_length() {
        for size in [1, 8, 16, 31] {
            let sig = sign_path(&signing(size), "/rt:fit/abc").unwrap();
            assert_eq!(decoded_len(&sig), size);
        }
    }

    #[test]
    fn test_truncation_is_prefix_of_full_digest() {
        let full = URL_SAFE_NO_PAD
            .decode(sign_path(&signing(0), "/rt:fit/abc").unwrap())
            .unwrap();
        let short = URL_SAFE_NO_PAD
            .decode(sign_path(&signing(8), "/rt:fit/abc").unwrap())
            .unwrap();
        assert_eq!(&full[..8], short.as_slice());
    }

    #[test]
    fn test_oversized_truncation_keeps_full_digest() {
        let sig = sign_path(&signing(64), "/rt:fit/abc").unwrap();
        assert_eq!(decoded_len(&sig), SIGNATURE_DIGEST_LEN);
    }

    #[test]
    fn test_signature_depends_on_path() {
        let a = sign_path(&signing(0), "/rt:fit/abc").unwrap();
        let b = sign_path(&signing(0), "/rt:fill/abc").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_signature() {
        let config = signing(0);
        let sig = sign_path(&config, "/rt:fit/abc").unwrap();

        assert!(verify_signature(&config, &sig, "/rt:fit/abc").unwrap());
        assert!(!verify_signature(&config, &sig, "/rt:fit/abd").unwrap());
        assert!(!verify_signature(&config, "invalid-sig", "/rt:fit/abc").unwrap());
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hell"));
    }
}
