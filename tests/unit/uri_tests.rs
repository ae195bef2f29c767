// URL builder tests through the public API

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use imgproxy_uri::directive::*;
use imgproxy_uri::uri::*;
use imgproxy_uri::UriError;

const SOURCE: &str = "https://cdn.example/a.jpg";

fn endpoint() -> EndpointConfig {
    EndpointConfig::new("https://imgproxy.example").unwrap()
}

fn directive() -> ProcessingDirective {
    let config = ProcessingConfiguration {
        width: Some(SizeValue::exact(300)),
        height: Some(SizeValue::marker_only(SizeMarker::Maximum)),
        ..Default::default()
    };
    map_directive(&config, &SourceMetadata::default())
}

fn split_signature<'a>(url: &'a str, path: &str) -> &'a str {
    url.strip_prefix("https://imgproxy.example/")
        .and_then(|rest| rest.strip_suffix(path))
        .unwrap()
}

#[test]
fn test_end_to_end_insecure() {
    let endpoint = endpoint();
    let mut uri = ImgProxyUri::new(&endpoint);
    uri.set_source(SOURCE).apply(&directive());

    assert_eq!(
        uri.build().unwrap(),
        "https://imgproxy.example/insecure/rt:fit/s:300:0/aHR0cHM6Ly9jZG4uZXhhbXBsZS9hLmpwZw"
    );
}

#[test]
fn test_missing_source_is_an_error() {
    let endpoint = endpoint();
    let mut uri = ImgProxyUri::new(&endpoint);
    uri.apply(&directive());

    assert_eq!(uri.build(), Err(UriError::MissingSource));
}

#[test]
fn test_signature_truncation() {
    for (size, expected_len) in [(0usize, 32usize), (4, 4), (8, 8), (32, 32)] {
        let endpoint = endpoint().with_signature(b"key".to_vec(), b"salt".to_vec(), size);
        let mut uri = ImgProxyUri::new(&endpoint);
        uri.set_source(SOURCE).apply(&directive());

        let url = uri.build().unwrap();
        let path = uri.path().unwrap();
        let signature = split_signature(&url, &path);

        assert_eq!(
            URL_SAFE_NO_PAD.decode(signature).unwrap().len(),
            expected_len
        );
        assert!(verify_signature(endpoint.signing().unwrap(), signature, &path).unwrap());
    }
}

#[test]
fn test_signed_deterministic() {
    let endpoint = endpoint().with_signature(b"key".to_vec(), b"salt".to_vec(), 0);
    let build = || {
        let mut uri = ImgProxyUri::new(&endpoint);
        uri.set_source(SOURCE).apply(&directive());
        uri.build().unwrap()
    };

    assert_eq!(build(), build());
}

#[test]
fn test_encrypted_urls_differ_only_in_source() {
    let key = [0x5au8; 32];
    let endpoint = endpoint()
        .with_signature(b"key".to_vec(), b"salt".to_vec(), 0)
        .with_encryption(key.to_vec())
        .unwrap();

    let mut uri = ImgProxyUri::new(&endpoint);
    uri.set_source(SOURCE).apply(&directive());

    let first = uri.build().unwrap();
    let second = uri.build().unwrap();
    assert_ne!(first, second);

    // https: / "" / host / signature / rt / s / enc / payload
    let first_segments: Vec<&str> = first.split('/').collect();
    let second_segments: Vec<&str> = second.split('/').collect();
    assert_eq!(first_segments.len(), 8);
    assert_eq!(first_segments[4..7], second_segments[4..7]);
    assert_eq!(first_segments[4..7], ["rt:fit", "s:300:0", "enc"]);

    assert_eq!(decrypt_source(&key, first_segments[7]).unwrap(), SOURCE);
    assert_eq!(decrypt_source(&key, second_segments[7]).unwrap(), SOURCE);
}

#[test]
fn test_encryption_with_fixed_nonce_round_trip() {
    let key = [0x11u8; 32];
    let nonce = [0x22u8; 12];
    let segment = encrypt_source_with_nonce(&key, SOURCE, &nonce).unwrap();

    assert_eq!(decrypt_source(&key, &segment).unwrap(), SOURCE);
    assert_eq!(
        segment,
        encrypt_source_with_nonce(&key, SOURCE, &nonce).unwrap()
    );
}
