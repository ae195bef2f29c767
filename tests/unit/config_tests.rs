// Configuration loading tests

use std::io::Write;

use imgproxy_uri::config::{Config, SourceLoader};
use imgproxy_uri::uri::sign_path;
use imgproxy_uri::ConfigError;

#[test]
fn test_hex_keys_drive_signing() {
    // "secret" / "hello"
    let yaml = r#"
imgproxy:
  api_endpoint: https://imgproxy.example/
  signature: true
  signature_key: "736563726574"
  signature_salt: "68656c6c6f"
"#;
    let config = Config::from_yaml_with_env(yaml).unwrap();
    config.validate().unwrap();

    let endpoint = config.imgproxy.endpoint_config().unwrap();
    assert_eq!(endpoint.endpoint(), "https://imgproxy.example");

    let signature = sign_path(
        endpoint.signing().unwrap(),
        "/rs:fit:300:300/plain/http://img.example.com/pretty/image.jpg",
    )
    .unwrap();
    assert_eq!(signature, "vZ6TInXHD_gdx-w5FK0bcxhSYxKd-2GkBizoDIGgzSU");
}

#[test]
fn test_config_file_with_env_substitution() {
    std::env::set_var("IMGPROXY_URI_IT_SOURCE", "https://www.example.com");

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
imgproxy:
  api_endpoint: https://imgproxy.example
  source_loader: uri
  source_uri: ${{IMGPROXY_URI_IT_SOURCE}}
"#
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.imgproxy.source_loader, SourceLoader::Uri);
    assert_eq!(
        config.imgproxy.source_uri.as_deref(),
        Some("https://www.example.com")
    );
}

#[test]
fn test_unknown_source_loader_rejected() {
    let yaml = r#"
imgproxy:
  api_endpoint: https://imgproxy.example
  source_loader: ftp
"#;
    assert!(matches!(
        Config::from_yaml_with_env(yaml),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_encryption_flag_without_key_rejected() {
    let yaml = r#"
imgproxy:
  api_endpoint: https://imgproxy.example
  encryption: true
"#;
    let config = Config::from_yaml_with_env(yaml).unwrap();
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
}
