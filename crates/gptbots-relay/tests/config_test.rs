use gptbots_relay::config::RelayConfig;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_relay_config_defaults() {
    let config = RelayConfig::default();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 3001);
    assert_eq!(config.upstream_base_url, "https://api.gptbots.ai");
    assert_eq!(config.request_timeout_secs, 60);
    assert!(!config.cors.wildcard_origin);
    assert!(config.cors.origins.iter().any(|o| o == "null"));
}

#[test]
fn test_yaml_overrides() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("relay.yml");

    fs::write(
        &config_path,
        r#"
server:
  port: 9000

upstream:
  base_url: "https://api.example.test/"
  api_key: "app-secret"

cors:
  origins:
    - "http://localhost:8080"
    - "null"
"#,
    )
    .unwrap();

    let config = RelayConfig::from_yaml_file(&config_path).unwrap();

    assert_eq!(config.port, 9000);
    assert_eq!(config.upstream_base_url, "https://api.example.test/");
    assert_eq!(config.upstream_base_url_trimmed(), "https://api.example.test");
    assert_eq!(config.api_key, "app-secret");
    assert_eq!(
        config.cors.origins,
        vec!["http://localhost:8080".to_string(), "null".to_string()]
    );

    // Sections absent from the file keep their defaults.
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.request_timeout_secs, 60);
    assert!(config.cors.allowed_methods.iter().any(|m| m == "POST"));
}

#[test]
fn test_yaml_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("does-not-exist.yml");
    assert!(RelayConfig::from_yaml_file(&config_path).is_err());
}

#[test]
fn test_yaml_malformed_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("relay.yml");
    fs::write(&config_path, "upstream: [not, a, mapping").unwrap();
    assert!(RelayConfig::from_yaml_file(&config_path).is_err());
}
