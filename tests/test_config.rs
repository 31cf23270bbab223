use std::collections::HashMap;
use std::time::Duration;

use recipe_finder::client::config::{API_KEY_VAR, BASE_URL_VAR, DEFAULT_TIMEOUT_SECS, TIMEOUT_VAR};
use recipe_finder::client::{CatalogConfig, ConfigError};
use serial_test::serial;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name: &str| vars.get(name).cloned()
}

#[test]
fn test_defaults_apply_when_only_key_is_set() {
    let config = CatalogConfig::from_lookup(lookup(&[(API_KEY_VAR, "abc")])).unwrap();

    assert_eq!(config.base_url(), "https://api.spoonacular.com");
    assert_eq!(config.api_key(), "abc");
    assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
}

#[test]
fn test_missing_key_is_rejected() {
    let err = CatalogConfig::from_lookup(lookup(&[])).unwrap_err();
    assert!(matches!(err, ConfigError::MissingApiKey));

    let err = CatalogConfig::from_lookup(lookup(&[(API_KEY_VAR, "  ")])).unwrap_err();
    assert!(matches!(err, ConfigError::MissingApiKey));
}

#[test]
fn test_base_url_and_timeout_overrides() {
    let config = CatalogConfig::from_lookup(lookup(&[
        (API_KEY_VAR, "abc"),
        (BASE_URL_VAR, "http://localhost:9000/"),
        (TIMEOUT_VAR, "3"),
    ]))
    .unwrap();

    assert_eq!(config.base_url(), "http://localhost:9000");
    assert_eq!(config.timeout(), Duration::from_secs(3));
}

#[test]
fn test_invalid_values_are_rejected() {
    let err = CatalogConfig::from_lookup(lookup(&[(API_KEY_VAR, "abc"), (BASE_URL_VAR, "not a url")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

    let err = CatalogConfig::from_lookup(lookup(&[(API_KEY_VAR, "abc"), (BASE_URL_VAR, "ftp://x.example")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));

    let err = CatalogConfig::from_lookup(lookup(&[(API_KEY_VAR, "abc"), (TIMEOUT_VAR, "ten")]))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTimeout(_)));
}

#[test]
fn test_debug_output_redacts_key() {
    let config = CatalogConfig::new("https://api.spoonacular.com/", "super-secret").unwrap();
    let debug = format!("{:?}", config);

    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("<redacted>"));
}

#[test]
#[serial]
fn test_from_env_reads_process_environment() {
    std::env::set_var(API_KEY_VAR, "from-env");
    std::env::set_var(BASE_URL_VAR, "http://127.0.0.1:4010");
    std::env::remove_var(TIMEOUT_VAR);

    let config = CatalogConfig::from_env();

    std::env::remove_var(API_KEY_VAR);
    std::env::remove_var(BASE_URL_VAR);

    let config = config.unwrap();
    assert_eq!(config.api_key(), "from-env");
    assert_eq!(config.base_url(), "http://127.0.0.1:4010");
}

#[test]
#[serial]
fn test_from_env_without_key_fails() {
    std::env::remove_var(API_KEY_VAR);
    assert!(matches!(CatalogConfig::from_env(), Err(ConfigError::MissingApiKey)));
}
