//! Tests for reading configuration from the process environment.
//!
//! These mutate process-wide environment variables, so they run serially.

use std::path::PathBuf;
use std::time::Duration;

use securesocial::config::{
    ClientConfig, DEFAULT_BASE_URL, ENV_API_URL, ENV_CREDENTIALS, ENV_SINGLE_FLIGHT,
    ENV_TIMEOUT_SECS,
};
use serial_test::serial;

const ALL_VARS: [&str; 4] = [ENV_API_URL, ENV_TIMEOUT_SECS, ENV_SINGLE_FLIGHT, ENV_CREDENTIALS];

fn clear_env() {
    for var in ALL_VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();

    let config = ClientConfig::from_env();

    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.request_timeout, Duration::from_secs(30));
    assert!(!config.single_flight);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var(ENV_API_URL, "http://10.0.2.2:8080/");
    std::env::set_var(ENV_TIMEOUT_SECS, "7");
    std::env::set_var(ENV_SINGLE_FLIGHT, "1");
    std::env::set_var(ENV_CREDENTIALS, "/tmp/securesocial-test/creds.json");

    let config = ClientConfig::from_env();
    clear_env();

    assert_eq!(config.base_url, "http://10.0.2.2:8080");
    assert_eq!(config.request_timeout, Duration::from_secs(7));
    assert!(config.single_flight);
    assert_eq!(
        config.credentials_path,
        Some(PathBuf::from("/tmp/securesocial-test/creds.json"))
    );
}

#[test]
#[serial]
fn test_from_env_builder_wins() {
    clear_env();
    std::env::set_var(ENV_API_URL, "http://from-env:8080");

    let config = ClientConfig::from_env().with_base_url("http://from-code:9090");
    clear_env();

    assert_eq!(config.base_url, "http://from-code:9090");
}
