use serial_test::serial;
use temp_env::with_vars;

use super::*;
use crate::Error;

fn cleanup_all_watch_env_vars() {
    for (key, _) in std::env::vars() {
        if key.starts_with("WATCH__") || key == "CONFIG_PATH" {
            std::env::remove_var(&key);
        }
    }
}

#[test]
#[serial]
fn default_config_should_initialize_with_hardcoded_values() {
    let config = WatchConfig::default();

    assert_eq!(config.listen.database, "projects/demo-project/databases/(default)");
    assert_eq!(config.listen.max_filter_mismatches, 10);
    assert_eq!(config.backoff.base_delay_ms, 1000);
    assert_eq!(config.backoff.max_delay_ms, 60_000);
    assert_eq!(config.network.endpoint, "https://firestore.googleapis.com");
    assert!(config.network.auth_token.is_none());
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn new_should_merge_environment_overrides() {
    cleanup_all_watch_env_vars();
    with_vars(
        vec![
            ("WATCH__LISTEN__MAX_FILTER_MISMATCHES", Some("3")),
            ("WATCH__BACKOFF__MULTIPLIER", Some("2.5")),
            ("WATCH__NETWORK__ENABLE_COMPRESSION", Some("true")),
        ],
        || {
            let config = WatchConfig::new().unwrap();

            assert_eq!(config.listen.max_filter_mismatches, 3);
            assert_eq!(config.backoff.multiplier, 2.5);
            assert!(config.network.enable_compression);
            assert_eq!(config.backoff.base_delay_ms, 1000);
        },
    );
}

#[test]
#[serial]
fn new_should_load_file_named_by_config_path() {
    cleanup_all_watch_env_vars();
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("watch.toml");
    std::fs::write(
        &config_path,
        r#"
        [listen]
        database = "projects/p1/databases/orders"

        [network]
        endpoint = "http://127.0.0.1:8080"
        "#,
    )
    .unwrap();

    with_vars(
        vec![("CONFIG_PATH", Some(config_path.to_str().unwrap()))],
        || {
            let config = WatchConfig::new().unwrap().validate().unwrap();

            assert_eq!(config.listen.database, "projects/p1/databases/orders");
            assert_eq!(config.network.endpoint, "http://127.0.0.1:8080");
        },
    );
}

#[test]
#[serial]
fn with_override_config_should_merge_file_settings_below_env() {
    cleanup_all_watch_env_vars();
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join("override.toml");
    std::fs::write(
        &config_path,
        r#"
        [backoff]
        base_delay_ms = 250
        max_delay_ms = 2000
        "#,
    )
    .unwrap();

    with_vars(vec![("WATCH__BACKOFF__MAX_DELAY_MS", Some("4000"))], || {
        let base_config = WatchConfig::new().expect("success");
        let config = base_config
            .with_override_config(config_path.to_str().unwrap())
            .unwrap();

        assert_eq!(config.backoff.base_delay_ms, 250);
        assert_eq!(config.backoff.max_delay_ms, 4000);
    });
}

#[test]
fn validation_should_reject_malformed_database() {
    let mut config = WatchConfig::default();
    config.listen.database = "projects/p1".to_string();

    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn validation_should_reject_inverted_backoff_bounds() {
    let mut config = WatchConfig::default();
    config.backoff.base_delay_ms = 5000;
    config.backoff.max_delay_ms = 100;

    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn validation_should_reject_out_of_range_jitter_and_multiplier() {
    let mut config = WatchConfig::default();
    config.backoff.jitter = 1.5;
    assert!(config.clone().validate().is_err());

    config.backoff.jitter = 0.0;
    config.backoff.multiplier = 0.5;
    assert!(config.validate().is_err());
}

#[test]
fn validation_should_reject_bad_network_params() {
    let mut config = WatchConfig::default();
    config.network.endpoint = "firestore.googleapis.com".to_string();
    assert!(config.clone().validate().is_err());

    config.network.endpoint = "http://localhost:8080".to_string();
    config.network.http2_keep_alive_timeout_in_secs = 30;
    config.network.http2_keep_alive_interval_in_secs = 30;
    assert!(config.clone().validate().is_err());

    config.network.http2_keep_alive_timeout_in_secs = 5;
    config.network.auth_token = Some("  ".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn debug_output_redacts_auth_token() {
    let mut params = ConnectionParams::default();
    params.auth_token = Some("secret-token".to_string());

    let rendered = format!("{params:?}");
    assert!(!rendered.contains("secret-token"));
    assert!(rendered.contains("<redacted>"));
}
