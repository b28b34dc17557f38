//! Configuration layering tests.
//!
//! Environment variables are process-global, so these run serialized.

use manualchat::config::AppConfig;
use serial_test::serial;
use std::env;
use std::io::Write;

fn clear_env_vars() {
    // SAFETY: tests in this file are #[serial]; no other thread touches the
    // environment while they run.
    unsafe {
        env::remove_var("MANUALCHAT_SERVER__PORT");
        env::remove_var("MANUALCHAT_BACKEND__BASE_URL");
        env::remove_var("MANUALCHAT_BACKEND__STREAMING");
        env::remove_var("CONFIG_FILE");
    }
}

#[test]
#[serial]
fn test_default_config() {
    clear_env_vars();

    let config = AppConfig::load_from_args(["manualchat"]).expect("defaults should load");
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.backend.base_url, "http://127.0.0.1:8000");
    assert!(config.backend.streaming);
    assert_eq!(config.session.timeout_secs, 30 * 60);
}

#[test]
#[serial]
fn test_env_override() {
    clear_env_vars();
    // SAFETY: serialized test, see clear_env_vars.
    unsafe {
        env::set_var("MANUALCHAT_SERVER__PORT", "9090");
        env::set_var("MANUALCHAT_BACKEND__STREAMING", "false");
    }

    let config = AppConfig::load_from_args(["manualchat"]).expect("env overrides should load");
    assert_eq!(config.server.port, 9090);
    assert!(!config.backend.streaming);

    clear_env_vars();
}

#[test]
#[serial]
fn test_file_load() {
    clear_env_vars();

    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("temp config file");
    writeln!(
        file,
        "server:\n  port: 7070\nbackend:\n  base_url: http://manuals:9000"
    )
    .expect("write temp config");

    let path = file.path().to_str().unwrap().to_string();
    let config = AppConfig::load_from_args(["manualchat", "--config", path.as_str()])
        .expect("file config should load");
    assert_eq!(config.server.port, 7070);
    assert_eq!(config.backend.base_url, "http://manuals:9000");
}

#[test]
#[serial]
fn test_cli_beats_env() {
    clear_env_vars();
    // SAFETY: serialized test, see clear_env_vars.
    unsafe {
        env::set_var("MANUALCHAT_SERVER__PORT", "9090");
    }

    let config = AppConfig::load_from_args(["manualchat", "--port", "6061"])
        .expect("cli override should load");
    assert_eq!(config.server.port, 6061);

    clear_env_vars();
}
