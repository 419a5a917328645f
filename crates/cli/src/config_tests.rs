// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use super::*;
use similar_asserts::assert_eq;
use tempfile::TempDir;
use yare::parameterized;

#[test]
fn test_missing_file_gives_defaults() {
    let temp = TempDir::new().unwrap();
    let config = Config::load(temp.path()).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.github.api_base, "https://api.github.com");
    assert_eq!(config.github.token_env, "GITHUB_TOKEN");
    assert_eq!(config.sync.debounce_ms, 1500);
    assert_eq!(config.sync.auto_sync_secs, 300);
    assert_eq!(config.sync.revision_probe, RevisionProbe::CachedFallback);
}

#[test]
fn test_partial_file_fills_defaults() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("config.toml"),
        "[sync]\ndebounce_ms = 250\nrevision_probe = \"strict\"\n",
    )
    .unwrap();

    let config = Config::load(temp.path()).unwrap();
    assert_eq!(config.sync.debounce_ms, 250);
    assert_eq!(config.sync.revision_probe, RevisionProbe::Strict);
    assert_eq!(config.sync.status_linger_ms, 2000);
    assert_eq!(config.github, GitHubConfig::default());
}

#[test]
fn test_save_and_load() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("nested");
    let mut config = Config::default();
    config.github.api_base = "http://127.0.0.1:8080".to_string();
    config.github.token_env = "DEVHUB_TOKEN".to_string();
    config.save(&dir).unwrap();

    assert_eq!(Config::load(&dir).unwrap(), config);
}

#[test]
fn test_to_toml_has_both_tables() {
    let text = Config::default().to_toml().unwrap();
    assert!(text.contains("[github]"));
    assert!(text.contains("[sync]"));
    assert!(text.contains("revision_probe = \"cached-fallback\""));
}

#[parameterized(
    syntax = { "[sync\n" },
    wrong_type = { "[sync]\ndebounce_ms = \"soon\"\n" },
    unknown_probe = { "[sync]\nrevision_probe = \"sometimes\"\n" },
)]
fn test_invalid_file_is_error(content: &str) {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.toml"), content).unwrap();
    assert!(matches!(Config::load(temp.path()), Err(Error::Toml(_))));
}

#[parameterized(
    empty_api_base = { "[github]\napi_base = \"\"\n", "api_base" },
    empty_token_env = { "[github]\ntoken_env = \" \"\n", "token_env" },
    zero_auto_sync = { "[sync]\nauto_sync_secs = 0\n", "auto_sync_secs" },
)]
fn test_invalid_values_rejected(content: &str, field: &str) {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("config.toml"), content).unwrap();
    match Config::load(temp.path()) {
        Err(Error::Config(message)) => assert!(message.contains(field), "{message}"),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_http_config_trims_trailing_slash() {
    let mut config = Config::default();
    config.github.api_base = "http://localhost:9000/".to_string();
    config.github.timeout_secs = 5;

    let http = config.http_config();
    assert_eq!(http.api_base, "http://localhost:9000");
    assert_eq!(http.timeout, Duration::from_secs(5));
    assert!(http.user_agent.starts_with("devhub/"));
}

#[test]
fn test_session_options_from_sync_table() {
    let options = Config::default().session_options();
    assert_eq!(options.debounce, Duration::from_millis(1500));
    assert_eq!(options.auto_sync, Duration::from_secs(300));
    assert_eq!(options.status_linger, Duration::from_millis(2000));
    assert_eq!(options.error_linger, Duration::from_secs(10));
    assert_eq!(options.repo_init_delay, Duration::from_millis(1500));
}
