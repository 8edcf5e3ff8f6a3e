// ABOUTME: Tests for loading client configuration from WITHINGS_* environment variables
// ABOUTME: Required variables, optional overrides, and typed parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use serial_test::serial;
use withings_client::config::environment::vars;
use withings_client::config::ClientConfig;
use withings_client::errors::WithingsError;

const ALL_VARS: &[&str] = &[
    vars::CLIENT_ID,
    vars::CLIENT_SECRET,
    vars::REDIRECT_URI,
    vars::SCOPES,
    vars::TIMEOUT_SECS,
    vars::SAVE_RAW_RESPONSE,
    vars::INCLUDE_PATH,
    vars::REFRESH_LEEWAY_SECS,
    vars::AUTH_URL,
    vars::TOKEN_URL,
    vars::API_BASE_URL,
];

fn reset_env() {
    for key in ALL_VARS {
        env::remove_var(key);
    }
}

fn set_required() {
    env::set_var(vars::CLIENT_ID, "client-id");
    env::set_var(vars::CLIENT_SECRET, "a-reasonably-long-client-secret");
    env::set_var(vars::REDIRECT_URI, "https://example.com/callback");
}

#[test]
#[serial]
fn test_minimal_environment_uses_defaults() {
    reset_env();
    set_required();

    let config = ClientConfig::from_env().unwrap();

    assert_eq!(config.credentials().client_id(), "client-id");
    assert_eq!(
        config.credentials().redirect_url().as_str(),
        "https://example.com/callback"
    );
    assert_eq!(
        config.credentials().scope_param(),
        "user.activity,user.metrics,user.info"
    );
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert!(!config.save_raw_response);
    assert!(!config.include_path);
    assert_eq!(
        config.endpoints.token_url.as_str(),
        "https://wbsapi.withings.net/v2/oauth2"
    );
    reset_env();
}

#[test]
#[serial]
fn test_optional_overrides() {
    reset_env();
    set_required();
    env::set_var(vars::SCOPES, "user.metrics, user.info");
    env::set_var(vars::TIMEOUT_SECS, "12");
    env::set_var(vars::SAVE_RAW_RESPONSE, "true");
    env::set_var(vars::INCLUDE_PATH, "true");
    env::set_var(vars::REFRESH_LEEWAY_SECS, "60");
    env::set_var(vars::API_BASE_URL, "http://localhost:9000/withings");

    let config = ClientConfig::from_env().unwrap();

    assert_eq!(config.credentials().scope_param(), "user.metrics,user.info");
    assert_eq!(config.timeout, Duration::from_secs(12));
    assert_eq!(config.refresh_leeway, Duration::from_secs(60));
    assert!(config.save_raw_response);
    assert!(config.include_path);
    assert_eq!(
        config.endpoints.api_base_url.as_str(),
        "http://localhost:9000/withings/"
    );
    reset_env();
}

#[test]
#[serial]
fn test_missing_required_variable() {
    reset_env();
    set_required();
    env::remove_var(vars::CLIENT_SECRET);

    let err = ClientConfig::from_env().unwrap_err();
    match err {
        WithingsError::Config(message) => assert!(message.contains(vars::CLIENT_SECRET)),
        other => panic!("expected config error, got {other:?}"),
    }
    reset_env();
}

#[test]
#[serial]
fn test_unparseable_values_are_rejected() {
    reset_env();
    set_required();
    env::set_var(vars::TIMEOUT_SECS, "five");
    assert!(matches!(
        ClientConfig::from_env().unwrap_err(),
        WithingsError::Config(_)
    ));

    env::set_var(vars::TIMEOUT_SECS, "5");
    env::set_var(vars::REDIRECT_URI, "not a url");
    assert!(matches!(
        ClientConfig::from_env().unwrap_err(),
        WithingsError::Config(_)
    ));
    reset_env();
}
