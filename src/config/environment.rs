// ABOUTME: Environment-based configuration loading for the Withings client
// ABOUTME: Reads WITHINGS_* variables with typed parsing and credential diagnostics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

use super::client::{parse_url, ClientConfig, Endpoints};
use crate::errors::{WithingsError, WithingsResult};
use crate::oauth2_client::Credentials;

/// Environment variable names
pub mod vars {
    /// Registered client id (required)
    pub const CLIENT_ID: &str = "WITHINGS_CLIENT_ID";
    /// Registered client secret (required)
    pub const CLIENT_SECRET: &str = "WITHINGS_CLIENT_SECRET";
    /// Registered redirect URI (required)
    pub const REDIRECT_URI: &str = "WITHINGS_REDIRECT_URI";
    /// Comma-separated scopes
    pub const SCOPES: &str = "WITHINGS_SCOPES";
    /// Whole-exchange timeout in seconds
    pub const TIMEOUT_SECS: &str = "WITHINGS_TIMEOUT_SECS";
    /// Capture raw bodies on endpoint responses
    pub const SAVE_RAW_RESPONSE: &str = "WITHINGS_SAVE_RAW_RESPONSE";
    /// Capture request URLs on endpoint responses
    pub const INCLUDE_PATH: &str = "WITHINGS_INCLUDE_PATH";
    /// Refresh leeway in seconds
    pub const REFRESH_LEEWAY_SECS: &str = "WITHINGS_REFRESH_LEEWAY_SECS";
    /// Authorization page override
    pub const AUTH_URL: &str = "WITHINGS_AUTH_URL";
    /// Token endpoint override
    pub const TOKEN_URL: &str = "WITHINGS_TOKEN_URL";
    /// API base URL override
    pub const API_BASE_URL: &str = "WITHINGS_API_BASE_URL";
}

/// Secrets shorter than this are probably truncated copies
const MIN_SECRET_LENGTH: usize = 20;

impl ClientConfig {
    /// Load configuration from `WITHINGS_*` environment variables
    ///
    /// # Errors
    ///
    /// Returns [`WithingsError::Config`] if a required variable is missing or
    /// an optional one does not parse.
    pub fn from_env() -> WithingsResult<Self> {
        let redirect_url = parse_url("redirect URI", &required_var(vars::REDIRECT_URI)?)?;
        let mut credentials = Credentials::new(
            required_var(vars::CLIENT_ID)?,
            required_var(vars::CLIENT_SECRET)?,
            redirect_url,
        );
        if let Some(scopes) = optional_var(vars::SCOPES) {
            let scopes = parse_scopes(&scopes);
            if !scopes.is_empty() {
                credentials = credentials.with_scopes(scopes);
            }
        }
        log_credential_diagnostics(&credentials);

        let mut endpoints = Endpoints::production()?;
        if let Some(url) = optional_var(vars::AUTH_URL) {
            endpoints = endpoints.with_auth_url(parse_url("auth URL", &url)?);
        }
        if let Some(url) = optional_var(vars::TOKEN_URL) {
            endpoints = endpoints.with_token_url(parse_url("token URL", &url)?);
        }
        if let Some(url) = optional_var(vars::API_BASE_URL) {
            endpoints = endpoints.with_api_base_url(parse_url("API base URL", &url)?);
        }

        let mut config = Self::from_credentials(credentials)?.with_endpoints(endpoints);
        if let Some(secs) = parse_var::<u64>(vars::TIMEOUT_SECS)? {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = parse_var::<u64>(vars::REFRESH_LEEWAY_SECS)? {
            config = config.with_refresh_leeway(Duration::from_secs(secs));
        }
        if let Some(save) = parse_var::<bool>(vars::SAVE_RAW_RESPONSE)? {
            config = config.with_save_raw_response(save);
        }
        if let Some(include) = parse_var::<bool>(vars::INCLUDE_PATH)? {
            config = config.with_include_path(include);
        }

        info!(
            timeout_secs = config.timeout.as_secs(),
            save_raw_response = config.save_raw_response,
            include_path = config.include_path,
            api_base_url = %config.endpoints.api_base_url,
            "Loaded Withings client configuration from environment"
        );
        Ok(config)
    }
}

/// Parse comma-separated scopes
#[must_use]
pub fn parse_scopes(scopes_str: &str) -> Vec<String> {
    scopes_str
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

fn log_credential_diagnostics(credentials: &Credentials) {
    let secret_length = credentials.client_secret().len();
    info!(
        "Withings credentials: client_id={}, secret_length={secret_length}, \
         secret_fingerprint={}",
        credentials.client_id(),
        credentials.secret_fingerprint()
    );
    if secret_length < MIN_SECRET_LENGTH {
        warn!(
            "Withings client_secret is unusually short ({secret_length} chars) - \
             this may indicate a configuration error"
        );
    }
}

fn required_var(key: &str) -> WithingsResult<String> {
    optional_var(key)
        .ok_or_else(|| WithingsError::Config(format!("{key} environment variable not set")))
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T>(key: &str) -> WithingsResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    optional_var(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| WithingsError::Config(format!("invalid {key} '{raw}': {e}")))
        })
        .transpose()
}
