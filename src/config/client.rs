// ABOUTME: Client configuration types for the Withings API
// ABOUTME: Holds credentials, endpoint URLs, timeout, and response-capture flags
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::constants::{defaults, endpoints, AUTH_URL, TOKEN_URL};
use crate::errors::{WithingsError, WithingsResult};
use crate::oauth2_client::Credentials;

/// URLs of the three Withings surfaces the client talks to
#[allow(clippy::struct_field_names)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Authorization page the user is redirected to
    pub auth_url: Url,
    /// Token exchange endpoint
    pub token_url: Url,
    /// Base URL for data endpoints; always ends with `/`
    pub api_base_url: Url,
}

impl Endpoints {
    /// Production Withings endpoints
    ///
    /// # Errors
    ///
    /// Returns [`WithingsError::Config`] if a built-in URL fails to parse.
    pub fn production() -> WithingsResult<Self> {
        Ok(Self {
            auth_url: parse_url("auth URL", AUTH_URL)?,
            token_url: parse_url("token URL", TOKEN_URL)?,
            api_base_url: with_trailing_slash(parse_url("API base URL", endpoints::API_BASE_URL)?),
        })
    }

    /// Point every endpoint at a different host (test servers, proxies)
    #[must_use]
    pub fn with_api_base_url(mut self, url: Url) -> Self {
        self.api_base_url = with_trailing_slash(url);
        self
    }

    /// Override the token endpoint
    #[must_use]
    pub fn with_token_url(mut self, url: Url) -> Self {
        self.token_url = url;
        self
    }

    /// Override the authorization page
    #[must_use]
    pub fn with_auth_url(mut self, url: Url) -> Self {
        self.auth_url = url;
        self
    }
}

/// Withings client configuration
///
/// Credentials are shared through an `Arc` and never mutated once a client
/// is built from this configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    credentials: Arc<Credentials>,
    /// Endpoint URLs
    pub endpoints: Endpoints,
    /// Deadline for one whole exchange (refresh plus request)
    pub timeout: Duration,
    /// Attach the raw unwrapped body to every endpoint response
    pub save_raw_response: bool,
    /// Attach the full request URL to every endpoint response
    pub include_path: bool,
    /// Treat a token as expired this long before its actual expiry
    pub refresh_leeway: Duration,
}

impl ClientConfig {
    /// Create a configuration with default scopes and production endpoints
    ///
    /// # Errors
    ///
    /// Returns [`WithingsError::Config`] if `redirect_uri` is not an absolute URL.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: &str,
    ) -> WithingsResult<Self> {
        let redirect_url = parse_url("redirect URI", redirect_uri)?;
        Self::from_credentials(Credentials::new(client_id, client_secret, redirect_url))
    }

    /// Create a configuration around prepared credentials
    ///
    /// # Errors
    ///
    /// Returns [`WithingsError::Config`] if a built-in endpoint URL fails to parse.
    pub fn from_credentials(credentials: Credentials) -> WithingsResult<Self> {
        Ok(Self {
            credentials: Arc::new(credentials),
            endpoints: Endpoints::production()?,
            timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
            save_raw_response: false,
            include_path: false,
            refresh_leeway: Duration::from_secs(defaults::REFRESH_LEEWAY_SECS.unsigned_abs()),
        })
    }

    /// Shared credentials
    #[must_use]
    pub const fn credentials(&self) -> &Arc<Credentials> {
        &self.credentials
    }

    /// Replace the requested scopes
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let credentials = Credentials::clone(&self.credentials).with_scopes(scopes);
        self.credentials = Arc::new(credentials);
        self
    }

    /// Set the whole-exchange timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Capture raw response bodies on endpoint results
    #[must_use]
    pub const fn with_save_raw_response(mut self, save: bool) -> Self {
        self.save_raw_response = save;
        self
    }

    /// Capture request URLs on endpoint results
    #[must_use]
    pub const fn with_include_path(mut self, include: bool) -> Self {
        self.include_path = include;
        self
    }

    /// Refresh tokens this long before they expire
    #[must_use]
    pub const fn with_refresh_leeway(mut self, leeway: Duration) -> Self {
        self.refresh_leeway = leeway;
        self
    }

    /// Replace the endpoint URLs
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

pub(crate) fn parse_url(what: &str, value: &str) -> WithingsResult<Url> {
    Url::parse(value).map_err(|e| WithingsError::Config(format!("invalid {what} '{value}': {e}")))
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("id", "secret", "https://example.com/callback").unwrap();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.refresh_leeway, Duration::ZERO);
        assert!(!config.save_raw_response);
        assert!(!config.include_path);
        assert_eq!(
            config.endpoints.api_base_url.join("v2/measure").unwrap().as_str(),
            "https://wbsapi.withings.net/v2/measure"
        );
    }

    #[test]
    fn test_rejects_relative_redirect() {
        let err = ClientConfig::new("id", "secret", "/callback").unwrap_err();
        assert!(matches!(err, WithingsError::Config(_)));
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let endpoints = Endpoints::production()
            .unwrap()
            .with_api_base_url(Url::parse("http://localhost:8080/withings").unwrap());
        assert_eq!(
            endpoints.api_base_url.join("measure").unwrap().as_str(),
            "http://localhost:8080/withings/measure"
        );
    }

    #[test]
    fn test_with_scopes_replaces_credentials() {
        let config = ClientConfig::new("id", "secret", "https://example.com/cb")
            .unwrap()
            .with_scopes(["user.metrics"]);
        assert_eq!(config.credentials().scope_param(), "user.metrics");
    }
}
