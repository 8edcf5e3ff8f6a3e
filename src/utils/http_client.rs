// ABOUTME: HTTP client construction for Withings API calls
// ABOUTME: Builds reqwest clients with explicit timeouts; no process-wide client is kept
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::constants::defaults;
use crate::errors::{WithingsError, WithingsResult};

/// Create a new HTTP client with the given timeouts
///
/// The request timeout is a backstop; the session applies its own deadline
/// to the whole refresh-plus-request exchange.
///
/// # Errors
///
/// Returns [`WithingsError::Config`] if the TLS backend cannot be initialized.
pub fn create_client_with_timeout(
    timeout: Duration,
    connect_timeout: Duration,
) -> WithingsResult<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .user_agent(concat!("withings-client/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| WithingsError::Config(format!("failed to build HTTP client: {e}")))
}

/// Create an HTTP client with the default connect timeout
///
/// # Errors
///
/// Returns [`WithingsError::Config`] if the TLS backend cannot be initialized.
pub fn api_client(timeout: Duration) -> WithingsResult<Client> {
    create_client_with_timeout(timeout, Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS))
}
