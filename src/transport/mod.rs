// ABOUTME: Pluggable HTTP transport for the Withings client
// ABOUTME: Async trait over buffered http requests with a reqwest-backed implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Transport
//!
//! Every request the client makes, token exchanges included, goes through an
//! injected [`HttpTransport`]. Requests and responses carry fully buffered
//! [`Bytes`] bodies so each pipeline stage can read and replace a body
//! without re-wrapping streams.
//!
//! Stages, outermost first:
//! 1. [`authenticating::AuthenticatingTransport`] refreshes the token when
//!    needed and adds the bearer header
//! 2. [`envelope::unwrap_envelope`] strips the `{status, body}` envelope
//! 3. the inner [`HttpTransport`] does the I/O

/// Bearer-token transport with single-flight refresh
pub mod authenticating;
/// Response envelope unwrapping
pub mod envelope;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::{Request, Response};

use crate::errors::{WithingsError, WithingsResult};

pub use authenticating::AuthenticatingTransport;
pub use envelope::{into_success_body, unwrap_envelope};

/// Executes one fully buffered HTTP exchange
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and return the complete response
    ///
    /// Any HTTP status is a successful return; only failures to send or to
    /// read the response are errors.
    ///
    /// # Errors
    ///
    /// Returns [`WithingsError::Network`] on I/O failure.
    async fn execute(&self, request: Request<Bytes>) -> WithingsResult<Response<Bytes>>;
}

/// [`HttpTransport`] over a `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Wrap an existing client
    #[must_use]
    pub const fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: Request<Bytes>) -> WithingsResult<Response<Bytes>> {
        let request = reqwest::Request::try_from(request)
            .map_err(|e| WithingsError::InvalidRequest(e.to_string()))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| WithingsError::network("HTTP request", e))?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| WithingsError::network("reading response body", e))?;

        let mut converted = Response::new(body);
        *converted.status_mut() = status;
        *converted.version_mut() = version;
        *converted.headers_mut() = headers;
        Ok(converted)
    }
}

/// Bound `fut` by `timeout`; dropping the future on expiry cancels it
pub(crate) async fn with_deadline<T, F>(
    operation: &'static str,
    timeout: Duration,
    fut: F,
) -> WithingsResult<T>
where
    F: Future<Output = WithingsResult<T>> + Send,
{
    tokio::time::timeout(timeout, fut)
        .await
        .map_err(|_| WithingsError::Timeout { operation, timeout })?
}
