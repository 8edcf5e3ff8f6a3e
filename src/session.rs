// ABOUTME: Authenticated session for one Withings user
// ABOUTME: Bounds every exchange by the configured timeout and exposes the token lifecycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use bytes::Bytes;
use http::{Request, Response};

use crate::config::ClientConfig;
use crate::errors::WithingsResult;
use crate::oauth2_client::{Token, TokenState};
use crate::transport::{with_deadline, AuthenticatingTransport};

/// How a session obtained its initial credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Exchanged an authorization code
    FromCode,
    /// Restored from a stored access token and refresh token
    FromAccessToken,
    /// Restored from a stored refresh token only
    FromRefreshToken,
}

/// A user's authenticated session
///
/// All data endpoints are methods on this type. Sessions are independent:
/// each has its own token and refresh serialization, while sharing the
/// client's configuration and transport.
pub struct AuthenticatedSession {
    config: Arc<ClientConfig>,
    origin: SessionOrigin,
    transport: AuthenticatingTransport,
}

impl AuthenticatedSession {
    pub(crate) const fn new(
        config: Arc<ClientConfig>,
        origin: SessionOrigin,
        transport: AuthenticatingTransport,
    ) -> Self {
        Self {
            config,
            origin,
            transport,
        }
    }

    /// How this session was created
    #[must_use]
    pub const fn origin(&self) -> SessionOrigin {
        self.origin
    }

    /// Configuration shared with the client
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Current token state
    pub async fn state(&self) -> TokenState {
        self.transport.state().await
    }

    /// Copy of the current token, if one has been issued
    pub async fn token(&self) -> Option<Token> {
        self.transport.token().await
    }

    /// Refresh token to persist; changes every time the token is refreshed
    pub async fn refresh_token(&self) -> String {
        self.transport.refresh_token().await
    }

    /// Return a valid token, refreshing first if needed
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::WithingsError::Refresh`] if the refresh fails,
    /// or [`crate::errors::WithingsError::Timeout`] if it exceeds the timeout.
    pub async fn ensure_token(&self) -> WithingsResult<Token> {
        with_deadline("token refresh", self.config.timeout, self.transport.ensure_token()).await
    }

    /// Refresh the token now, even if it is still valid
    ///
    /// # Errors
    ///
    /// Same as [`Self::ensure_token`].
    pub async fn force_refresh(&self) -> WithingsResult<Token> {
        with_deadline("token refresh", self.config.timeout, self.transport.force_refresh()).await
    }

    /// Send an authenticated request and return the unwrapped response
    ///
    /// Refresh (if needed) and the request share one deadline. On timeout or
    /// cancellation the in-flight exchange is dropped and the stored token
    /// is left as it was before the call.
    ///
    /// # Errors
    ///
    /// See [`AuthenticatingTransport::send`]; additionally
    /// [`crate::errors::WithingsError::Timeout`].
    pub async fn send(&self, request: Request<Bytes>) -> WithingsResult<Response<Bytes>> {
        with_deadline("authenticated request", self.config.timeout, self.transport.send(request))
            .await
    }
}
