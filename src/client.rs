// ABOUTME: Withings client facade creating authorization URLs and user sessions
// ABOUTME: Owns the shared configuration, transport, and authorization state generator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Withings Client
//!
//! ```no_run
//! # async fn demo() -> withings_client::errors::WithingsResult<()> {
//! use withings_client::{config::ClientConfig, WithingsClient};
//!
//! let config = ClientConfig::new("client-id", "client-secret", "https://example.com/cb")?;
//! let client = WithingsClient::new(config)?;
//!
//! let request = client.authorization_url()?;
//! println!("visit {}", request.url);
//!
//! // ... callback delivers `code` and `state`
//! # let (code, state) = (String::new(), String::new());
//! assert!(request.verify_state(&state));
//! let session = client.session_from_code(&code).await?;
//! let measures = session.get_body_measures(&Default::default()).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use crate::config::ClientConfig;
use crate::errors::{WithingsError, WithingsResult};
use crate::models::GrantType;
use crate::oauth2_client::{
    default_state_generator, AuthorizationRequest, Grant, StateGenerator, Token, TokenRefresher,
    TokenStore,
};
use crate::session::{AuthenticatedSession, SessionOrigin};
use crate::transport::{with_deadline, AuthenticatingTransport, HttpTransport, ReqwestTransport};
use crate::utils::http_client::api_client;

/// Entry point of the library
#[derive(Clone)]
pub struct WithingsClient {
    config: Arc<ClientConfig>,
    transport: Arc<dyn HttpTransport>,
    state_generator: StateGenerator,
}

impl WithingsClient {
    /// Create a client using a `reqwest` transport
    ///
    /// # Errors
    ///
    /// Returns [`WithingsError::Config`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> WithingsResult<Self> {
        let http = api_client(config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(ReqwestTransport::new(http))))
    }

    /// Create a client over any [`HttpTransport`]
    #[must_use]
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            state_generator: default_state_generator(),
        }
    }

    /// Replace the authorization state generator
    #[must_use]
    pub fn with_state_generator(mut self, generator: StateGenerator) -> Self {
        self.state_generator = generator;
        self
    }

    /// Shared configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build the authorization redirect with a fresh state
    ///
    /// # Errors
    ///
    /// Returns [`WithingsError::StateGeneration`] if no state can be produced.
    pub fn authorization_url(&self) -> WithingsResult<AuthorizationRequest> {
        let state = (self.state_generator)()?;
        let url = self
            .config
            .credentials()
            .authorization_url(&self.config.endpoints.auth_url, &state);
        Ok(AuthorizationRequest { url, state })
    }

    /// Exchange an authorization code for a token
    ///
    /// # Errors
    ///
    /// Returns [`WithingsError::Refresh`] wrapping the cause, or
    /// [`WithingsError::Timeout`].
    #[instrument(skip_all)]
    pub async fn exchange_code(&self, code: &str) -> WithingsResult<Token> {
        let grant = Grant::AuthorizationCode {
            code: code.to_owned(),
        };
        let refresher = self.refresher();
        with_deadline("token exchange", self.config.timeout, async {
            refresher
                .refresh(&grant)
                .await
                .map_err(|e| WithingsError::refresh(GrantType::AuthorizationCode, e))
        })
        .await
    }

    /// Exchange an authorization code and open a session with the token
    ///
    /// # Errors
    ///
    /// Same as [`Self::exchange_code`].
    pub async fn session_from_code(&self, code: &str) -> WithingsResult<AuthenticatedSession> {
        let token = self.exchange_code(code).await?;
        info!("Session established from authorization code");
        Ok(self.session(SessionOrigin::FromCode, TokenStore::from_token(token)))
    }

    /// Restore a session from a stored access token
    ///
    /// No request is made; if `expiry` has passed, the first call refreshes.
    #[must_use]
    pub fn session_from_access_token(
        &self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expiry: DateTime<Utc>,
    ) -> AuthenticatedSession {
        let token = Token {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            token_type: "Bearer".to_owned(),
            expiry,
            user_id: None,
            scope: None,
        };
        self.session_from_token(token)
    }

    /// Restore a session from a previously issued token
    #[must_use]
    pub fn session_from_token(&self, token: Token) -> AuthenticatedSession {
        self.session(SessionOrigin::FromAccessToken, TokenStore::from_token(token))
    }

    /// Restore a session from a stored refresh token
    ///
    /// No request is made; the first call refreshes.
    #[must_use]
    pub fn session_from_refresh_token(
        &self,
        refresh_token: impl Into<String>,
    ) -> AuthenticatedSession {
        self.session(
            SessionOrigin::FromRefreshToken,
            TokenStore::from_refresh_token(refresh_token),
        )
    }

    fn refresher(&self) -> TokenRefresher {
        TokenRefresher::new(
            Arc::clone(self.config.credentials()),
            Arc::clone(&self.transport),
            self.config.endpoints.token_url.clone(),
        )
    }

    fn session(&self, origin: SessionOrigin, store: TokenStore) -> AuthenticatedSession {
        let transport = AuthenticatingTransport::new(
            self.refresher(),
            Arc::clone(&self.transport),
            store,
            self.config.refresh_leeway,
        );
        AuthenticatedSession::new(Arc::clone(&self.config), origin, transport)
    }
}
