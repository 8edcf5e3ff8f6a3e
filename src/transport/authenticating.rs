// ABOUTME: Transport that attaches bearer tokens and refreshes them on demand
// ABOUTME: Serializes refresh per session so concurrent callers trigger exactly one exchange
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use http::{header::AUTHORIZATION, HeaderValue, Request, Response};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::{envelope::unwrap_envelope, HttpTransport};
use crate::errors::{WithingsError, WithingsResult};
use crate::models::GrantType;
use crate::oauth2_client::{Grant, Token, TokenRefresher, TokenState, TokenStore};

/// Sends requests on behalf of one session
///
/// The token store lives behind an async mutex that is held for the whole
/// refresh. Callers arriving during a refresh wait on the lock and then see
/// the fresh token, so one refresh serves them all. The store is only
/// written after a refresh fully succeeds.
pub struct AuthenticatingTransport {
    refresher: TokenRefresher,
    inner: Arc<dyn HttpTransport>,
    store: Mutex<TokenStore>,
    leeway: chrono::Duration,
}

impl AuthenticatingTransport {
    /// Create a transport around `store`
    #[must_use]
    pub fn new(
        refresher: TokenRefresher,
        inner: Arc<dyn HttpTransport>,
        store: TokenStore,
        leeway: std::time::Duration,
    ) -> Self {
        Self {
            refresher,
            inner,
            store: Mutex::new(store),
            leeway: chrono::Duration::from_std(leeway).unwrap_or_else(|_| chrono::Duration::zero()),
        }
    }

    /// Current token state
    pub async fn state(&self) -> TokenState {
        self.store.lock().await.state(Utc::now(), self.leeway)
    }

    /// Copy of the current token, if one has been issued
    pub async fn token(&self) -> Option<Token> {
        self.store.lock().await.snapshot()
    }

    /// Refresh token that must be presented next
    pub async fn refresh_token(&self) -> String {
        self.store.lock().await.refresh_token().to_owned()
    }

    /// Return a valid token, refreshing first if needed
    ///
    /// # Errors
    ///
    /// Returns [`WithingsError::Refresh`] if a needed refresh fails.
    pub async fn ensure_token(&self) -> WithingsResult<Token> {
        let mut store = self.store.lock().await;
        if store.state(Utc::now(), self.leeway) != TokenState::Valid {
            self.refresh_locked(&mut store).await?;
        }
        store.snapshot().ok_or_else(|| {
            WithingsError::InvalidRequest("token store empty after refresh".to_owned())
        })
    }

    /// Refresh unconditionally
    ///
    /// # Errors
    ///
    /// Returns [`WithingsError::Refresh`] if the exchange fails; the stored
    /// token is left as it was.
    pub async fn force_refresh(&self) -> WithingsResult<Token> {
        let mut store = self.store.lock().await;
        self.refresh_locked(&mut store).await?;
        store.snapshot().ok_or_else(|| {
            WithingsError::InvalidRequest("token store empty after refresh".to_owned())
        })
    }

    /// Send `request` with a bearer token and unwrap the response envelope
    ///
    /// If the token is not valid it is refreshed first; a failed refresh
    /// means `request` is never sent.
    ///
    /// # Errors
    ///
    /// - [`WithingsError::Refresh`] if a needed refresh fails
    /// - any error of the inner transport or [`unwrap_envelope`]
    #[instrument(skip_all, fields(method = %request.method(), path = request.uri().path()))]
    pub async fn send(&self, mut request: Request<Bytes>) -> WithingsResult<Response<Bytes>> {
        let access_token = self.access_token().await?;
        let mut bearer = HeaderValue::from_str(&format!("Bearer {access_token}"))
            .map_err(|e| WithingsError::InvalidRequest(format!("access token header: {e}")))?;
        bearer.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, bearer);

        let response = self.inner.execute(request).await?;
        debug!(status = response.status().as_u16(), "Response received");
        unwrap_envelope(response)
    }

    async fn access_token(&self) -> WithingsResult<String> {
        let mut store = self.store.lock().await;
        let state = store.state(Utc::now(), self.leeway);
        if state != TokenState::Valid {
            debug!(?state, "Access token not usable, refreshing");
            self.refresh_locked(&mut store).await?;
        }
        store.access_token().map(str::to_owned).ok_or_else(|| {
            WithingsError::InvalidRequest("token store empty after refresh".to_owned())
        })
    }

    async fn refresh_locked(&self, store: &mut TokenStore) -> WithingsResult<()> {
        let grant = Grant::RefreshToken {
            refresh_token: store.refresh_token().to_owned(),
        };
        let token = self.refresher.refresh(&grant).await.map_err(|e| {
            warn!(error = %e, "Token refresh failed");
            WithingsError::refresh(GrantType::RefreshToken, e)
        })?;
        store.replace(token);
        Ok(())
    }
}
