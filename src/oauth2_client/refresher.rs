// ABOUTME: Token exchange against the Withings token endpoint
// ABOUTME: Posts authorization-code or refresh-token grants and decodes the issued token
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{Duration, Utc};
use http::{header::CONTENT_TYPE, Method, Request};
use serde::Deserialize;
use tracing::{debug, info, instrument};
use url::Url;

use super::client::Credentials;
use super::token::Token;
use crate::constants::{content_types, token_fields, ACTION_REQUEST_TOKEN};
use crate::errors::{WithingsError, WithingsResult};
use crate::models::{GrantType, UserId};
use crate::transport::{into_success_body, unwrap_envelope, HttpTransport};

const TOKEN_EXCHANGE: &str = "token exchange";

/// Grant presented to the token endpoint
#[derive(Clone, PartialEq, Eq)]
pub enum Grant {
    /// Authorization code from the redirect callback
    AuthorizationCode {
        /// Code returned on the callback
        code: String,
    },
    /// Previously issued refresh token
    RefreshToken {
        /// Refresh token to exchange
        refresh_token: String,
    },
}

impl Grant {
    /// Wire `grant_type` of this grant
    #[must_use]
    pub const fn grant_type(&self) -> GrantType {
        match self {
            Self::AuthorizationCode { .. } => GrantType::AuthorizationCode,
            Self::RefreshToken { .. } => GrantType::RefreshToken,
        }
    }
}

impl fmt::Debug for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grant({})", self.grant_type())
    }
}

/// Token endpoint response body (after envelope unwrapping)
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    userid: Option<UserId>,
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

/// Exchanges grants for tokens
///
/// Has no state of its own: it never touches a [`super::TokenStore`]. The
/// caller decides what to do with the issued token.
#[derive(Clone)]
pub struct TokenRefresher {
    credentials: Arc<Credentials>,
    transport: Arc<dyn HttpTransport>,
    token_url: Url,
}

impl TokenRefresher {
    /// Create a refresher posting to `token_url` through `transport`
    #[must_use]
    pub fn new(
        credentials: Arc<Credentials>,
        transport: Arc<dyn HttpTransport>,
        token_url: Url,
    ) -> Self {
        Self {
            credentials,
            transport,
            token_url,
        }
    }

    /// Exchange `grant` for a new token
    ///
    /// The token expiry is the local time of decoding plus `expires_in`.
    ///
    /// # Errors
    ///
    /// - [`WithingsError::Network`] if the request could not be sent
    /// - [`WithingsError::Http`] on a non-200 response
    /// - [`WithingsError::Envelope`] on a non-zero envelope status
    /// - [`WithingsError::Decode`] if the body is not a token
    /// - [`WithingsError::OutOfRange`] if `expires_in` cannot be turned into an expiry
    #[instrument(skip(self, grant), fields(grant_type = %grant.grant_type()))]
    pub async fn refresh(&self, grant: &Grant) -> WithingsResult<Token> {
        let request = self.build_request(grant)?;
        let response = self.transport.execute(request).await?;
        let body = into_success_body(TOKEN_EXCHANGE, unwrap_envelope(response)?)?;

        let decoded: TokenResponse = serde_json::from_slice(&body)
            .map_err(|e| WithingsError::decode("token response", e, &body))?;

        let expiry = Duration::try_seconds(decoded.expires_in)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| WithingsError::OutOfRange {
                context: "token response",
                reason: format!("expires_in {} overflows the token expiry", decoded.expires_in),
                raw: String::from_utf8_lossy(&body).into_owned(),
            })?;

        let token = Token {
            access_token: decoded.access_token,
            refresh_token: decoded.refresh_token,
            token_type: decoded.token_type.unwrap_or_else(|| "Bearer".to_owned()),
            expiry,
            user_id: decoded.userid,
            scope: decoded.scope,
        };

        if let Grant::RefreshToken { refresh_token } = grant {
            if *refresh_token != token.refresh_token {
                debug!("Refresh token was rotated");
            }
        }
        info!(
            user_id = token.user_id.as_ref().map_or("unknown", UserId::as_str),
            expires_in = decoded.expires_in,
            "Token issued"
        );
        Ok(token)
    }

    fn build_request(&self, grant: &Grant) -> WithingsResult<Request<Bytes>> {
        let mut form = url::form_urlencoded::Serializer::new(String::new());
        form.append_pair(token_fields::ACTION, ACTION_REQUEST_TOKEN)
            .append_pair(token_fields::CLIENT_ID, self.credentials.client_id())
            .append_pair(token_fields::CLIENT_SECRET, self.credentials.client_secret())
            .append_pair(token_fields::GRANT_TYPE, grant.grant_type().as_str());
        match grant {
            Grant::AuthorizationCode { code } => {
                form.append_pair(token_fields::CODE, code).append_pair(
                    token_fields::REDIRECT_URI,
                    self.credentials.redirect_url().as_str(),
                );
            }
            Grant::RefreshToken { refresh_token } => {
                form.append_pair(token_fields::REFRESH_TOKEN, refresh_token);
            }
        }

        Request::builder()
            .method(Method::POST)
            .uri(self.token_url.as_str())
            .header(CONTENT_TYPE, content_types::FORM_URLENCODED)
            .body(Bytes::from(form.finish()))
            .map_err(|e| WithingsError::InvalidRequest(format!("token request: {e}")))
    }
}
