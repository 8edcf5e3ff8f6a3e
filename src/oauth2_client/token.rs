// ABOUTME: Issued OAuth tokens and the per-session token store
// ABOUTME: Classifies the current token as unauthenticated, valid, or expired
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::UserId;

/// Token issued by the token endpoint
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Bearer credential for data requests
    pub access_token: String,
    /// Credential for the next refresh; Withings rotates it on every refresh
    pub refresh_token: String,
    /// Usually `Bearer`
    pub token_type: String,
    /// Absolute expiry of `access_token`
    pub expiry: DateTime<Utc>,
    /// Withings user the token belongs to
    pub user_id: Option<UserId>,
    /// Granted scopes, comma-separated
    pub scope: Option<String>,
}

impl Token {
    /// Whether the access token is expired at `now`, counting `leeway` early
    ///
    /// A leeway reaching past the representable range expires every token.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>, leeway: Duration) -> bool {
        now.checked_add_signed(leeway).is_none_or(|horizon| self.expiry <= horizon)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expiry", &self.expiry)
            .field("user_id", &self.user_id)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Lifecycle state of a session's token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// Only a refresh token is known; no access token has been issued yet
    Unauthenticated,
    /// An access token exists and has not expired
    Valid,
    /// An access token exists but has expired
    Expired,
}

#[derive(Clone)]
enum Stored {
    RefreshOnly(String),
    Issued(Token),
}

/// Current token of one session
///
/// The token is replaced as a whole; there is no way to update the access
/// token without the matching refresh token and expiry.
#[derive(Clone)]
pub struct TokenStore {
    current: Stored,
}

impl TokenStore {
    /// Store that only knows a refresh token
    #[must_use]
    pub fn from_refresh_token(refresh_token: impl Into<String>) -> Self {
        Self {
            current: Stored::RefreshOnly(refresh_token.into()),
        }
    }

    /// Store holding an issued token
    #[must_use]
    pub const fn from_token(token: Token) -> Self {
        Self {
            current: Stored::Issued(token),
        }
    }

    /// Classify the stored token at `now`
    #[must_use]
    pub fn state(&self, now: DateTime<Utc>, leeway: Duration) -> TokenState {
        match &self.current {
            Stored::RefreshOnly(_) => TokenState::Unauthenticated,
            Stored::Issued(token) if token.is_expired_at(now, leeway) => TokenState::Expired,
            Stored::Issued(_) => TokenState::Valid,
        }
    }

    /// Refresh token to present on the next refresh
    #[must_use]
    pub fn refresh_token(&self) -> &str {
        match &self.current {
            Stored::RefreshOnly(refresh_token) => refresh_token,
            Stored::Issued(token) => &token.refresh_token,
        }
    }

    /// Current access token, if one has been issued
    #[must_use]
    pub fn access_token(&self) -> Option<&str> {
        match &self.current {
            Stored::RefreshOnly(_) => None,
            Stored::Issued(token) => Some(&token.access_token),
        }
    }

    /// Copy of the issued token, if any
    #[must_use]
    pub fn snapshot(&self) -> Option<Token> {
        match &self.current {
            Stored::RefreshOnly(_) => None,
            Stored::Issued(token) => Some(token.clone()),
        }
    }

    /// Replace the stored value with a freshly issued token
    pub fn replace(&mut self, token: Token) {
        self.current = Stored::Issued(token);
    }
}

impl fmt::Debug for TokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.current {
            Stored::RefreshOnly(_) => f.write_str("TokenStore(RefreshOnly)"),
            Stored::Issued(token) => f.debug_tuple("TokenStore").field(token).finish(),
        }
    }
}
