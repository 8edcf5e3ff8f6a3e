// ABOUTME: OAuth2 credentials and authorization redirect construction for Withings
// ABOUTME: Immutable client credentials, scope names, and state-carrying authorization URLs
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use url::Url;

use crate::constants::{
    auth_fields, DEFAULT_SCOPES, SCOPE_SEPARATOR, SCOPE_USER_ACTIVITY, SCOPE_USER_INFO,
    SCOPE_USER_METRICS,
};

/// Withings OAuth scopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    /// `user.metrics`
    UserMetrics,
    /// `user.info`
    UserInfo,
    /// `user.activity`
    UserActivity,
}

impl Scope {
    /// Wire name of the scope
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserMetrics => SCOPE_USER_METRICS,
            Self::UserInfo => SCOPE_USER_INFO,
            Self::UserActivity => SCOPE_USER_ACTIVITY,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Scope> for String {
    fn from(scope: Scope) -> Self {
        scope.as_str().to_owned()
    }
}

/// Application credentials registered with Withings
///
/// Never mutated once a client has been built around them.
#[derive(Clone)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    redirect_url: Url,
    scopes: Vec<String>,
}

impl Credentials {
    /// Create credentials requesting the default scopes
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_url: Url,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_url,
            scopes: DEFAULT_SCOPES.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    /// Replace the requested scopes
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Registered client id
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Registered client secret
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Registered redirect URL
    #[must_use]
    pub const fn redirect_url(&self) -> &Url {
        &self.redirect_url
    }

    /// Requested scopes
    #[must_use]
    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Scopes as sent on the wire (comma-joined)
    #[must_use]
    pub fn scope_param(&self) -> String {
        self.scopes.join(SCOPE_SEPARATOR)
    }

    /// First 8 hex chars of the SHA-256 of the client secret
    ///
    /// Lets operators compare secrets across deployments without logging them.
    #[must_use]
    pub fn secret_fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.client_secret.as_bytes());
        let result = hasher.finalize();
        format!("{result:x}").chars().take(8).collect()
    }

    /// Build the authorization redirect URL for `state`
    #[must_use]
    pub fn authorization_url(&self, auth_url: &Url, state: &str) -> Url {
        let mut url = auth_url.clone();
        url.query_pairs_mut()
            .append_pair(auth_fields::RESPONSE_TYPE, auth_fields::RESPONSE_TYPE_CODE)
            .append_pair(auth_fields::CLIENT_ID, &self.client_id)
            .append_pair(auth_fields::REDIRECT_URI, self.redirect_url.as_str())
            .append_pair(auth_fields::SCOPE, &self.scope_param())
            .append_pair(auth_fields::STATE, state);
        url
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_url", &self.redirect_url.as_str())
            .field("scopes", &self.scopes)
            .finish()
    }
}

/// Authorization redirect plus the state the callback must echo back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    /// URL to send the user to
    pub url: Url,
    /// State embedded in `url`; keep it until the callback arrives
    pub state: String,
}

impl AuthorizationRequest {
    /// Check the `state` returned on the callback, in constant time
    #[must_use]
    pub fn verify_state(&self, returned: &str) -> bool {
        self.state.as_bytes().ct_eq(returned.as_bytes()).into()
    }
}
