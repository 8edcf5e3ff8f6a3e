// ABOUTME: OAuth-related constants for the Withings authorization and token endpoints
// ABOUTME: Includes endpoint URLs, scope names, and token-exchange form field values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// User-facing authorization page
pub const AUTH_URL: &str = "https://account.withings.com/oauth2_user/authorize2";

/// Token endpoint (envelope-wrapped like the data endpoints)
pub const TOKEN_URL: &str = "https://wbsapi.withings.net/v2/oauth2";

/// Access to the `getmeas` actions
pub const SCOPE_USER_METRICS: &str = "user.metrics";
/// Access to user information
pub const SCOPE_USER_INFO: &str = "user.info";
/// Access to activity data
pub const SCOPE_USER_ACTIVITY: &str = "user.activity";

/// Scopes requested when none are configured
pub const DEFAULT_SCOPES: &[&str] = &[SCOPE_USER_ACTIVITY, SCOPE_USER_METRICS, SCOPE_USER_INFO];

/// Withings joins scopes with commas rather than spaces
pub const SCOPE_SEPARATOR: &str = ",";

/// `action` value for token exchange
pub const ACTION_REQUEST_TOKEN: &str = "requesttoken";

/// Authorization redirect query fields
pub mod auth_fields {
    /// Always `code`
    pub const RESPONSE_TYPE: &str = "response_type";
    /// Registered client id
    pub const CLIENT_ID: &str = "client_id";
    /// Registered redirect URI
    pub const REDIRECT_URI: &str = "redirect_uri";
    /// Comma-separated scopes
    pub const SCOPE: &str = "scope";
    /// Anti-CSRF state
    pub const STATE: &str = "state";
    /// Value of `response_type`
    pub const RESPONSE_TYPE_CODE: &str = "code";
}

/// Token exchange form fields
pub mod token_fields {
    /// Always `requesttoken`
    pub const ACTION: &str = "action";
    /// Registered client id
    pub const CLIENT_ID: &str = "client_id";
    /// Registered client secret
    pub const CLIENT_SECRET: &str = "client_secret";
    /// `authorization_code` or `refresh_token`
    pub const GRANT_TYPE: &str = "grant_type";
    /// Authorization code (code grant only)
    pub const CODE: &str = "code";
    /// Redirect URI (code grant only)
    pub const REDIRECT_URI: &str = "redirect_uri";
    /// Refresh token (refresh grant only)
    pub const REFRESH_TOKEN: &str = "refresh_token";
}
