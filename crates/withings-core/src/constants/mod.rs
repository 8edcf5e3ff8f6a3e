// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Withings endpoint URLs, API actions, query-field wire names, and client defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by domain rather than collected in a single list.

/// OAuth endpoints, scopes, and token-exchange form fields
pub mod oauth;
/// Static wire names for every query parameter the client sends
pub mod query_fields;

pub use oauth::*;

/// Withings API host and endpoint paths (relative to the API base URL)
pub mod endpoints {
    /// Production API base URL
    pub const API_BASE_URL: &str = "https://wbsapi.withings.net";
    /// Body measures (`getmeas`)
    pub const MEASURE: &str = "measure";
    /// Activity, intraday activity, and workouts
    pub const MEASURE_V2: &str = "v2/measure";
    /// Sleep measures and sleep summaries
    pub const SLEEP_V2: &str = "v2/sleep";
    /// Notification subscriptions
    pub const NOTIFY: &str = "notify";
}

/// Values of the `action` query parameter per endpoint
pub mod actions {
    /// Body measures
    pub const GET_MEASURES: &str = "getmeas";
    /// Daily activity aggregates
    pub const GET_ACTIVITY: &str = "getactivity";
    /// High-frequency intraday activity
    pub const GET_INTRADAY_ACTIVITY: &str = "getintradayactivity";
    /// Workout sessions
    pub const GET_WORKOUTS: &str = "getworkouts";
    /// Sleep measures (high-frequency sleep states)
    pub const GET_SLEEP: &str = "get";
    /// Nightly sleep summaries
    pub const GET_SLEEP_SUMMARY: &str = "getsummary";
    /// Create a notification subscription
    pub const SUBSCRIBE: &str = "subscribe";
    /// List notification subscriptions
    pub const LIST_NOTIFICATIONS: &str = "list";
    /// Fetch a single notification subscription
    pub const GET_NOTIFICATION: &str = "get";
    /// Revoke a notification subscription
    pub const REVOKE_NOTIFICATION: &str = "revoke";
}

/// Client defaults
pub mod defaults {
    /// Whole-exchange timeout applied to every session call
    pub const REQUEST_TIMEOUT_SECS: u64 = 5;
    /// TCP connect timeout for the default HTTP client
    pub const CONNECT_TIMEOUT_SECS: u64 = 5;
    /// Bytes of entropy in a generated authorization state
    pub const STATE_ENTROPY_BYTES: usize = 64;
    /// Refresh this many seconds before expiry (0 = refresh once expired)
    pub const REFRESH_LEEWAY_SECS: i64 = 0;
    /// Lookback for activity queries without an explicit start date
    pub const ACTIVITY_LOOKBACK_DAYS: i64 = 1;
    /// Window for sleep queries without explicit bounds
    pub const SLEEP_LOOKBACK_HOURS: i64 = 24;
    /// Calendar date format used by `*ymd` fields and payload dates
    pub const YMD_FORMAT: &str = "%Y-%m-%d";
}

/// Content types sent by the client
pub mod content_types {
    /// Form-encoded token exchange body
    pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
}
