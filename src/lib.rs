// ABOUTME: Main library entry point for the Withings Health API client
// ABOUTME: OAuth2 token lifecycle, envelope-aware transport, and typed data endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Withings Client
//!
//! A client for the Withings Health API that keeps a user's `OAuth2` token
//! valid without the caller having to think about it.
//!
//! ## Features
//!
//! - **Authorization code flow**: redirect URLs with 64 bytes of random state
//! - **Transparent refresh**: expired tokens are refreshed before a request is
//!   sent, once per session no matter how many calls are waiting
//! - **Envelope unwrapping**: the `{status, body}` wrapper is stripped and a
//!   non-zero status becomes an error
//! - **Typed endpoints**: measures, activity, workouts, sleep, notifications
//!
//! ## Architecture
//!
//! - **`WithingsClient`**: configuration plus a pluggable transport; builds
//!   authorization URLs and sessions
//! - **`AuthenticatedSession`**: one user's token; every endpoint is a method
//! - **Transport**: `AuthenticatingTransport` → envelope unwrapping →
//!   `HttpTransport`
//!
//! Set up a token interactively with the `withings-auth` binary.

// ── Re-exports from withings-core ───────────────────────────────────────

/// Error types and the `WithingsResult` alias
pub use withings_core::errors;

/// Endpoint URLs, API actions, query-field names, defaults
pub use withings_core::constants;

/// Typed response bodies
pub use withings_core::models;

// ── Public API ──────────────────────────────────────────────────────────

/// Client facade
pub mod client;

/// Client configuration and environment loading
pub mod config;

/// Typed data endpoints on authenticated sessions
pub mod endpoints;

/// `tracing-subscriber` setup for binaries
pub mod logging;

/// Credentials, authorization URLs, tokens, and token exchange
pub mod oauth2_client;

/// Per-user authenticated session
pub mod session;

/// Pluggable HTTP transport, envelope unwrapping, bearer authentication
pub mod transport;

/// HTTP client construction
pub mod utils;

pub use client::WithingsClient;
pub use endpoints::ApiResponse;
pub use session::{AuthenticatedSession, SessionOrigin};
