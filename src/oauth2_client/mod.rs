// ABOUTME: OAuth 2.0 client pieces for the Withings authorization code flow
// ABOUTME: Credentials, authorization URLs, state generation, token storage, and refresh
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # OAuth 2.0 Client Module
//!
//! The client acts on behalf of a single Withings user:
//! - builds the authorization redirect with an unguessable `state`
//! - exchanges the returned code (or a stored refresh token) for a token
//! - keeps the current token in a [`TokenStore`] that is only ever replaced
//!   as a whole

/// Credentials, scopes, and the authorization redirect
pub mod client;
/// Token exchange against the token endpoint
pub mod refresher;
/// Authorization state generation
pub mod state;
/// Issued tokens and the per-session token store
pub mod token;

pub use client::{AuthorizationRequest, Credentials, Scope};
pub use refresher::{Grant, TokenRefresher};
pub use state::{default_state_generator, generate_state, StateGenerator};
pub use token::{Token, TokenState, TokenStore};
