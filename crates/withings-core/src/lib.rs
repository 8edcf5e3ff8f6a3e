// ABOUTME: Core types and constants for the Withings Health API client
// ABOUTME: Foundation crate with error handling, API constants, and response models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Withings Core
//!
//! Foundation crate providing shared types and constants for the Withings
//! client. It has no network dependencies so it changes rarely and keeps
//! incremental builds of the client crate cheap.
//!
//! ## Modules
//!
//! - **errors**: `WithingsError` taxonomy and the `WithingsResult` alias
//! - **constants**: endpoint URLs, API actions, query-field wire names, defaults
//! - **models**: typed response bodies and date/timezone helpers

/// Unified error handling for token lifecycle, transport, and endpoint failures
pub mod errors;

/// API constants organized by domain
pub mod constants;

/// Typed response bodies returned by the Withings data endpoints
pub mod models;
