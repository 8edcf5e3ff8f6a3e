// ABOUTME: Configuration module for the Withings client
// ABOUTME: Client settings, endpoint URLs, and environment-based loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Client configuration
//!
//! [`ClientConfig`] is built once, then shared read-only by the client and
//! every session it creates.

/// Client settings and endpoint URLs
pub mod client;
/// Environment variable loading
pub mod environment;

pub use client::{ClientConfig, Endpoints};
