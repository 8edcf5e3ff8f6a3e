// ABOUTME: Authorization state generation for the OAuth redirect
// ABOUTME: 64 bytes from the OS CSPRNG, URL-safe base64 without padding, pluggable for tests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::{rngs::OsRng, RngCore};

use crate::constants::defaults::STATE_ENTROPY_BYTES;
use crate::errors::{WithingsError, WithingsResult};

/// Produces the `state` value for each authorization redirect
pub type StateGenerator = Arc<dyn Fn() -> WithingsResult<String> + Send + Sync>;

/// Generate a fresh authorization state
///
/// # Errors
///
/// Returns [`WithingsError::StateGeneration`] if the OS random source fails.
pub fn generate_state() -> WithingsResult<String> {
    let mut bytes = [0_u8; STATE_ENTROPY_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| WithingsError::StateGeneration(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// The generator used unless the client is given another one
#[must_use]
pub fn default_state_generator() -> StateGenerator {
    Arc::new(generate_state)
}
