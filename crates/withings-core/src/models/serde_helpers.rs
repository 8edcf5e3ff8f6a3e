// ABOUTME: Serde helpers for loosely typed Withings fields
// ABOUTME: Accepts booleans reported either as JSON booleans or as 0/1 integers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrInt {
    Bool(bool),
    Int(i64),
}

/// `more` is a boolean on v2 endpoints and an integer on `getmeas`
pub fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match BoolOrInt::deserialize(deserializer)? {
        BoolOrInt::Bool(value) => value,
        BoolOrInt::Int(value) => value != 0,
    })
}
