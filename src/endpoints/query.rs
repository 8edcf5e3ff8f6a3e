// ABOUTME: Static query-parameter mapping for Withings data endpoints
// ABOUTME: Each parameter struct lists its wire names explicitly; unset fields are omitted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::dates::format_ymd;

/// Ordered `(wire name, value)` pairs appended after `action`
pub type QueryPairs = Vec<(&'static str, String)>;

/// Endpoint parameters that can render themselves as query pairs
pub trait QueryParams {
    /// Render the parameters; `now` anchors any relative default
    fn query_pairs(&self, now: DateTime<Utc>) -> QueryPairs;
}

/// Small builder over [`QueryPairs`] that skips unset values
#[derive(Debug, Default)]
pub(crate) struct QueryBuilder {
    pairs: QueryPairs,
}

impl QueryBuilder {
    pub(crate) fn unix(mut self, name: &'static str, value: Option<DateTime<Utc>>) -> Self {
        if let Some(value) = value {
            self.pairs.push((name, value.timestamp().to_string()));
        }
        self
    }

    pub(crate) fn ymd(mut self, name: &'static str, value: Option<NaiveDate>) -> Self {
        if let Some(value) = value {
            self.pairs.push((name, format_ymd(value)));
        }
        self
    }

    pub(crate) fn int<T: ToString>(mut self, name: &'static str, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.pairs.push((name, value.to_string()));
        }
        self
    }

    pub(crate) fn text(mut self, name: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.pairs.push((name, value.to_owned()));
        }
        self
    }

    pub(crate) fn finish(self) -> QueryPairs {
        self.pairs
    }
}
