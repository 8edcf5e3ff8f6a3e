// ABOUTME: Typed Withings data endpoints exposed on authenticated sessions
// ABOUTME: Shared GET pipeline: query building, payload status check, date parsing, capture
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data endpoints
//!
//! Each endpoint is one GET through [`AuthenticatedSession::send`] with
//! `action=<verb>` plus the endpoint's own query fields. After the envelope
//! is stripped the payload may carry its own `status`/`error`; a non-zero
//! status fails the call with [`WithingsError::Endpoint`].

/// Daily and intraday activity
pub mod activity;
/// Body measures
pub mod measures;
/// Notification subscriptions
pub mod notifications;
/// Query-parameter mapping
pub mod query;
/// Sleep measures and summaries
pub mod sleep;
/// Workout sessions
pub mod workouts;

pub use activity::{ActivityQuery, IntradayActivityQuery};
pub use measures::BodyMeasuresQuery;
pub use notifications::{CreateNotification, ListNotificationsQuery, NotificationTarget};
pub use query::{QueryPairs, QueryParams};
pub use sleep::{SleepMeasuresQuery, SleepSummaryQuery};
pub use workouts::WorkoutsQuery;

use bytes::Bytes;
use http::{Method, Request};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, instrument};

use crate::constants::query_fields;
use crate::errors::{WithingsError, WithingsResult};
use crate::models::ParseDates;
use crate::session::AuthenticatedSession;
use crate::transport::into_success_body;

/// Result of a data endpoint
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    /// Status carried by the payload (always 0 on success)
    pub status: i64,
    /// Error message carried by the payload, if any
    pub error: Option<String>,
    /// Decoded body with parsed dates
    pub body: T,
    /// Unwrapped payload bytes, when raw-response capture is on
    pub raw_response: Option<Bytes>,
    /// Full request URL, when path capture is on
    pub path: Option<String>,
}

#[derive(Deserialize)]
struct Payload<T> {
    #[serde(default)]
    status: i64,
    #[serde(default)]
    error: Option<String>,
    #[serde(flatten)]
    body: T,
}

impl AuthenticatedSession {
    #[instrument(skip(self, query))]
    pub(crate) async fn fetch<T>(
        &self,
        path: &'static str,
        action: &'static str,
        query: QueryPairs,
    ) -> WithingsResult<ApiResponse<T>>
    where
        T: DeserializeOwned + ParseDates,
    {
        let config = self.config();
        let mut url = config
            .endpoints
            .api_base_url
            .join(path)
            .map_err(|e| WithingsError::InvalidRequest(format!("endpoint path '{path}': {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(query_fields::ACTION, action);
            for (name, value) in &query {
                pairs.append_pair(name, value);
            }
        }

        let request = Request::builder()
            .method(Method::GET)
            .uri(url.as_str())
            .body(Bytes::new())
            .map_err(|e| WithingsError::InvalidRequest(format!("{action} request: {e}")))?;

        let raw = into_success_body(action, self.send(request).await?)?;
        let payload: Payload<T> = serde_json::from_slice(&raw)
            .map_err(|e| WithingsError::decode("endpoint payload", e, &raw))?;

        if payload.status != 0 {
            return Err(WithingsError::Endpoint {
                action,
                status: payload.status,
                message: payload.error.unwrap_or_default(),
                raw: String::from_utf8_lossy(&raw).into_owned(),
            });
        }

        let mut body = payload.body;
        body.parse_dates()?;
        debug!(bytes = raw.len(), "Endpoint payload decoded");

        Ok(ApiResponse {
            status: payload.status,
            error: payload.error,
            body,
            raw_response: config.save_raw_response.then_some(raw),
            path: config.include_path.then(|| url.to_string()),
        })
    }
}
