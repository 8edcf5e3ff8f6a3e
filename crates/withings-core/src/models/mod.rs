// ABOUTME: Typed response bodies for the Withings data endpoints
// ABOUTME: Measures, activity, workouts, sleep, notifications, plus OAuth and date helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Response models
//!
//! Each model mirrors the JSON the API returns inside the response envelope.
//! Fields the API reports as unix timestamps or as a calendar date plus an
//! IANA zone also get a parsed counterpart, filled by [`ParseDates`] after
//! decoding.

/// Activity aggregates and intraday samples
pub mod activity;
/// Date and timezone conversion helpers
pub mod dates;
/// Body measures (weight, fat mass, blood pressure, ...)
pub mod measures;
/// Notification subscription profiles
pub mod notifications;
/// Grant types and user identifiers from the token endpoint
pub mod oauth;
/// Sleep measures and nightly summaries
pub mod sleep;
/// Workout sessions
pub mod workouts;

mod serde_helpers;

pub use activity::{Activity, ActivityMeasures, IntradayActivity, IntradaySample};
pub use measures::{BodyMeasures, Measure, MeasureGroup, MeasurePoint};
pub use notifications::{NotificationList, NotificationProfile};
pub use oauth::{GrantType, UserId};
pub use sleep::{SleepMeasures, SleepSample, SleepSummary, SleepSummaryData, SleepSummaryEntry};
pub use workouts::{Workout, WorkoutData, Workouts};

use serde::{Deserialize, Serialize};

use crate::errors::WithingsResult;

/// Post-decode hook that fills the parsed date fields of a response body
pub trait ParseDates {
    /// Convert raw timestamps and date/zone pairs into absolute times
    ///
    /// # Errors
    ///
    /// Returns [`crate::errors::WithingsError::InvalidDate`] or
    /// [`crate::errors::WithingsError::UnknownTimezone`] when a field cannot
    /// be interpreted.
    fn parse_dates(&mut self) -> WithingsResult<()> {
        Ok(())
    }
}

/// Body of endpoints that return no payload (subscribe, revoke)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyBody {}

impl ParseDates for EmptyBody {}
