// ABOUTME: Activity models for the getactivity and getintradayactivity actions
// ABOUTME: Daily aggregates keyed by local date and timezone, plus intraday samples
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::dates::{date_in_zone, from_unix};
use super::serde_helpers::flexible_bool;
use super::ParseDates;
use crate::errors::{WithingsError, WithingsResult};

/// Body of a `getactivity` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityMeasures {
    /// Date of a single-day response (older response shape)
    pub date: Option<String>,
    /// Timezone of a single-day response
    pub timezone: Option<String>,
    /// Per-day aggregates
    #[serde(default)]
    pub activities: Vec<Activity>,
    /// Whether more days are available past `offset`
    #[serde(default, deserialize_with = "flexible_bool")]
    pub more: bool,
    /// Offset to pass to fetch the next page
    pub offset: Option<i64>,
    /// `date` combined with `timezone`
    #[serde(skip)]
    pub parsed_date: Option<DateTime<Tz>>,
    /// Set when the response described a single day at the top level
    #[serde(skip)]
    pub single_value: bool,
}

/// Activity aggregate for one local day
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Activity {
    /// Local calendar date (`YYYY-MM-DD`)
    pub date: String,
    /// IANA timezone of `date`
    pub timezone: String,
    /// Source device
    pub deviceid: Option<String>,
    /// Device brand id
    pub brand: Option<i32>,
    /// Whether the source is a tracker
    pub is_tracker: Option<bool>,
    /// Step count
    pub steps: Option<i64>,
    /// Distance in meters
    pub distance: Option<f64>,
    /// Floors climbed, as elevation in meters
    pub elevation: Option<f64>,
    /// Seconds of soft activity
    pub soft: Option<i64>,
    /// Seconds of moderate activity
    pub moderate: Option<i64>,
    /// Seconds of intense activity
    pub intense: Option<i64>,
    /// Seconds of active time
    pub active: Option<i64>,
    /// Active calories (kcal)
    pub calories: Option<f64>,
    /// Total calories (kcal)
    pub totalcalories: Option<f64>,
    /// Average heart rate
    pub hr_average: Option<i64>,
    /// Minimum heart rate
    pub hr_min: Option<i64>,
    /// Maximum heart rate
    pub hr_max: Option<i64>,
    /// Seconds in light heart rate zone
    pub hr_zone_0: Option<i64>,
    /// Seconds in moderate heart rate zone
    pub hr_zone_1: Option<i64>,
    /// Seconds in intense heart rate zone
    pub hr_zone_2: Option<i64>,
    /// Seconds in maximal heart rate zone
    pub hr_zone_3: Option<i64>,
    /// `date` combined with `timezone`
    #[serde(skip)]
    pub parsed_date: Option<DateTime<Tz>>,
}

impl ParseDates for ActivityMeasures {
    fn parse_dates(&mut self) -> WithingsResult<()> {
        if let (Some(date), Some(zone)) = (&self.date, &self.timezone) {
            self.parsed_date = Some(date_in_zone(date, zone)?);
            self.single_value = true;
        }

        for activity in &mut self.activities {
            activity.parsed_date = Some(date_in_zone(&activity.date, &activity.timezone)?);
        }
        Ok(())
    }
}

/// Body of a `getintradayactivity` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntradayActivity {
    /// Samples keyed by unix timestamp (as a string)
    #[serde(default)]
    pub series: BTreeMap<String, IntradaySample>,
}

/// One intraday sample; only the fields the device tracked are present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntradaySample {
    /// Sample duration in seconds
    pub duration: Option<i64>,
    /// Steps
    pub steps: Option<i64>,
    /// Elevation in meters
    pub elevation: Option<f64>,
    /// Active calories
    pub calories: Option<f64>,
    /// Distance in meters
    pub distance: Option<f64>,
    /// Swim strokes
    pub stroke: Option<i64>,
    /// Pool laps
    pub pool_lap: Option<i64>,
    /// Heart rate
    pub heart_rate: Option<i64>,
    /// Device model
    pub model: Option<String>,
    /// Source device
    pub deviceid: Option<String>,
}

impl IntradayActivity {
    /// Samples with their parsed timestamps, in chronological order
    ///
    /// # Errors
    ///
    /// Returns [`WithingsError::InvalidDate`] if a series key is not a unix timestamp.
    pub fn samples(&self) -> WithingsResult<Vec<(DateTime<Utc>, &IntradaySample)>> {
        let mut samples = self
            .series
            .iter()
            .map(|(key, sample)| {
                let timestamp = key.parse::<i64>().map_err(|e| WithingsError::InvalidDate {
                    value: key.clone(),
                    reason: e.to_string(),
                })?;
                Ok((from_unix(timestamp)?, sample))
            })
            .collect::<WithingsResult<Vec<_>>>()?;
        samples.sort_by_key(|(at, _)| *at);
        Ok(samples)
    }
}

impl ParseDates for IntradayActivity {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activities_get_zoned_dates() {
        let mut body: ActivityMeasures = serde_json::from_str(
            r#"{"activities": [
                {"date": "2024-01-10", "timezone": "America/New_York", "steps": 8000},
                {"date": "2024-01-11", "timezone": "America/New_York", "steps": 9000}
            ], "more": false, "offset": 0}"#,
        )
        .unwrap();
        body.parse_dates().unwrap();

        assert!(!body.single_value);
        let first = body.activities[0].parsed_date.unwrap();
        assert_eq!(first.with_timezone(&Utc).to_rfc3339(), "2024-01-10T05:00:00+00:00");
    }

    #[test]
    fn test_single_day_shape() {
        let mut body: ActivityMeasures =
            serde_json::from_str(r#"{"date": "2024-01-10", "timezone": "UTC"}"#).unwrap();
        body.parse_dates().unwrap();

        assert!(body.single_value);
        assert!(body.parsed_date.is_some());
    }

    #[test]
    fn test_intraday_samples_sorted() {
        let body: IntradayActivity = serde_json::from_str(
            r#"{"series": {"1700000600": {"steps": 12}, "1700000000": {"steps": 40, "duration": 60}}}"#,
        )
        .unwrap();

        let samples = body.samples().unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].1.steps, Some(40));
    }
}
