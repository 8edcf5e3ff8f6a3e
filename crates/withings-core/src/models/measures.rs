// ABOUTME: Body measure models returned by the getmeas action
// ABOUTME: Measure groups with scaled values and per-type time series extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates::from_unix;
use super::serde_helpers::flexible_bool;
use super::ParseDates;
use crate::errors::WithingsResult;

/// Body of a `getmeas` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BodyMeasures {
    /// Server time of the response (unix seconds)
    pub updatetime: Option<i64>,
    /// User timezone
    pub timezone: Option<String>,
    /// Measure groups, one per weighing or reading
    #[serde(default)]
    pub measuregrps: Vec<MeasureGroup>,
    /// Whether more groups are available past `offset`
    #[serde(default, deserialize_with = "flexible_bool")]
    pub more: bool,
    /// Offset to pass to fetch the next page
    pub offset: Option<i64>,
}

/// Measures taken together by one device at one time
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeasureGroup {
    /// Group id
    pub grpid: i64,
    /// How the group was captured (device, manual, ...)
    #[serde(default)]
    pub attrib: i32,
    /// Measurement time (unix seconds)
    pub date: i64,
    /// Creation time (unix seconds)
    pub created: Option<i64>,
    /// Last modification time (unix seconds)
    pub modified: Option<i64>,
    /// 1 for real measures, 2 for user objectives
    #[serde(default)]
    pub category: i32,
    /// Device that produced the group
    pub deviceid: Option<String>,
    /// Individual measures
    #[serde(default)]
    pub measures: Vec<Measure>,
    /// Free-text comment
    pub comment: Option<String>,
    /// Parsed `date`
    #[serde(skip)]
    pub date_parsed: Option<DateTime<Utc>>,
}

/// A single scaled measure; the real value is `value * 10^unit`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    /// Unscaled integer value
    pub value: i64,
    /// Measure type id (1 = weight, 6 = fat ratio, ...)
    #[serde(rename = "type")]
    pub meas_type: i32,
    /// Power of ten to apply to `value`
    pub unit: i32,
    /// Algorithm id, when reported
    pub algo: Option<i64>,
    /// Firmware measurement flag, when reported
    pub fm: Option<i64>,
}

impl Measure {
    /// Scaled value
    #[must_use]
    pub fn real_value(&self) -> f64 {
        self.value as f64 * 10_f64.powi(self.unit)
    }
}

/// One point of a per-type series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurePoint {
    /// Measurement time
    pub date: DateTime<Utc>,
    /// Scaled value
    pub value: f64,
}

impl BodyMeasures {
    /// All values of one measure type across groups, oldest first
    #[must_use]
    pub fn series(&self, meas_type: i32) -> Vec<MeasurePoint> {
        let mut points: Vec<MeasurePoint> = self
            .measuregrps
            .iter()
            .filter_map(|group| {
                let date = group.date_parsed.or_else(|| from_unix(group.date).ok())?;
                Some(
                    group
                        .measures
                        .iter()
                        .filter(move |m| m.meas_type == meas_type)
                        .map(move |m| MeasurePoint {
                            date,
                            value: m.real_value(),
                        }),
                )
            })
            .flatten()
            .collect();
        points.sort_by_key(|p| p.date);
        points
    }
}

impl ParseDates for BodyMeasures {
    fn parse_dates(&mut self) -> WithingsResult<()> {
        for group in &mut self.measuregrps {
            group.date_parsed = Some(from_unix(group.date)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BodyMeasures {
        serde_json::from_str(
            r#"{
                "updatetime": 1700000500,
                "timezone": "Europe/Paris",
                "measuregrps": [
                    {"grpid": 2, "attrib": 0, "date": 1700000200, "category": 1,
                     "measures": [{"value": 72500, "type": 1, "unit": -3}]},
                    {"grpid": 1, "attrib": 0, "date": 1700000100, "category": 1,
                     "measures": [{"value": 7310, "type": 1, "unit": -2},
                                  {"value": 182, "type": 6, "unit": -1}]}
                ],
                "more": 0,
                "offset": 0
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_real_value_applies_unit() {
        let m = Measure {
            value: 72500,
            meas_type: 1,
            unit: -3,
            algo: None,
            fm: None,
        };
        assert!((m.real_value() - 72.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_series_filters_and_orders() {
        let mut body = sample();
        body.parse_dates().unwrap();

        let weights = body.series(1);
        assert_eq!(weights.len(), 2);
        assert!(weights[0].date < weights[1].date);
        assert!((weights[0].value - 73.1).abs() < 1e-9);
        assert!(!body.more);
    }
}
