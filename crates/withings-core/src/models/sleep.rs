// ABOUTME: Sleep models for the sleep get and getsummary actions
// ABOUTME: High-frequency sleep state samples and nightly summaries with zoned dates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::dates::{date_in_zone, from_unix};
use super::serde_helpers::flexible_bool;
use super::ParseDates;
use crate::errors::WithingsResult;

/// Body of a sleep `get` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SleepMeasures {
    /// Sleep state samples
    #[serde(default)]
    pub series: Vec<SleepSample>,
    /// Device model
    pub model: Option<i32>,
}

/// A sleep state held between two instants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SleepSample {
    /// Start time (unix seconds)
    pub startdate: i64,
    /// End time (unix seconds)
    pub enddate: i64,
    /// 0 awake, 1 light, 2 deep, 3 REM
    pub state: i32,
    /// Parsed `startdate`
    #[serde(skip)]
    pub start_date_parsed: Option<DateTime<Utc>>,
    /// Parsed `enddate`
    #[serde(skip)]
    pub end_date_parsed: Option<DateTime<Utc>>,
}

impl ParseDates for SleepMeasures {
    fn parse_dates(&mut self) -> WithingsResult<()> {
        for sample in &mut self.series {
            sample.start_date_parsed = Some(from_unix(sample.startdate)?);
            sample.end_date_parsed = Some(from_unix(sample.enddate)?);
        }
        Ok(())
    }
}

/// Body of a `getsummary` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SleepSummary {
    /// Nightly summaries
    #[serde(default)]
    pub series: Vec<SleepSummaryEntry>,
    /// Whether more nights are available past `offset`
    #[serde(default, deserialize_with = "flexible_bool")]
    pub more: bool,
    /// Offset to pass to fetch the next page
    pub offset: Option<i64>,
}

/// Summary of one night
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SleepSummaryEntry {
    /// Summary id
    pub id: Option<i64>,
    /// IANA timezone of `date`
    pub timezone: String,
    /// Device model
    pub model: Option<i32>,
    /// Start time (unix seconds)
    pub startdate: i64,
    /// End time (unix seconds)
    pub enddate: i64,
    /// Local calendar date the night is attributed to
    pub date: String,
    /// Creation time (unix seconds)
    pub created: Option<i64>,
    /// Last modification time (unix seconds)
    pub modified: Option<i64>,
    /// Night metrics
    pub data: Option<SleepSummaryData>,
    /// Parsed `startdate`
    #[serde(skip)]
    pub start_date_parsed: Option<DateTime<Utc>>,
    /// Parsed `enddate`
    #[serde(skip)]
    pub end_date_parsed: Option<DateTime<Utc>>,
    /// `date` combined with `timezone`
    #[serde(skip)]
    pub date_parsed: Option<DateTime<Tz>>,
}

/// Metrics of one night; durations in seconds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepSummaryData {
    /// Time awake
    pub wakeupduration: Option<i64>,
    /// Time in light sleep
    pub lightsleepduration: Option<i64>,
    /// Time in deep sleep
    pub deepsleepduration: Option<i64>,
    /// Time in REM sleep
    pub remsleepduration: Option<i64>,
    /// Number of wake-ups
    pub wakeupcount: Option<i64>,
    /// Time to fall asleep
    pub durationtosleep: Option<i64>,
    /// Time to get up after waking
    pub durationtowakeup: Option<i64>,
    /// Average heart rate
    pub hr_average: Option<i64>,
    /// Minimum heart rate
    pub hr_min: Option<i64>,
    /// Maximum heart rate
    pub hr_max: Option<i64>,
    /// Average respiration rate
    pub rr_average: Option<i64>,
    /// Minimum respiration rate
    pub rr_min: Option<i64>,
    /// Maximum respiration rate
    pub rr_max: Option<i64>,
    /// Sleep score (0-100)
    pub sleep_score: Option<i64>,
    /// Time snoring
    pub snoring: Option<i64>,
    /// Snoring episodes
    pub snoringepisodecount: Option<i64>,
}

impl ParseDates for SleepSummary {
    fn parse_dates(&mut self) -> WithingsResult<()> {
        for entry in &mut self.series {
            entry.start_date_parsed = Some(from_unix(entry.startdate)?);
            entry.end_date_parsed = Some(from_unix(entry.enddate)?);
            entry.date_parsed = Some(date_in_zone(&entry.date, &entry.timezone)?);
        }
        Ok(())
    }
}
