// ABOUTME: Workout session models returned by the getworkouts action
// ABOUTME: Sessions carry unix start/end times plus a local date and IANA timezone
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

/// Body of a `getworkouts` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workouts {
    /// Workout sessions
    #[serde(default)]
    pub series: Vec<Workout>,
    /// Whether more sessions are available past `offset`
    #[serde(default, deserialize_with = "flexible_bool")]
    pub more: bool,
    /// Offset to pass to fetch the next page
    pub offset: Option<i64>,
}

/// A single workout session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workout {
    /// Workout id
    pub id: Option<i64>,
    /// Workout category (walk, run, swim, ...)
    pub category: i32,
    /// IANA timezone of `date`
    pub timezone: String,
    /// Device model
    pub model: Option<i32>,
    /// How the workout was captured
    pub attrib: Option<i32>,
    /// Start time (unix seconds)
    pub startdate: i64,
    /// End time (unix seconds)
    pub enddate: i64,
    /// Local calendar date (`YYYY-MM-DD`)
    pub date: String,
    /// Last modification time (unix seconds)
    pub modified: Option<i64>,
    /// Source device
    pub deviceid: Option<String>,
    /// Workout metrics
    pub data: Option<WorkoutData>,
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

/// Metrics recorded for a workout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutData {
    /// Active calories
    pub calories: Option<f64>,
    /// Effective duration in seconds
    pub effduration: Option<i64>,
    /// Intensity (0-100)
    pub intensity: Option<i64>,
    /// Steps
    pub steps: Option<i64>,
    /// Distance in meters
    pub distance: Option<f64>,
    /// Elevation in meters
    pub elevation: Option<f64>,
    /// Average heart rate
    pub hr_average: Option<i64>,
    /// Minimum heart rate
    pub hr_min: Option<i64>,
    /// Maximum heart rate
    pub hr_max: Option<i64>,
    /// Pool laps
    pub pool_laps: Option<i64>,
    /// Swim strokes
    pub strokes: Option<i64>,
    /// User-entered distance
    pub manual_distance: Option<f64>,
    /// User-entered calories
    pub manual_calories: Option<f64>,
}

impl ParseDates for Workouts {
    fn parse_dates(&mut self) -> WithingsResult<()> {
        for workout in &mut self.series {
            workout.start_date_parsed = Some(from_unix(workout.startdate)?);
            workout.end_date_parsed = Some(from_unix(workout.enddate)?);
            workout.date_parsed = Some(date_in_zone(&workout.date, &workout.timezone)?);
        }
        Ok(())
    }
}
