// ABOUTME: Date and timezone conversion helpers for Withings payloads
// ABOUTME: Unix timestamps to UTC, and calendar date plus IANA zone to an absolute instant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::constants::defaults::YMD_FORMAT;
use crate::errors::{WithingsError, WithingsResult};

/// Convert a unix timestamp (seconds) to UTC
///
/// # Errors
///
/// Returns [`WithingsError::InvalidDate`] when the timestamp is out of range.
pub fn from_unix(timestamp: i64) -> WithingsResult<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp, 0).ok_or_else(|| WithingsError::InvalidDate {
        value: timestamp.to_string(),
        reason: "unix timestamp out of range".to_owned(),
    })
}

/// Resolve an IANA timezone name
///
/// # Errors
///
/// Returns [`WithingsError::UnknownTimezone`] when the name is not in the tz database.
pub fn parse_timezone(name: &str) -> WithingsResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| WithingsError::UnknownTimezone {
            name: name.to_owned(),
        })
}

/// Parse a `YYYY-MM-DD` calendar date
///
/// # Errors
///
/// Returns [`WithingsError::InvalidDate`] when the value is not a valid date.
pub fn parse_ymd(value: &str) -> WithingsResult<NaiveDate> {
    NaiveDate::parse_from_str(value, YMD_FORMAT).map_err(|e| WithingsError::InvalidDate {
        value: value.to_owned(),
        reason: e.to_string(),
    })
}

/// Combine a calendar date and an IANA zone into the start of that day in that zone.
///
/// When local midnight does not exist (DST transition at 00:00) the first
/// valid instant after it is used.
///
/// # Errors
///
/// Returns [`WithingsError::InvalidDate`] or [`WithingsError::UnknownTimezone`].
pub fn date_in_zone(date: &str, zone: &str) -> WithingsResult<DateTime<Tz>> {
    let tz = parse_timezone(zone)?;
    let day = parse_ymd(date)?;
    let midnight = day.and_time(NaiveTime::default());

    tz.from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(midnight + Duration::hours(1)))
                .earliest()
        })
        .ok_or_else(|| WithingsError::InvalidDate {
            value: date.to_owned(),
            reason: format!("no valid local start of day in {zone}"),
        })
}

/// Format a date for `*ymd` query fields
#[must_use]
pub fn format_ymd(date: NaiveDate) -> String {
    date.format(YMD_FORMAT).to_string()
}
