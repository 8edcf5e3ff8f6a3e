// ABOUTME: Activity endpoints: daily aggregates and high-frequency intraday samples
// ABOUTME: GET /v2/measure?action=getactivity and action=getintradayactivity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::query::{QueryBuilder, QueryPairs, QueryParams};
use super::ApiResponse;
use crate::constants::{actions, defaults, endpoints, query_fields};
use crate::errors::WithingsResult;
use crate::models::{ActivityMeasures, IntradayActivity};
use crate::session::AuthenticatedSession;

/// Filters for [`AuthenticatedSession::get_activity_measures`]
///
/// Without dates the query covers yesterday through today (UTC).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityQuery {
    /// First day included
    pub start_date: Option<NaiveDate>,
    /// Last day included
    pub end_date: Option<NaiveDate>,
    /// Aggregates modified since this instant
    pub last_update: Option<DateTime<Utc>>,
}

impl QueryParams for ActivityQuery {
    fn query_pairs(&self, now: DateTime<Utc>) -> QueryPairs {
        let today = now.date_naive();
        let start = self.start_date.unwrap_or_else(|| {
            (now - Duration::days(defaults::ACTIVITY_LOOKBACK_DAYS)).date_naive()
        });
        QueryBuilder::default()
            .ymd(query_fields::START_DATE_YMD, Some(start))
            .ymd(query_fields::END_DATE_YMD, Some(self.end_date.unwrap_or(today)))
            .unix(query_fields::LAST_UPDATE, self.last_update)
            .finish()
    }
}

/// Filters for [`AuthenticatedSession::get_intraday_activity`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntradayActivityQuery {
    /// Samples at or after this instant
    pub start_date: Option<DateTime<Utc>>,
    /// Samples at or before this instant
    pub end_date: Option<DateTime<Utc>>,
}

impl QueryParams for IntradayActivityQuery {
    fn query_pairs(&self, _now: DateTime<Utc>) -> QueryPairs {
        QueryBuilder::default()
            .unix(query_fields::START_DATE, self.start_date)
            .unix(query_fields::END_DATE, self.end_date)
            .finish()
    }
}

impl AuthenticatedSession {
    /// Daily activity aggregates
    ///
    /// # Errors
    ///
    /// Any transport, envelope, decode, refresh, or endpoint error.
    pub async fn get_activity_measures(
        &self,
        query: &ActivityQuery,
    ) -> WithingsResult<ApiResponse<ActivityMeasures>> {
        self.fetch(
            endpoints::MEASURE_V2,
            actions::GET_ACTIVITY,
            query.query_pairs(Utc::now()),
        )
        .await
    }

    /// High-frequency activity samples
    ///
    /// # Errors
    ///
    /// Any transport, envelope, decode, refresh, or endpoint error.
    pub async fn get_intraday_activity(
        &self,
        query: &IntradayActivityQuery,
    ) -> WithingsResult<ApiResponse<IntradayActivity>> {
        self.fetch(
            endpoints::MEASURE_V2,
            actions::GET_INTRADAY_ACTIVITY,
            query.query_pairs(Utc::now()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_range_is_yesterday_to_today() {
        let now = DateTime::parse_from_rfc3339("2024-03-15T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            ActivityQuery::default().query_pairs(now),
            vec![
                ("startdateymd", "2024-03-14".to_owned()),
                ("enddateymd", "2024-03-15".to_owned()),
            ]
        );
    }

    #[test]
    fn test_explicit_dates_win() {
        let now = Utc::now();
        let query = ActivityQuery {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31),
            last_update: DateTime::from_timestamp(42, 0),
        };
        assert_eq!(
            query.query_pairs(now),
            vec![
                ("startdateymd", "2024-01-01".to_owned()),
                ("enddateymd", "2024-01-31".to_owned()),
                ("lastupdate", "42".to_owned()),
            ]
        );
    }
}
