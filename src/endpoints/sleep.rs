// ABOUTME: Sleep endpoints: high-frequency sleep states and nightly summaries
// ABOUTME: GET /v2/sleep?action=get and action=getsummary with last-day defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::query::{QueryBuilder, QueryPairs, QueryParams};
use super::ApiResponse;
use crate::constants::{actions, defaults, endpoints, query_fields};
use crate::errors::WithingsResult;
use crate::models::{SleepMeasures, SleepSummary};
use crate::session::AuthenticatedSession;

/// Filters for [`AuthenticatedSession::get_sleep_measures`]
///
/// A missing end defaults to now; a missing start to 24 hours before the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SleepMeasuresQuery {
    /// Window start
    pub start_date: Option<DateTime<Utc>>,
    /// Window end
    pub end_date: Option<DateTime<Utc>>,
}

impl QueryParams for SleepMeasuresQuery {
    fn query_pairs(&self, now: DateTime<Utc>) -> QueryPairs {
        let end = self.end_date.unwrap_or(now);
        let start = self
            .start_date
            .unwrap_or_else(|| end - Duration::hours(defaults::SLEEP_LOOKBACK_HOURS));
        QueryBuilder::default()
            .unix(query_fields::START_DATE, Some(start))
            .unix(query_fields::END_DATE, Some(end))
            .finish()
    }
}

/// Filters for [`AuthenticatedSession::get_sleep_summary`]
///
/// Without dates the query covers yesterday through today (UTC).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SleepSummaryQuery {
    /// First night included
    pub start_date: Option<NaiveDate>,
    /// Last night included
    pub end_date: Option<NaiveDate>,
    /// Summaries modified since this instant
    pub last_update: Option<DateTime<Utc>>,
}

impl QueryParams for SleepSummaryQuery {
    fn query_pairs(&self, now: DateTime<Utc>) -> QueryPairs {
        let start = self
            .start_date
            .unwrap_or_else(|| (now - Duration::days(1)).date_naive());
        QueryBuilder::default()
            .ymd(query_fields::START_DATE_YMD, Some(start))
            .ymd(
                query_fields::END_DATE_YMD,
                Some(self.end_date.unwrap_or_else(|| now.date_naive())),
            )
            .unix(query_fields::LAST_UPDATE, self.last_update)
            .finish()
    }
}

impl AuthenticatedSession {
    /// Sleep state samples
    ///
    /// # Errors
    ///
    /// Any transport, envelope, decode, refresh, or endpoint error.
    pub async fn get_sleep_measures(
        &self,
        query: &SleepMeasuresQuery,
    ) -> WithingsResult<ApiResponse<SleepMeasures>> {
        self.fetch(
            endpoints::SLEEP_V2,
            actions::GET_SLEEP,
            query.query_pairs(Utc::now()),
        )
        .await
    }

    /// Nightly sleep summaries
    ///
    /// # Errors
    ///
    /// Any transport, envelope, decode, refresh, or endpoint error.
    pub async fn get_sleep_summary(
        &self,
        query: &SleepSummaryQuery,
    ) -> WithingsResult<ApiResponse<SleepSummary>> {
        self.fetch(
            endpoints::SLEEP_V2,
            actions::GET_SLEEP_SUMMARY,
            query.query_pairs(Utc::now()),
        )
        .await
    }
}
