// ABOUTME: Workouts endpoint
// ABOUTME: GET /v2/measure?action=getworkouts over an optional calendar-date range
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, NaiveDate, Utc};

use super::query::{QueryBuilder, QueryPairs, QueryParams};
use super::ApiResponse;
use crate::constants::{actions, endpoints, query_fields};
use crate::errors::WithingsResult;
use crate::models::Workouts;
use crate::session::AuthenticatedSession;

/// Filters for [`AuthenticatedSession::get_workouts`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkoutsQuery {
    /// First day included
    pub start_date: Option<NaiveDate>,
    /// Last day included
    pub end_date: Option<NaiveDate>,
}

impl QueryParams for WorkoutsQuery {
    fn query_pairs(&self, _now: DateTime<Utc>) -> QueryPairs {
        QueryBuilder::default()
            .ymd(query_fields::START_DATE_YMD, self.start_date)
            .ymd(query_fields::END_DATE_YMD, self.end_date)
            .finish()
    }
}

impl AuthenticatedSession {
    /// Workout sessions
    ///
    /// # Errors
    ///
    /// Any transport, envelope, decode, refresh, or endpoint error.
    pub async fn get_workouts(
        &self,
        query: &WorkoutsQuery,
    ) -> WithingsResult<ApiResponse<Workouts>> {
        self.fetch(
            endpoints::MEASURE_V2,
            actions::GET_WORKOUTS,
            query.query_pairs(Utc::now()),
        )
        .await
    }
}
