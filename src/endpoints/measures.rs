// ABOUTME: Body measures endpoint (weight, fat mass, blood pressure, ...)
// ABOUTME: GET /measure?action=getmeas with optional date, type, and paging filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};

use super::query::{QueryBuilder, QueryPairs, QueryParams};
use super::ApiResponse;
use crate::constants::{actions, endpoints, query_fields};
use crate::errors::WithingsResult;
use crate::models::BodyMeasures;
use crate::session::AuthenticatedSession;

/// Filters for [`AuthenticatedSession::get_body_measures`]; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyMeasuresQuery {
    /// Measures taken at or after this instant
    pub start_date: Option<DateTime<Utc>>,
    /// Measures taken at or before this instant
    pub end_date: Option<DateTime<Utc>>,
    /// Measures created or modified since this instant
    pub last_update: Option<DateTime<Utc>>,
    /// Device type filter
    pub dev_type: Option<i32>,
    /// Measure type filter
    pub meas_type: Option<i32>,
    /// 1 for real measures, 2 for user objectives
    pub category: Option<i32>,
    /// Maximum number of groups returned
    pub limit: Option<u32>,
    /// Paging offset from a previous response
    pub offset: Option<u32>,
}

impl QueryParams for BodyMeasuresQuery {
    fn query_pairs(&self, _now: DateTime<Utc>) -> QueryPairs {
        QueryBuilder::default()
            .unix(query_fields::START_DATE, self.start_date)
            .unix(query_fields::END_DATE, self.end_date)
            .unix(query_fields::LAST_UPDATE, self.last_update)
            .int(query_fields::DEV_TYPE, self.dev_type)
            .int(query_fields::MEAS_TYPE, self.meas_type)
            .int(query_fields::CATEGORY, self.category)
            .int(query_fields::LIMIT, self.limit)
            .int(query_fields::OFFSET, self.offset)
            .finish()
    }
}

impl AuthenticatedSession {
    /// Body measures of the user
    ///
    /// # Errors
    ///
    /// Any transport, envelope, decode, refresh, or endpoint error.
    pub async fn get_body_measures(
        &self,
        query: &BodyMeasuresQuery,
    ) -> WithingsResult<ApiResponse<BodyMeasures>> {
        self.fetch(
            endpoints::MEASURE,
            actions::GET_MEASURES,
            query.query_pairs(Utc::now()),
        )
        .await
    }
}
