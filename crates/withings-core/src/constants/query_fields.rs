// ABOUTME: Static wire names for the query parameters of every data endpoint
// ABOUTME: Field-to-wire mapping is resolved at compile time instead of by runtime lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// API verb selecting the operation on a shared path
pub const ACTION: &str = "action";
/// Unix timestamp lower bound
pub const START_DATE: &str = "startdate";
/// Unix timestamp upper bound
pub const END_DATE: &str = "enddate";
/// `YYYY-MM-DD` lower bound
pub const START_DATE_YMD: &str = "startdateymd";
/// `YYYY-MM-DD` upper bound
pub const END_DATE_YMD: &str = "enddateymd";
/// Only return data modified after this unix timestamp
pub const LAST_UPDATE: &str = "lastupdate";
/// Device type filter
pub const DEV_TYPE: &str = "devtype";
/// Measure type filter
pub const MEAS_TYPE: &str = "meastype";
/// Measure category (1 = real, 2 = objective)
pub const CATEGORY: &str = "category";
/// Page size
pub const LIMIT: &str = "limit";
/// Page offset
pub const OFFSET: &str = "offset";
/// Notification callback URL
pub const CALLBACK_URL: &str = "callbackurl";
/// Notification comment
pub const COMMENT: &str = "comment";
/// Notification application (data category) id
pub const APPLI: &str = "appli";
