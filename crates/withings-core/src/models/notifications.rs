// ABOUTME: Notification subscription models for the notify endpoint
// ABOUTME: Profiles pair a callback URL with an application id and an expiry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dates::from_unix;
use super::ParseDates;
use crate::errors::WithingsResult;

/// Body of a notification `list` response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationList {
    /// Active subscriptions
    #[serde(default)]
    pub profiles: Vec<NotificationProfile>,
}

/// A notification subscription; also the body of a notification `get`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationProfile {
    /// Application (data category) id
    pub appli: i32,
    /// URL notified on new data
    pub callbackurl: String,
    /// Subscription expiry (unix seconds)
    pub expires: Option<i64>,
    /// Free-text comment
    pub comment: Option<String>,
    /// Parsed `expires`
    #[serde(skip)]
    pub expires_parsed: Option<DateTime<Utc>>,
}

impl ParseDates for NotificationProfile {
    fn parse_dates(&mut self) -> WithingsResult<()> {
        self.expires_parsed = self.expires.map(from_unix).transpose()?;
        Ok(())
    }
}

impl ParseDates for NotificationList {
    fn parse_dates(&mut self) -> WithingsResult<()> {
        self.profiles
            .iter_mut()
            .try_for_each(NotificationProfile::parse_dates)
    }
}
