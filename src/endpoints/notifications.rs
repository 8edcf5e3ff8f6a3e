// ABOUTME: Notification subscription endpoints
// ABOUTME: GET /notify with action=subscribe, list, get, and revoke
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use url::Url;

use super::query::{QueryBuilder, QueryPairs, QueryParams};
use super::ApiResponse;
use crate::constants::{actions, endpoints, query_fields};
use crate::errors::WithingsResult;
use crate::models::{EmptyBody, NotificationList, NotificationProfile};
use crate::session::AuthenticatedSession;

/// New subscription for [`AuthenticatedSession::create_notification`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateNotification {
    /// URL Withings will call
    pub callback_url: Url,
    /// Data category to be notified about
    pub appli: i32,
    /// Free-form description
    pub comment: String,
}

impl CreateNotification {
    /// Subscription with an empty comment
    #[must_use]
    pub const fn new(callback_url: Url, appli: i32) -> Self {
        Self {
            callback_url,
            appli,
            comment: String::new(),
        }
    }

    /// Set the comment
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

impl QueryParams for CreateNotification {
    fn query_pairs(&self, _now: DateTime<Utc>) -> QueryPairs {
        QueryBuilder::default()
            .text(query_fields::CALLBACK_URL, Some(self.callback_url.as_str()))
            .text(query_fields::COMMENT, Some(&self.comment))
            .int(query_fields::APPLI, Some(self.appli))
            .finish()
    }
}

/// Filter for [`AuthenticatedSession::list_notifications`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListNotificationsQuery {
    /// Only subscriptions for this category
    pub appli: Option<i32>,
}

impl QueryParams for ListNotificationsQuery {
    fn query_pairs(&self, _now: DateTime<Utc>) -> QueryPairs {
        QueryBuilder::default()
            .int(query_fields::APPLI, self.appli)
            .finish()
    }
}

/// Existing subscription, identified by callback URL and category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTarget {
    /// Subscribed callback URL
    pub callback_url: Url,
    /// Subscribed category
    pub appli: i32,
}

impl QueryParams for NotificationTarget {
    fn query_pairs(&self, _now: DateTime<Utc>) -> QueryPairs {
        QueryBuilder::default()
            .text(query_fields::CALLBACK_URL, Some(self.callback_url.as_str()))
            .int(query_fields::APPLI, Some(self.appli))
            .finish()
    }
}

impl AuthenticatedSession {
    /// Subscribe `callback_url` to notifications
    ///
    /// # Errors
    ///
    /// Any transport, envelope, decode, refresh, or endpoint error.
    pub async fn create_notification(
        &self,
        subscription: &CreateNotification,
    ) -> WithingsResult<ApiResponse<EmptyBody>> {
        self.fetch(
            endpoints::NOTIFY,
            actions::SUBSCRIBE,
            subscription.query_pairs(Utc::now()),
        )
        .await
    }

    /// List subscriptions; each profile's expiry is parsed independently
    ///
    /// # Errors
    ///
    /// Any transport, envelope, decode, refresh, or endpoint error.
    pub async fn list_notifications(
        &self,
        query: &ListNotificationsQuery,
    ) -> WithingsResult<ApiResponse<NotificationList>> {
        self.fetch(
            endpoints::NOTIFY,
            actions::LIST_NOTIFICATIONS,
            query.query_pairs(Utc::now()),
        )
        .await
    }

    /// Details of one subscription
    ///
    /// # Errors
    ///
    /// Any transport, envelope, decode, refresh, or endpoint error.
    pub async fn get_notification_information(
        &self,
        target: &NotificationTarget,
    ) -> WithingsResult<ApiResponse<NotificationProfile>> {
        self.fetch(
            endpoints::NOTIFY,
            actions::GET_NOTIFICATION,
            target.query_pairs(Utc::now()),
        )
        .await
    }

    /// Remove a subscription
    ///
    /// # Errors
    ///
    /// Any transport, envelope, decode, refresh, or endpoint error.
    pub async fn revoke_notification(
        &self,
        target: &NotificationTarget,
    ) -> WithingsResult<ApiResponse<EmptyBody>> {
        self.fetch(
            endpoints::NOTIFY,
            actions::REVOKE_NOTIFICATION,
            target.query_pairs(Utc::now()),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_query_order() {
        let subscription =
            CreateNotification::new(Url::parse("https://example.com/hook").unwrap(), 1)
                .with_comment("weight");
        assert_eq!(
            subscription.query_pairs(Utc::now()),
            vec![
                ("callbackurl", "https://example.com/hook".to_owned()),
                ("comment", "weight".to_owned()),
                ("appli", "1".to_owned()),
            ]
        );
    }

    #[test]
    fn test_list_without_appli_is_empty() {
        assert!(ListNotificationsQuery::default()
            .query_pairs(Utc::now())
            .is_empty());
    }
}
