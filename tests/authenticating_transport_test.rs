// ABOUTME: Tests for bearer authentication, on-demand refresh, and single-flight refresh
// ABOUTME: Covers expired/valid/unauthenticated sessions, refresh failure, timeout, and cancellation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use common::{
    hours_from_now, test_client, test_client_with, test_config, token_envelope, MockTransport,
    Reply,
};
use futures_util::future::join_all;
use http::{header::AUTHORIZATION, Method, Request};
use withings_client::endpoints::BodyMeasuresQuery;
use withings_client::errors::WithingsError;
use withings_client::models::GrantType;
use withings_client::oauth2_client::TokenState;
use withings_client::SessionOrigin;

fn data_request() -> Request<Bytes> {
    Request::builder()
        .method(Method::GET)
        .uri("https://wbsapi.withings.net/measure?action=getmeas")
        .body(Bytes::new())
        .unwrap()
}

#[tokio::test]
async fn test_valid_token_makes_no_refresh() {
    let mock = Arc::new(MockTransport::new());
    let session = test_client(&mock).session_from_access_token("A", "R", hours_from_now(1));
    assert_eq!(session.origin(), SessionOrigin::FromAccessToken);

    session.send(data_request()).await.unwrap();

    assert_eq!(mock.token_calls(), 0);
    assert_eq!(mock.data_calls(), 1);
    let sent = &mock.data_requests()[0];
    assert_eq!(sent.headers.get(AUTHORIZATION).unwrap(), "Bearer A");
}

#[tokio::test]
async fn test_expired_token_refreshes_exactly_once() {
    let mock = Arc::new(
        MockTransport::new().with_token_replies([Reply::ok(token_envelope("A2", "R2", 3600))]),
    );
    let session = test_client(&mock).session_from_access_token("A1", "R1", hours_from_now(-1));
    assert_eq!(session.state().await, TokenState::Expired);

    session.send(data_request()).await.unwrap();
    session.send(data_request()).await.unwrap();

    assert_eq!(mock.token_calls(), 1);
    assert_eq!(mock.data_calls(), 2);
    assert_eq!(session.state().await, TokenState::Valid);
    assert_eq!(session.refresh_token().await, "R2");

    let refresh_form = mock.token_requests()[0].form();
    assert!(refresh_form.contains(&("refresh_token".to_owned(), "R1".to_owned())));
    for sent in mock.data_requests() {
        assert_eq!(sent.headers.get(AUTHORIZATION).unwrap(), "Bearer A2");
    }
}

#[tokio::test]
async fn test_refresh_token_session_is_lazy() {
    let mock = Arc::new(MockTransport::new());
    let session = test_client(&mock).session_from_refresh_token("R0");

    assert_eq!(session.origin(), SessionOrigin::FromRefreshToken);
    assert_eq!(session.state().await, TokenState::Unauthenticated);
    assert!(session.token().await.is_none());
    assert_eq!(mock.token_calls(), 0);

    session.send(data_request()).await.unwrap();
    assert_eq!(mock.token_calls(), 1);
    assert_eq!(session.token().await.unwrap().access_token, "access-1");
}

#[tokio::test]
async fn test_code_session_is_eager() {
    let mock = Arc::new(MockTransport::new());
    let session = test_client(&mock).session_from_code("code-1").await.unwrap();

    assert_eq!(session.origin(), SessionOrigin::FromCode);
    assert_eq!(mock.token_calls(), 1);
    assert_eq!(session.state().await, TokenState::Valid);
}

#[tokio::test]
async fn test_concurrent_callers_share_one_refresh() {
    let mock = Arc::new(
        MockTransport::new()
            .with_token_replies([Reply::ok(token_envelope("A2", "R2", 3600))])
            .with_token_latency(Duration::from_millis(50)),
    );
    let session = test_client(&mock).session_from_access_token("A1", "R1", hours_from_now(-1));

    let query = BodyMeasuresQuery::default();
    let results = join_all((0..10).map(|_| session.get_body_measures(&query))).await;

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(mock.token_calls(), 1);
    assert_eq!(mock.data_calls(), 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_tasks_share_one_refresh() {
    let mock = Arc::new(
        MockTransport::new()
            .with_token_replies([Reply::ok(token_envelope("A2", "R2", 3600))])
            .with_token_latency(Duration::from_millis(50)),
    );
    let session = Arc::new(test_client(&mock).session_from_refresh_token("R1"));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.send(data_request()).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(mock.token_calls(), 1);
    assert_eq!(mock.data_calls(), 8);
}

#[tokio::test]
async fn test_refresh_failure_sends_nothing() {
    let mock = Arc::new(
        MockTransport::new().with_token_replies([Reply::ok(r#"{"status":401,"body":{}}"#)]),
    );
    let session = test_client(&mock).session_from_access_token("A1", "R1", hours_from_now(-1));

    let err = session.send(data_request()).await.unwrap_err();

    match &err {
        WithingsError::Refresh { grant, source } => {
            assert_eq!(*grant, GrantType::RefreshToken);
            assert!(matches!(**source, WithingsError::Envelope { code: 401, .. }));
        }
        other => panic!("expected refresh error, got {other:?}"),
    }
    assert_eq!(mock.data_calls(), 0);
    assert_eq!(session.state().await, TokenState::Expired);
    assert_eq!(session.refresh_token().await, "R1");
}

#[tokio::test]
async fn test_network_failure_during_refresh() {
    let mock = Arc::new(MockTransport::new().with_token_replies([Reply::NetworkError]));
    let session = test_client(&mock).session_from_refresh_token("R1");

    let err = session.send(data_request()).await.unwrap_err();
    assert!(matches!(err, WithingsError::Refresh { .. }));
    assert_eq!(mock.data_calls(), 0);
}

#[tokio::test]
async fn test_data_envelope_error_surfaces() {
    let mock = Arc::new(
        MockTransport::new().with_data_replies([Reply::ok(r#"{"status":401,"body":{}}"#)]),
    );
    let session = test_client(&mock).session_from_access_token("A", "R", hours_from_now(1));

    let err = session.send(data_request()).await.unwrap_err();
    assert_eq!(err.vendor_code(), Some(401));
}

#[tokio::test]
async fn test_timeout_covers_slow_request() {
    let mock = Arc::new(MockTransport::new().with_data_latency(Duration::from_millis(500)));
    let config = test_config().with_timeout(Duration::from_millis(50));
    let session =
        test_client_with(config, &mock).session_from_access_token("A", "R", hours_from_now(1));

    let err = session.send(data_request()).await.unwrap_err();
    assert!(err.is_timeout());
    assert!(matches!(err, WithingsError::Timeout { .. }));
}

#[tokio::test]
async fn test_timed_out_refresh_leaves_token_untouched() {
    let mock = Arc::new(MockTransport::new().with_token_latency(Duration::from_millis(500)));
    let config = test_config().with_timeout(Duration::from_millis(50));
    let session = test_client_with(config, &mock).session_from_refresh_token("R0");

    let err = session.send(data_request()).await.unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(mock.data_calls(), 0);
    assert_eq!(session.state().await, TokenState::Unauthenticated);
    assert_eq!(session.refresh_token().await, "R0");
}

#[tokio::test]
async fn test_ensure_token_and_force_refresh() {
    let mock = Arc::new(MockTransport::new().with_token_replies([
        Reply::ok(token_envelope("A1", "R1", 3600)),
        Reply::ok(token_envelope("A2", "R2", 3600)),
    ]));
    let session = test_client(&mock).session_from_refresh_token("R0");

    let first = session.ensure_token().await.unwrap();
    assert_eq!(first.access_token, "A1");
    let again = session.ensure_token().await.unwrap();
    assert_eq!(again.access_token, "A1");
    assert_eq!(mock.token_calls(), 1);

    let forced = session.force_refresh().await.unwrap();
    assert_eq!(forced.access_token, "A2");
    assert_eq!(session.refresh_token().await, "R2");
    assert_eq!(mock.token_calls(), 2);
}

#[tokio::test]
async fn test_refresh_leeway_refreshes_early() {
    let mock = Arc::new(MockTransport::new());
    let config = test_config().with_refresh_leeway(Duration::from_secs(7200));
    let session =
        test_client_with(config, &mock).session_from_access_token("A", "R", hours_from_now(1));

    assert_eq!(session.state().await, TokenState::Expired);
    session.send(data_request()).await.unwrap();
    assert_eq!(mock.token_calls(), 1);
}
