// ABOUTME: Shared test utilities for Withings client integration tests
// ABOUTME: Scripted mock transport that records requests and counts token/data calls
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `withings_client`

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::{HeaderMap, Method, Request, Response, StatusCode};
use withings_client::config::ClientConfig;
use withings_client::errors::{WithingsError, WithingsResult};
use withings_client::transport::HttpTransport;
use withings_client::WithingsClient;

/// Path of the token endpoint in the default configuration
pub const TOKEN_PATH: &str = "/v2/oauth2";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
    });
}

/// One scripted reply
#[derive(Debug, Clone)]
pub enum Reply {
    /// Respond with this status and body
    Http { status: u16, body: Bytes },
    /// Fail as if the connection dropped
    NetworkError,
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::Http {
            status: 200,
            body: Bytes::from(body.into()),
        }
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: Bytes::from(body.into()),
        }
    }
}

/// A request as the mock saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    /// Decoded form fields, in order
    pub fn form(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(&self.body).into_owned().collect()
    }

    /// Decoded query fields, in order
    pub fn query(&self) -> Vec<(String, String)> {
        let url = url::Url::parse(&self.uri).unwrap();
        url.query_pairs().into_owned().collect()
    }

    pub fn path(&self) -> String {
        url::Url::parse(&self.uri).unwrap().path().to_owned()
    }
}

/// Scripted [`HttpTransport`]
///
/// Requests to [`TOKEN_PATH`] get the next token reply, everything else the
/// next data reply. When a queue holds one reply it is repeated forever.
pub struct MockTransport {
    token_replies: Mutex<VecDeque<Reply>>,
    data_replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
    token_calls: AtomicUsize,
    data_calls: AtomicUsize,
    token_latency: Duration,
    data_latency: Duration,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self {
            token_replies: Mutex::new(VecDeque::from([Reply::ok(token_envelope(
                "access-1",
                "refresh-1",
                3600,
            ))])),
            data_replies: Mutex::new(VecDeque::from([Reply::ok(r#"{"status":0,"body":{}}"#)])),
            requests: Mutex::new(Vec::new()),
            token_calls: AtomicUsize::new(0),
            data_calls: AtomicUsize::new(0),
            token_latency: Duration::ZERO,
            data_latency: Duration::ZERO,
        }
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the token reply script
    pub fn with_token_replies(self, replies: impl IntoIterator<Item = Reply>) -> Self {
        *self.token_replies.lock().unwrap() = replies.into_iter().collect();
        self
    }

    /// Replace the data reply script
    pub fn with_data_replies(self, replies: impl IntoIterator<Item = Reply>) -> Self {
        *self.data_replies.lock().unwrap() = replies.into_iter().collect();
        self
    }

    pub const fn with_token_latency(mut self, latency: Duration) -> Self {
        self.token_latency = latency;
        self
    }

    pub const fn with_data_latency(mut self, latency: Duration) -> Self {
        self.data_latency = latency;
        self
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn data_calls(&self) -> usize {
        self.data_calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn data_requests(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path() != TOKEN_PATH)
            .collect()
    }

    pub fn token_requests(&self) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path() == TOKEN_PATH)
            .collect()
    }

    fn next(queue: &Mutex<VecDeque<Reply>>) -> Reply {
        let mut queue = queue.lock().unwrap();
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().expect("reply script is empty")
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: Request<Bytes>) -> WithingsResult<Response<Bytes>> {
        let (parts, body) = request.into_parts();
        let recorded = RecordedRequest {
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body,
        };
        let is_token = recorded.path() == TOKEN_PATH;
        self.requests.lock().unwrap().push(recorded);

        let (reply, latency) = if is_token {
            self.token_calls.fetch_add(1, Ordering::SeqCst);
            (Self::next(&self.token_replies), self.token_latency)
        } else {
            self.data_calls.fetch_add(1, Ordering::SeqCst);
            (Self::next(&self.data_replies), self.data_latency)
        };

        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        match reply {
            Reply::Http { status, body } => {
                let mut response = Response::new(body);
                *response.status_mut() = StatusCode::from_u16(status).unwrap();
                Ok(response)
            }
            Reply::NetworkError => Err(WithingsError::network(
                "HTTP request",
                std::io::Error::new(std::io::ErrorKind::ConnectionReset, "connection reset"),
            )),
        }
    }
}

/// Enveloped token endpoint response
pub fn token_envelope(access: &str, refresh: &str, expires_in: i64) -> String {
    format!(
        r#"{{"status":0,"body":{{"userid":"363","access_token":"{access}","refresh_token":"{refresh}","expires_in":{expires_in},"scope":"user.metrics","csrf_token":"x","token_type":"Bearer"}}}}"#
    )
}

/// Configuration pointing at the default endpoints
pub fn test_config() -> ClientConfig {
    ClientConfig::new("client-id", "client-secret", "https://example.com/callback").unwrap()
}

/// Client over `transport` with the default test configuration
pub fn test_client(transport: &Arc<MockTransport>) -> WithingsClient {
    test_client_with(test_config(), transport)
}

/// Client over `transport` with a custom configuration
pub fn test_client_with(config: ClientConfig, transport: &Arc<MockTransport>) -> WithingsClient {
    init_test_logging();
    WithingsClient::with_transport(config, Arc::clone(transport) as Arc<dyn HttpTransport>)
}

pub fn hours_from_now(hours: i64) -> DateTime<Utc> {
    Utc::now() + chrono::Duration::hours(hours)
}
