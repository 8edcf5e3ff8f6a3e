// ABOUTME: Error taxonomy for the Withings client token lifecycle and request pipeline
// ABOUTME: Distinguishes transport, envelope, decode, refresh, and endpoint-level failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Withings Errors
//!
//! Every failure surfaces as a [`WithingsError`] carrying enough context
//! (HTTP status, vendor status code, raw body) to diagnose it. Nothing in the
//! client retries; the error is the whole story.
//!
//! The categories map onto the request pipeline:
//!
//! - **Transport**: [`WithingsError::Http`], [`WithingsError::Network`],
//!   [`WithingsError::Timeout`]
//! - **Envelope**: [`WithingsError::Envelope`] (HTTP 200 but vendor status != 0)
//! - **Decode**: [`WithingsError::Decode`], [`WithingsError::OutOfRange`]
//! - **Refresh**: [`WithingsError::Refresh`] wraps any of the above when it
//!   happened while obtaining a token

use std::error::Error as StdError;
use std::time::Duration;

use crate::models::oauth::GrantType;

/// Boxed error used for opaque network-layer sources
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result alias used throughout the client
pub type WithingsResult<T> = Result<T, WithingsError>;

/// Errors produced by the Withings client
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum WithingsError {
    /// Server answered with a non-200 HTTP status
    #[error("{operation} returned HTTP {status}: {body}")]
    Http {
        /// Operation that issued the request
        operation: &'static str,
        /// HTTP status code
        status: u16,
        /// Raw response body (lossy UTF-8)
        body: String,
    },

    /// Request could not be sent or the response could not be read
    #[error("{operation} failed: {source}")]
    Network {
        /// Operation that issued the request
        operation: &'static str,
        /// Underlying I/O or client error
        #[source]
        source: BoxError,
    },

    /// The exchange did not complete within the configured deadline
    #[error("{operation} timed out after {}ms", timeout.as_millis())]
    Timeout {
        /// Operation that timed out
        operation: &'static str,
        /// Deadline that was exceeded
        timeout: Duration,
    },

    /// HTTP 200 whose envelope carried a non-zero vendor status.
    /// See <https://developer.withings.com/api-reference/#section/Response-status>
    #[error("Withings API returned status {code} in envelope, full body was: {raw}")]
    Envelope {
        /// Vendor status code
        code: i64,
        /// Full raw response body
        raw: String,
    },

    /// Malformed JSON at the envelope or payload layer
    #[error("Failed to decode {context}: {source}")]
    Decode {
        /// What was being decoded
        context: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
        /// Raw bytes that failed to decode (lossy UTF-8)
        raw: String,
    },

    /// Obtaining a token failed; the triggering request was not sent
    #[error("Token {grant} exchange failed: {source}")]
    Refresh {
        /// Grant that was being exchanged
        grant: GrantType,
        /// Cause of the failure
        #[source]
        source: Box<WithingsError>,
    },

    /// Well-formed JSON carrying a value the client cannot represent
    #[error("Out-of-range value in {context}: {reason}")]
    OutOfRange {
        /// What was being decoded
        context: &'static str,
        /// Offending field and value
        reason: String,
        /// Raw bytes of the response (lossy UTF-8)
        raw: String,
    },

    /// The decoded payload carried its own non-zero status
    #[error("Endpoint '{action}' returned status {status}: {message}")]
    Endpoint {
        /// API action that was called
        action: &'static str,
        /// Status carried by the payload
        status: i64,
        /// Error message carried by the payload
        message: String,
        /// Raw unwrapped payload
        raw: String,
    },

    /// A calendar date field could not be parsed
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate {
        /// Offending value
        value: String,
        /// Reason the value was rejected
        reason: String,
    },

    /// A timezone field did not name a known IANA zone
    #[error("Unknown timezone '{name}'")]
    UnknownTimezone {
        /// Offending zone name
        name: String,
    },

    /// An outbound request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Client configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// The authorization state value could not be generated
    #[error("Failed to generate authorization state: {0}")]
    StateGeneration(String),
}

impl WithingsError {
    /// Build a `Network` error from any source error
    pub fn network(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Network {
            operation,
            source: source.into(),
        }
    }

    /// Build a `Decode` error keeping a lossy copy of the offending bytes
    #[must_use]
    pub fn decode(context: &'static str, source: serde_json::Error, raw: &[u8]) -> Self {
        Self::Decode {
            context,
            source,
            raw: String::from_utf8_lossy(raw).into_owned(),
        }
    }

    /// Wrap a failure that happened while exchanging a grant
    #[must_use]
    pub fn refresh(grant: GrantType, source: Self) -> Self {
        Self::Refresh {
            grant,
            source: Box::new(source),
        }
    }

    /// Whether this is a transport-level failure (non-200, network, timeout)
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http { .. } | Self::Network { .. } | Self::Timeout { .. }
        )
    }

    /// Whether this error (or its refresh cause) is a timeout
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Refresh { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// HTTP status code, when the failure came from a non-200 response
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Refresh { source, .. } => source.status_code(),
            _ => None,
        }
    }

    /// Vendor status code from the envelope or the payload
    #[must_use]
    pub fn vendor_code(&self) -> Option<i64> {
        match self {
            Self::Envelope { code, .. } => Some(*code),
            Self::Endpoint { status, .. } => Some(*status),
            Self::Refresh { source, .. } => source.vendor_code(),
            _ => None,
        }
    }

    /// Raw response body captured with the error, if any
    #[must_use]
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            Self::Http { body, .. } => Some(body),
            Self::Envelope { raw, .. }
            | Self::Decode { raw, .. }
            | Self::OutOfRange { raw, .. }
            | Self::Endpoint { raw, .. } => Some(raw),
            Self::Refresh { source, .. } => source.raw_body(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        let http = WithingsError::Http {
            operation: "data request",
            status: 500,
            body: "boom".to_owned(),
        };
        assert!(http.is_transport());
        assert_eq!(http.status_code(), Some(500));
        assert_eq!(http.raw_body(), Some("boom"));

        let envelope = WithingsError::Envelope {
            code: 401,
            raw: r#"{"status":401}"#.to_owned(),
        };
        assert!(!envelope.is_transport());
        assert_eq!(envelope.vendor_code(), Some(401));
    }

    #[test]
    fn test_refresh_delegates_to_cause() {
        let cause = WithingsError::Timeout {
            operation: "token exchange",
            timeout: Duration::from_secs(5),
        };
        let err = WithingsError::refresh(GrantType::RefreshToken, cause);

        assert!(err.is_timeout());
        assert!(!err.is_transport());
        assert!(err.to_string().contains("refresh_token"));
    }
}
