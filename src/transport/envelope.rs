// ABOUTME: Strips the Withings {status, body} response envelope
// ABOUTME: Replaces a 200 response body with the exact inner body bytes or fails on vendor status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Every Withings response, errors included, arrives as HTTP 200 wrapped in
//! `{"status": <int>, "body": <any>}`. A non-zero `status` is the real
//! outcome; see <https://developer.withings.com/api-reference/#section/Response-status>.

use bytes::Bytes;
use http::{header::CONTENT_LENGTH, Response, StatusCode};
use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::debug;

use crate::errors::{WithingsError, WithingsResult};

const EMPTY_BODY: &[u8] = b"{}";

#[derive(Deserialize)]
struct Envelope<'a> {
    status: i64,
    #[serde(borrow, default)]
    body: Option<&'a RawValue>,
}

/// Unwrap the envelope of a 200 response
///
/// Non-200 responses are returned untouched. On success the returned
/// response carries the inner `body` bytes exactly as they appeared on the
/// wire (`{}` if the envelope had no body).
///
/// # Errors
///
/// - [`WithingsError::Decode`] if a 200 body is not an envelope
/// - [`WithingsError::Envelope`] if the envelope status is non-zero
pub fn unwrap_envelope(response: Response<Bytes>) -> WithingsResult<Response<Bytes>> {
    if response.status() != StatusCode::OK {
        return Ok(response);
    }

    let (mut parts, body) = response.into_parts();
    let envelope: Envelope<'_> = serde_json::from_slice(&body)
        .map_err(|e| WithingsError::decode("response envelope", e, &body))?;

    if envelope.status != 0 {
        debug!(vendor_status = envelope.status, "Envelope carried non-zero status");
        return Err(WithingsError::Envelope {
            code: envelope.status,
            raw: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    let inner = envelope.body.map_or_else(
        || Bytes::from_static(EMPTY_BODY),
        |raw| body.slice_ref(raw.get().as_bytes()),
    );
    parts.headers.remove(CONTENT_LENGTH);
    Ok(Response::from_parts(parts, inner))
}

/// Body of a successful exchange, or an [`WithingsError::Http`] error
///
/// # Errors
///
/// Returns [`WithingsError::Http`] carrying the status and raw body when the
/// response is not 200.
pub fn into_success_body(
    operation: &'static str,
    response: Response<Bytes>,
) -> WithingsResult<Bytes> {
    let status = response.status();
    let body = response.into_body();
    if status == StatusCode::OK {
        Ok(body)
    } else {
        Err(WithingsError::Http {
            operation,
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}
