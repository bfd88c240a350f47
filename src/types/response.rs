// src/types/response.rs
//! Normalization of `/api/generate` responses.
//!
//! Some deployments return the result directly, others wrap it in an
//! envelope `{ "statusCode": 200, "body": "<json string>" }`. Everything is
//! funnelled through [`decode_response`] so callers only ever see a
//! [`Decoded`] value or a [`DecodeError`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Bodies containing one of these come from the hosting platform, not the
/// generation handler.
const INFRASTRUCTURE_MARKERS: &[&str] = &[
    "FUNCTION_INVOCATION_FAILED",
    "FUNCTION_INVOCATION_TIMEOUT",
    "EDGE_FUNCTION_INVOCATION_FAILED",
    "An error occurred with your deployment",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub resume: String,
    pub cover_letter: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Success(GenerationResult),
    /// The server reported a failure. `message` is its own wording, if any.
    Failure { message: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("empty response body")]
    Empty,

    #[error("hosting platform failure ({0})")]
    Infrastructure(&'static str),

    #[error("response is not valid JSON: {0}")]
    NotJson(String),

    #[error("envelope body is not valid JSON: {0}")]
    EnvelopeBody(String),

    #[error("unexpected response shape")]
    Shape,
}

/// Decode an HTTP status and raw body into a typed outcome.
///
/// Precedence: empty body, platform failure markers (on non-2xx or non-JSON
/// bodies) and non-JSON bodies are errors; an envelope is unwrapped once
/// and its `statusCode` replaces `status`; a non-null `error` wins over any
/// result fields; a non-2xx status without `error` is a failure without
/// message; otherwise missing `resume` or `cover_letter` default to empty
/// strings.
pub fn decode_response(status: u16, body: &str) -> Result<Decoded, DecodeError> {
    if body.trim().is_empty() {
        return Err(DecodeError::Empty);
    }

    if !(200..300).contains(&status) {
        if let Some(marker) = platform_marker(body) {
            return Err(DecodeError::Infrastructure(marker));
        }
    }

    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            return Err(match platform_marker(body) {
                Some(marker) => DecodeError::Infrastructure(marker),
                None => DecodeError::NotJson(e.to_string()),
            })
        }
    };
    let (status, payload) = unwrap_envelope(status, value)?;

    match payload.get("error") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => {}
        Some(error) => {
            return Ok(Decoded::Failure {
                message: describe_error(error),
            })
        }
    }

    if !(200..300).contains(&status) {
        return Ok(Decoded::Failure { message: None });
    }

    let object = payload.as_object().ok_or(DecodeError::Shape)?;
    Ok(Decoded::Success(GenerationResult {
        resume: string_field(object, "resume"),
        cover_letter: string_field(object, "cover_letter"),
    }))
}

fn unwrap_envelope(status: u16, value: Value) -> Result<(u16, Value), DecodeError> {
    let mut object = match value {
        Value::Object(object) => object,
        other => return Ok((status, other)),
    };

    if !(object.contains_key("statusCode") && object.contains_key("body")) {
        return Ok((status, Value::Object(object)));
    }

    let code = object
        .get("statusCode")
        .and_then(Value::as_u64)
        .and_then(|code| u16::try_from(code).ok())
        .ok_or(DecodeError::Shape)?;
    let payload = match object.remove("body").unwrap_or(Value::Null) {
        Value::String(encoded) => serde_json::from_str(&encoded)
            .map_err(|e| DecodeError::EnvelopeBody(e.to_string()))?,
        other => other,
    };

    Ok((code, payload))
}

/// Only consulted for non-2xx or non-JSON bodies, since generated text may
/// quote these strings.
fn platform_marker(body: &str) -> Option<&'static str> {
    INFRASTRUCTURE_MARKERS
        .iter()
        .copied()
        .find(|marker| body.contains(marker))
}

fn describe_error(error: &Value) -> Option<String> {
    match error {
        Value::String(message) if message.trim().is_empty() => None,
        Value::String(message) => Some(message.clone()),
        Value::Object(fields) => match fields.get("message") {
            Some(Value::String(message)) => Some(message.clone()),
            _ => Some(error.to_string()),
        },
        other => Some(other.to_string()),
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
