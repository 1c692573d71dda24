//! Error taxonomy for calls to the logbook REST API.
//!
//! Every variant renders to the single line shown in a page's alert banner.

use serde_json::Value;
use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Error {action}: {message}")]
    Transport { action: String, message: String },
    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Status {
        action: String,
        status: u16,
        message: String,
    },
    /// A successful response whose body could not be read.
    #[error("Error {action}: {message}")]
    Decode { action: String, message: String },
}

impl ApiError {
    pub fn transport(action: &str, err: impl Display) -> Self {
        ApiError::Transport {
            action: action.to_string(),
            message: err.to_string(),
        }
    }

    pub fn decode(action: &str, err: impl Display) -> Self {
        ApiError::Decode {
            action: action.to_string(),
            message: err.to_string(),
        }
    }

    /// Builds the error for a non-2xx response from its raw body.
    ///
    /// The body's `message` member is preferred, then `error`; anything else
    /// falls back to a generic line naming the action and status.
    pub fn from_response_body(action: &str, status: u16, body: &str) -> Self {
        let message = extract_message(body)
            .unwrap_or_else(|| format!("Error {}: HTTP {}", action, status));
        ApiError::Status {
            action: action.to_string(),
            status,
            message,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .filter_map(|name| value.get(*name).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}
