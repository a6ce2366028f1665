use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use warp::reject::Reject;

use crate::constants::{
    ERROR_CREDENTIAL_NOT_SET, MESSAGE_INTERNAL_ERROR, MESSAGE_INVALID_PAYLOAD,
    MESSAGE_METHOD_NOT_ALLOWED, MESSAGE_PAYLOAD_TOO_LARGE, MESSAGE_UPSTREAM_ERROR,
};

/// JSON body of every non-200 response produced by the relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            details: None,
        }
    }

    pub fn with_details(message: &str, details: Value) -> Self {
        Self {
            message: message.to_string(),
            details: Some(details),
        }
    }
}

/// Error type for the relay
#[derive(Debug, Clone)]
pub struct RelayError {
    pub message: String,
    pub status_code: u16,
    kind: RelayErrorKind,
}

#[derive(Debug, Clone)]
enum RelayErrorKind {
    MethodNotAllowed,
    Configuration,
    UpstreamRejection(Value),
    UpstreamTransport,
    InvalidPayload,
    PayloadTooLarge,
}

impl RelayError {
    pub fn method_not_allowed() -> Self {
        Self {
            message: MESSAGE_METHOD_NOT_ALLOWED.to_string(),
            status_code: 405,
            kind: RelayErrorKind::MethodNotAllowed,
        }
    }

    pub fn credential_not_set() -> Self {
        Self::configuration(ERROR_CREDENTIAL_NOT_SET)
    }

    pub fn configuration(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status_code: 500,
            kind: RelayErrorKind::Configuration,
        }
    }

    /// Upstream answered with a non-success status; `body` is its parsed error payload.
    pub fn upstream_rejection(status_code: u16, body: Value) -> Self {
        Self {
            message: format!("Gemini API returned status {}", status_code),
            status_code,
            kind: RelayErrorKind::UpstreamRejection(body),
        }
    }

    pub fn upstream_transport(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status_code: 500,
            kind: RelayErrorKind::UpstreamTransport,
        }
    }

    pub fn invalid_payload(message: &str) -> Self {
        Self {
            message: message.to_string(),
            status_code: 400,
            kind: RelayErrorKind::InvalidPayload,
        }
    }

    pub fn payload_too_large() -> Self {
        Self {
            message: MESSAGE_PAYLOAD_TOO_LARGE.to_string(),
            status_code: 413,
            kind: RelayErrorKind::PayloadTooLarge,
        }
    }

    pub fn is_upstream_rejection(&self) -> bool {
        matches!(self.kind, RelayErrorKind::UpstreamRejection(_))
    }

    /// Maps the fault onto the status and envelope the caller receives.
    pub fn to_envelope(&self) -> (u16, ErrorEnvelope) {
        let envelope = match &self.kind {
            RelayErrorKind::MethodNotAllowed => ErrorEnvelope::new(MESSAGE_METHOD_NOT_ALLOWED),
            RelayErrorKind::UpstreamRejection(body) => {
                ErrorEnvelope::with_details(MESSAGE_UPSTREAM_ERROR, body.clone())
            }
            RelayErrorKind::Configuration | RelayErrorKind::UpstreamTransport => {
                ErrorEnvelope::with_details(
                    MESSAGE_INTERNAL_ERROR,
                    Value::String(self.message.clone()),
                )
            }
            RelayErrorKind::InvalidPayload => ErrorEnvelope::with_details(
                MESSAGE_INVALID_PAYLOAD,
                Value::String(self.message.clone()),
            ),
            RelayErrorKind::PayloadTooLarge => ErrorEnvelope::new(MESSAGE_PAYLOAD_TOO_LARGE),
        };
        (self.status_code, envelope)
    }
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RelayError {}: {}", self.status_code, self.message)
    }
}

impl Error for RelayError {}

impl Reject for RelayError {}
