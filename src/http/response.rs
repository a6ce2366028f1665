use serde_json::Value;
use warp::http::StatusCode;

use crate::constants::{CONTENT_TYPE_JSON, HEADER_CACHE_CONTROL};
use crate::error::{ErrorEnvelope, RelayError};

pub fn json_response(value: &Value, status: StatusCode) -> warp::reply::Response {
    let json_string = serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string());
    let content_length = json_string.len();

    warp::http::Response::builder()
        .status(status)
        .header("Content-Type", CONTENT_TYPE_JSON)
        .header("Content-Length", content_length.to_string())
        .header("Cache-Control", HEADER_CACHE_CONTROL)
        .body(json_string.into())
        .unwrap_or_else(|_| {
            let mut fallback = warp::reply::Response::new("Internal Server Error".into());
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}

/// Renders a fault as its status code and `{ message, details }` envelope.
pub fn envelope_response(error: &RelayError) -> warp::reply::Response {
    let (status_code, envelope) = error.to_envelope();
    let status = StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    json_response(&envelope_value(&envelope), status)
}

pub fn envelope_value(envelope: &ErrorEnvelope) -> Value {
    serde_json::to_value(envelope).unwrap_or(Value::Null)
}
