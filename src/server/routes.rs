use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use warp::Filter;
use warp::http::{Method, StatusCode};

use crate::constants::MAX_JSON_BODY_SIZE_BYTES;
use crate::error::RelayError;
use crate::handlers::{GeminiRelay, InboundRequest, handle_health_check};
use crate::http::{Upstream, json_response};

pub fn create_routes<U>(
    relay: Arc<GeminiRelay<U>>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
where
    U: Upstream + 'static,
{
    let with_relay = warp::any().map(move || relay.clone());

    let health_route = warp::path!("health")
        .and(warp::get())
        .and(with_relay.clone())
        .map(|r: Arc<GeminiRelay<U>>| json_response(&handle_health_check(&r), StatusCode::OK));

    // Every method reaches the handler; its own guard answers non-POST with 405.
    let gemini_route = warp::path!("api" / "gemini")
        .and(inbound_request())
        .and(with_relay)
        .then(|request: InboundRequest, r: Arc<GeminiRelay<U>>| async move {
            r.handle(request).await
        });

    health_route.or(gemini_route)
}

/// POST bodies are size-limited before they are read; other methods skip
/// the body entirely.
pub(crate) fn inbound_request()
-> impl Filter<Extract = (InboundRequest,), Error = warp::Rejection> + Clone {
    let post_request = warp::post()
        .and(warp::body::content_length_limit(MAX_JSON_BODY_SIZE_BYTES))
        .and(warp::body::bytes())
        .and_then(|body: Bytes| async move {
            parse_inbound_body(&body)
                .map(|body| InboundRequest {
                    method: Method::POST,
                    body,
                })
                .map_err(warp::reject::custom)
        });

    let other_request = warp::method().and_then(|method: Method| async move {
        if method == Method::POST {
            return Err(warp::reject::not_found());
        }
        Ok(InboundRequest {
            method,
            body: Value::Null,
        })
    });

    post_request.or(other_request).unify()
}

/// Empty bodies are forwarded as JSON `null`.
pub(crate) fn parse_inbound_body(body: &[u8]) -> Result<Value, RelayError> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(Value::Null);
    }
    serde_json::from_slice::<Value>(body)
        .map_err(|err| RelayError::invalid_payload(&err.to_string()))
}
