use std::convert::Infallible;

use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::constants::{
    MESSAGE_BAD_REQUEST, MESSAGE_INTERNAL_ERROR, MESSAGE_LENGTH_REQUIRED,
    MESSAGE_METHOD_NOT_ALLOWED, MESSAGE_NOT_FOUND,
};
use crate::error::{ErrorEnvelope, RelayError};
use crate::http::response::envelope_value;
use crate::http::{envelope_response, json_response};

pub async fn handle_rejection(rejection: Rejection) -> Result<impl Reply, Infallible> {
    if let Some(relay_err) = rejection.find::<RelayError>() {
        log::warn!("rejected request: {}", relay_err);
        return Ok(envelope_response(relay_err));
    }
    if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        return Ok(envelope_response(&RelayError::payload_too_large()));
    }
    if let Some(header_err) = rejection.find::<warp::reject::InvalidHeader>() {
        return Ok(bad_request(header_err.to_string()));
    }
    if let Some(header_err) = rejection.find::<warp::reject::MissingHeader>() {
        return Ok(bad_request(header_err.to_string()));
    }

    let (status, message) = if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, MESSAGE_NOT_FOUND)
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, MESSAGE_METHOD_NOT_ALLOWED)
    } else if rejection.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, MESSAGE_LENGTH_REQUIRED)
    } else {
        log::error!("unhandled rejection: {:?}", rejection);
        (StatusCode::INTERNAL_SERVER_ERROR, MESSAGE_INTERNAL_ERROR)
    };

    Ok(json_response(
        &envelope_value(&ErrorEnvelope::new(message)),
        status,
    ))
}

fn bad_request(details: String) -> warp::reply::Response {
    json_response(
        &envelope_value(&ErrorEnvelope::with_details(
            MESSAGE_BAD_REQUEST,
            serde_json::Value::String(details),
        )),
        StatusCode::BAD_REQUEST,
    )
}
