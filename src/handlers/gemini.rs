use std::time::Instant;

use serde_json::Value;
use warp::http::{Method, StatusCode};

use crate::config::CredentialSource;
use crate::constants::{LOG_PREFIX_ERROR, LOG_PREFIX_SUCCESS, LOG_PREFIX_WARNING};
use crate::error::RelayError;
use crate::http::client::build_generate_url;
use crate::http::{Upstream, envelope_response, json_response};
use crate::logging::{log_handler_io, log_request, log_timed};

const ENDPOINT: &str = "generateContent";

pub struct InboundRequest {
    pub method: Method,
    pub body: Value,
}

/// Forwards inbound payloads to Gemini `generateContent` with the server-held key.
pub struct GeminiRelay<U> {
    upstream: U,
    credentials: CredentialSource,
    base_url: String,
    model: String,
}

impl<U: Upstream> GeminiRelay<U> {
    pub fn new(upstream: U, credentials: CredentialSource, base_url: &str, model: &str) -> Self {
        Self {
            upstream,
            credentials,
            base_url: base_url.to_string(),
            model: model.to_string(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn credentials(&self) -> &CredentialSource {
        &self.credentials
    }

    /// Method guard first, then one fault boundary around credential lookup
    /// and the upstream call. Never fails; every outcome is a JSON response.
    pub async fn handle(&self, request: InboundRequest) -> warp::reply::Response {
        let start_time = Instant::now();

        if request.method != Method::POST {
            log_timed(
                LOG_PREFIX_WARNING,
                &format!("rejected {} request", request.method),
                start_time,
            );
            return envelope_response(&RelayError::method_not_allowed());
        }

        match self.relay(&request.body).await {
            Ok(body) => {
                log_timed(LOG_PREFIX_SUCCESS, "gemini generateContent", start_time);
                json_response(&body, StatusCode::OK)
            }
            Err(e) if e.is_upstream_rejection() => {
                let (_, envelope) = e.to_envelope();
                log_timed(
                    LOG_PREFIX_ERROR,
                    &format!(
                        "Gemini API error {}: {}",
                        e.status_code,
                        envelope
                            .details
                            .as_ref()
                            .map(|d| d.to_string())
                            .unwrap_or_default()
                    ),
                    start_time,
                );
                envelope_response(&e)
            }
            Err(e) => {
                log_timed(
                    LOG_PREFIX_ERROR,
                    &format!("internal server error: {}", e.message),
                    start_time,
                );
                envelope_response(&e)
            }
        }
    }

    async fn relay(&self, body: &Value) -> Result<Value, RelayError> {
        let credential = self.credentials.resolve()?;
        let url = build_generate_url(&self.base_url, &self.model, &credential)?;

        log_request(Method::POST.as_str(), &url, Some(&self.model));
        log_handler_io(ENDPOINT, Some(body), None);

        let reply = self.upstream.generate_content(&url, body).await?;
        if !reply.is_success() {
            return Err(RelayError::upstream_rejection(reply.status, reply.body));
        }

        log::debug!("upstream status: {}", reply.status);
        log_handler_io(ENDPOINT, None, Some(&reply.body));
        Ok(reply.body)
    }
}
