use std::future::Future;
use std::time::Duration;

use serde_json::Value;

use crate::constants::{
    GEMINI_API_VERSION, GEMINI_GENERATE_ACTION, GEMINI_KEY_PARAM, UPSTREAM_CONTENT_TYPE,
};
use crate::error::RelayError;
use crate::http::error::map_reqwest_error;

/// Status and fully-read JSON body of one upstream call
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

impl UpstreamReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The single outbound call the relay makes.
pub trait Upstream: Send + Sync {
    fn generate_content(
        &self,
        url: &str,
        body: &Value,
    ) -> impl Future<Output = Result<UpstreamReply, RelayError>> + Send;
}

pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    pub fn new(connect_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()?;
        Ok(Self { client })
    }
}

impl Upstream for HttpUpstream {
    async fn generate_content(&self, url: &str, body: &Value) -> Result<UpstreamReply, RelayError> {
        let response = self
            .client
            .post(url)
            .header("Content-Type", UPSTREAM_CONTENT_TYPE)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let body = response.json::<Value>().await.map_err(|e| {
            RelayError::upstream_transport(&format!(
                "invalid JSON from Gemini API: {}",
                e.without_url()
            ))
        })?;

        Ok(UpstreamReply { status, body })
    }
}

/// Builds `{base}/v1beta/models/{model}:generateContent?key={credential}`.
pub fn build_generate_url(
    base_url: &str,
    model: &str,
    credential: &str,
) -> Result<String, RelayError> {
    let raw = format!(
        "{}/{}/models/{}:{}",
        base_url.trim_end_matches('/'),
        GEMINI_API_VERSION,
        model,
        GEMINI_GENERATE_ACTION
    );
    let mut url = url::Url::parse(&raw)
        .map_err(|e| RelayError::configuration(&format!("invalid upstream URL: {}", e)))?;
    url.query_pairs_mut().append_pair(GEMINI_KEY_PARAM, credential);
    Ok(url.to_string())
}
