use std::sync::{Arc, Mutex};

use serde_json::Value;
use warp::Filter;

use crate::config::CredentialSource;
use crate::error::RelayError;
use crate::handlers::GeminiRelay;
use crate::http::{Upstream, UpstreamReply};
use crate::server::handle_rejection;
use crate::server::routes::create_routes;

pub const TEST_KEY: &str = "test-key-123";
pub const TEST_MODEL: &str = "gemini-1.5-flash-latest";
pub const TEST_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Answers every call with the same canned result and records what it was sent.
#[derive(Clone)]
pub struct StubUpstream {
    reply: Result<UpstreamReply, RelayError>,
    pub calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl StubUpstream {
    pub fn replying(status: u16, body: Value) -> Self {
        Self {
            reply: Ok(UpstreamReply { status, body }),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(error: RelayError) -> Self {
        Self {
            reply: Err(error),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<(String, Value)> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl Upstream for StubUpstream {
    async fn generate_content(&self, url: &str, body: &Value) -> Result<UpstreamReply, RelayError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        self.reply.clone()
    }
}

pub fn relay_with<U: Upstream>(upstream: U, key: Option<&str>) -> GeminiRelay<U> {
    GeminiRelay::new(
        upstream,
        CredentialSource::Static(key.map(str::to_string)),
        TEST_BASE_URL,
        TEST_MODEL,
    )
}

pub fn routes_for<U: Upstream + 'static>(
    relay: GeminiRelay<U>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = std::convert::Infallible> + Clone {
    create_routes(Arc::new(relay)).recover(handle_rejection)
}

pub fn body_json(response: &warp::http::Response<bytes::Bytes>) -> Value {
    serde_json::from_slice(response.body()).expect("response body should be JSON")
}

/// What a local upstream stand-in saw for one request
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub content_type: Option<String>,
    pub query: String,
    pub body: Value,
}

/// Serves the relay's routes on an ephemeral local port.
pub async fn spawn_relay<U: Upstream + 'static>(relay: GeminiRelay<U>) -> std::net::SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = routes_for(relay);
    tokio::spawn(async move {
        warp::serve(routes).incoming(listener).run().await;
    });
    addr
}

/// Local server answering every POST with a fixed status and body, standing in for Gemini.
pub async fn spawn_upstream(
    status: u16,
    content_type: &'static str,
    body: &'static str,
) -> (String, Arc<Mutex<Vec<SeenRequest>>>) {
    let seen: Arc<Mutex<Vec<SeenRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();

    let upstream = warp::post()
        .and(warp::path::full())
        .and(warp::header::optional::<String>("content-type"))
        .and(warp::query::raw())
        .and(warp::body::bytes())
        .map(
            move |path: warp::path::FullPath,
                  content_type_seen: Option<String>,
                  query: String,
                  request_body: bytes::Bytes| {
                recorder.lock().unwrap().push(SeenRequest {
                    path: path.as_str().to_string(),
                    content_type: content_type_seen,
                    query,
                    body: serde_json::from_slice(&request_body).unwrap_or(Value::Null),
                });
                warp::reply::with_status(
                    warp::reply::with_header(body, "content-type", content_type),
                    warp::http::StatusCode::from_u16(status).unwrap(),
                )
            },
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = warp::serve(upstream).incoming(listener).run();
    tokio::spawn(server);
    (format!("http://{}", addr), seen)
}
