use serde_json::{Value, json};

use crate::handlers::GeminiRelay;
use crate::http::Upstream;
use crate::logging::LogConfig;

/// Liveness report. Does not contact upstream and never exposes the credential.
pub fn handle_health_check<U: Upstream>(relay: &GeminiRelay<U>) -> Value {
    if LogConfig::get().debug_enabled {
        log::debug!("health check request");
    }
    json!({
        "status": "ok",
        "model": relay.model(),
        "credential_configured": relay.credentials().is_configured(),
        "proxy_version": crate::VERSION,
        "timestamp": chrono::Utc::now().to_rfc3339()
    })
}
