use std::sync::OnceLock;
use std::time::{Duration, Instant};

use crate::constants::{
    GEMINI_KEY_PARAM, LOG_BODY_PREVIEW_CHARS, LOG_PREFIX_ERROR, LOG_PREFIX_SUCCESS,
    LOG_PREFIX_WARNING, REDACTED,
};

pub struct LogConfig {
    pub debug_enabled: bool,
}

static LOG_CONFIG: OnceLock<LogConfig> = OnceLock::new();

impl LogConfig {
    pub fn init(debug: bool) {
        LOG_CONFIG.get_or_init(|| LogConfig {
            debug_enabled: debug,
        });
    }

    pub fn get() -> &'static LogConfig {
        LOG_CONFIG.get().unwrap_or_else(|| {
            static FALLBACK: LogConfig = LogConfig {
                debug_enabled: false,
            };
            &FALLBACK
        })
    }
}

pub fn log_request(method: &str, url: &str, model: Option<&str>) {
    let url = sanitize_log_message(&redact_credential(url));
    match model {
        Some(m) => log::info!("{} {} (model: {})", method, url, sanitize_log_message(m)),
        None => log::info!("{} {}", method, url),
    }
}

pub fn log_timed(prefix: &str, operation: &str, start: Instant) {
    let duration = start.elapsed();
    let formatted_duration = format_duration(duration);

    match prefix {
        LOG_PREFIX_SUCCESS => log::info!("{} | {}", operation, formatted_duration),
        LOG_PREFIX_ERROR => log::error!("{} | {}", operation, formatted_duration),
        LOG_PREFIX_WARNING => log::warn!("{} | {}", operation, formatted_duration),
        _ => log::info!("{} | {}", operation, formatted_duration),
    }
}

pub fn format_duration(duration: Duration) -> String {
    let total_nanos = duration.as_nanos();

    if total_nanos < 1_000_000 {
        format!("{:.1}µs", total_nanos as f64 / 1_000.0)
    } else if total_nanos < 1_000_000_000 {
        format!("{:.2}ms", total_nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2}s", total_nanos as f64 / 1_000_000_000.0)
    }
}

pub fn sanitize_log_message(message: &str) -> String {
    message
        .chars()
        .map(|c| {
            if c.is_control() && !matches!(c, '\t' | '\n' | '\r') {
                '?'
            } else {
                c
            }
        })
        .collect()
}

/// Replaces the value of the `key` query parameter. Strings that do not
/// parse as URLs are returned unchanged.
pub fn redact_credential(raw: &str) -> String {
    let Ok(mut parsed) = url::Url::parse(raw) else {
        return raw.to_string();
    };
    if !parsed.query_pairs().any(|(name, _)| name == GEMINI_KEY_PARAM) {
        return raw.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(name, value)| {
            if name == GEMINI_KEY_PARAM {
                (name.into_owned(), REDACTED.to_string())
            } else {
                (name.into_owned(), value.into_owned())
            }
        })
        .collect();

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.to_string()
}

/// Debug-logs the payload sent to Gemini and the body it answered with.
/// Bodies can carry base64 images, so long ones are cut short.
pub fn log_handler_io(
    endpoint: &str,
    body: Option<&serde_json::Value>,
    response: Option<&serde_json::Value>,
) {
    if !LogConfig::get().debug_enabled {
        return;
    }
    if let Some(body_value) = body {
        log::debug!("{} request: {}", endpoint, body_preview(body_value));
    }
    if let Some(response_value) = response {
        log::debug!("{} response: {}", endpoint, body_preview(response_value));
    }
}

pub fn body_preview(value: &serde_json::Value) -> String {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_default();
    let total_chars = rendered.chars().count();
    if total_chars <= LOG_BODY_PREVIEW_CHARS {
        return sanitize_log_message(&rendered);
    }
    let head: String = rendered.chars().take(LOG_BODY_PREVIEW_CHARS).collect();
    format!(
        "{}... ({} more chars)",
        sanitize_log_message(&head),
        total_chars - LOG_BODY_PREVIEW_CHARS
    )
}
