use crate::error::RelayError;

/// reqwest errors carry the request URL, which holds the credential, so it is
/// stripped before the message reaches logs or callers.
pub fn map_reqwest_error(err: reqwest::Error) -> RelayError {
    let message = if err.is_connect() {
        format!("failed to connect to Gemini API: {}", err.without_url())
    } else if err.is_timeout() {
        format!("Gemini API request timed out: {}", err.without_url())
    } else {
        format!("Gemini API request failed: {}", err.without_url())
    };
    log::error!("HTTP request failed: {}", message);
    RelayError::upstream_transport(&message)
}
