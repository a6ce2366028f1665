use std::fmt;

use clap::Parser;

use crate::constants::{
    CREDENTIAL_ENV_VAR, GEMINI_DEFAULT_BASE_URL, GEMINI_DEFAULT_MODEL, REDACTED,
};
use crate::error::RelayError;

#[derive(Parser, Debug, Clone)]
#[command(name = "gemini-relay")]
#[command(about = "relay that forwards json payloads to the gemini api with a server-held key")]
pub struct Config {
    #[arg(
        long,
        env = "RELAY_LISTEN",
        default_value = "0.0.0.0:3000",
        help = "server listen address"
    )]
    pub listen: String,

    #[arg(
        long,
        env = "GEMINI_UPSTREAM_URL",
        default_value = GEMINI_DEFAULT_BASE_URL,
        help = "gemini api base url"
    )]
    pub upstream_url: String,

    #[arg(
        long,
        env = "GEMINI_MODEL",
        default_value = GEMINI_DEFAULT_MODEL,
        help = "model identifier used for every request"
    )]
    pub model: String,

    #[arg(
        long,
        env = "RELAY_LOG_LEVEL",
        default_value = "info",
        help = "log level (off, error, warn, info, debug, trace)"
    )]
    pub log_level: String,

    #[arg(
        long,
        env = "RELAY_CONNECT_TIMEOUT_SECONDS",
        default_value = "10",
        help = "upstream connect timeout in seconds"
    )]
    pub connect_timeout_seconds: u64,
}

pub fn validate_config(config: &Config) -> Result<(), String> {
    if config.listen.parse::<std::net::SocketAddr>().is_err() {
        return Err(format!("invalid listen address: {}", config.listen));
    }
    if !config.upstream_url.starts_with("http://") && !config.upstream_url.starts_with("https://")
    {
        return Err(format!(
            "invalid upstream URL (must start with http:// or https://): {}",
            config.upstream_url
        ));
    }
    if let Err(e) = url::Url::parse(&config.upstream_url) {
        return Err(format!("invalid upstream URL format: {}", e));
    }
    if config.model.trim().is_empty() {
        return Err("model identifier must not be empty".to_string());
    }
    if config.model.contains(['/', '?', '#']) {
        return Err(format!("invalid model identifier: {}", config.model));
    }
    Ok(())
}

/// Where the upstream credential comes from. Resolved on every request.
#[derive(Clone)]
pub enum CredentialSource {
    Environment(String),
    Static(Option<String>),
}

impl CredentialSource {
    pub fn from_env() -> Self {
        Self::Environment(CREDENTIAL_ENV_VAR.to_string())
    }

    /// Unset and empty values are both treated as missing.
    pub fn resolve(&self) -> Result<String, RelayError> {
        let value = match self {
            Self::Environment(name) => std::env::var(name).ok(),
            Self::Static(value) => value.clone(),
        };
        match value {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(RelayError::credential_not_set()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.resolve().is_ok()
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment(name) => write!(f, "Environment({})", name),
            Self::Static(Some(_)) => write!(f, "Static({})", REDACTED),
            Self::Static(None) => write!(f, "Static(None)"),
        }
    }
}
