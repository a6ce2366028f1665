use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use warp::Filter;
use warp::log::Info as LogInfo;

use crate::config::{Config, CredentialSource};
use crate::constants::CREDENTIAL_ENV_VAR;
use crate::handlers::GeminiRelay;
use crate::http::HttpUpstream;
use crate::logging::{LogConfig, format_duration};
use crate::server::handle_rejection;
use crate::server::routes::create_routes;

pub struct RelayServer {
    pub config: Config,
    pub relay: Arc<GeminiRelay<HttpUpstream>>,
}

impl RelayServer {
    pub fn new(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let upstream = HttpUpstream::new(Duration::from_secs(config.connect_timeout_seconds))?;
        let credentials = CredentialSource::from_env();

        if !credentials.is_configured() {
            log::warn!(
                "{} is not set; requests will fail until it is provided",
                CREDENTIAL_ENV_VAR
            );
        }

        let relay = Arc::new(GeminiRelay::new(
            upstream,
            credentials,
            &config.upstream_url,
            &config.model,
        ));

        Ok(Self { config, relay })
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let addr: SocketAddr = self
            .config
            .listen
            .parse()
            .map_err(|e| format!("invalid listen address '{}': {}", self.config.listen, e))?;

        let access_log = warp::log::custom(|info: LogInfo| {
            let line = format!(
                "{} {} | {} | {}",
                info.method(),
                info.path(),
                info.status(),
                format_duration(info.elapsed())
            );
            match info.status().as_u16() {
                500..=599 => log::error!("{}", line),
                400..=499 => log::warn!("{}", line),
                _ => log::info!("{}", line),
            }
        });

        let cors = warp::cors()
            .allow_any_origin()
            .allow_headers(vec!["Content-Type"])
            .allow_methods(vec!["POST", "GET", "OPTIONS"]);

        let routes = create_routes(self.relay.clone())
            .recover(handle_rejection)
            .with(cors)
            .with(access_log);

        if LogConfig::get().debug_enabled {
            log::info!("starting gemini relay on {} (debug mode)", addr);
        } else {
            log::info!("starting gemini relay on {}", addr);
        }
        log::info!(
            "upstream: {} (model: {})",
            self.config.upstream_url,
            self.config.model
        );

        warp::serve(routes).run(addr).await;

        Ok(())
    }
}
