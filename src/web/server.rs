use axum::{
    http::{header, Method},
    Router,
};
use log::{info, warn};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::network::TieBreakPolicy;
use crate::web::api::{create_router, AppState};

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub bind_address: IpAddr,
    pub enable_cors: bool,
    pub max_sessions: usize,
    /// Tie-break used when a request does not name one
    pub default_tie_break: TieBreakPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3005,
            bind_address: IpAddr::V4(Ipv4Addr::LOCALHOST),
            enable_cors: true,
            max_sessions: 1000,
            default_tie_break: TieBreakPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `NETROUTE_PORT`, `NETROUTE_BIND`,
    /// `NETROUTE_MAX_SESSIONS`, `NETROUTE_TIE_BREAK` and `NETROUTE_CORS`.
    /// Unparsable values are ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(port) = env_value("NETROUTE_PORT") {
            config.port = port;
        }
        if let Some(bind_address) = env_value("NETROUTE_BIND") {
            config.bind_address = bind_address;
        }
        if let Some(max_sessions) = env_value("NETROUTE_MAX_SESSIONS") {
            config.max_sessions = max_sessions;
        }
        if let Some(tie_break) = env_value("NETROUTE_TIE_BREAK") {
            config.default_tie_break = tie_break;
        }
        if let Some(enable_cors) = env_value("NETROUTE_CORS") {
            config.enable_cors = enable_cors;
        }
        config
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

fn env_value<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {}={:?}: not a valid value", name, raw);
            None
        }
    }
}

/// Build the application router for `config`
pub fn build_app(config: &ServerConfig) -> Router {
    let app_state = AppState::with_limits(config.max_sessions, config.default_tie_break);
    let app = Router::new().merge(create_router()).with_state(app_state);

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
        app.layer(ServiceBuilder::new().layer(cors).into_inner())
    } else {
        app
    }
}

/// Start the web server with default configuration on `port`
pub async fn start_server(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    start_server_with_config(ServerConfig {
        port,
        ..Default::default()
    })
    .await
}

/// Start the web server with custom configuration
pub async fn start_server_with_config(
    config: ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_app(&config);
    let addr = config.socket_addr();
    info!("netroute web server starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
