//! # HTTP Server
//!
//! Combines all endpoint routers and serves them.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::auth_routes::{login_routes, user_routes};
use super::blog_routes::blog_routes;
use super::config::HttpServerConfig;
use super::health_routes::health_routes;
use super::state::AppState;
use crate::config::AppConfig;
use crate::observability::{Event, Logger};

/// HTTP server for the blog list API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Server over empty in-memory stores
    pub fn new(config: &AppConfig) -> Self {
        Self::with_state(config.server.clone(), AppState::in_memory(config))
    }

    /// Server over the given state
    pub fn with_state(config: HttpServerConfig, state: AppState) -> Self {
        let router = build_router(&config, state);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address: {}", e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;

        let addr = addr.to_string();
        Logger::event(Event::ServerStart, &[("addr", addr.as_str())]);

        axum::serve(listener, self.router).await
    }
}

/// Build the combined router with all endpoints
pub fn build_router(config: &HttpServerConfig, state: AppState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .merge(health_routes())
        .nest("/api/blogs", blog_routes(state.clone()))
        .nest("/api/users", user_routes(state.clone()))
        .nest("/api/login", login_routes(state))
        .layer(cors_layer(config))
}

fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
    // No configured origins: allow any, for development
    let origin = if config.cors_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<_> = config
            .cors_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
