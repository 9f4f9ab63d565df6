//! # HTTP Server
//!
//! Main HTTP server combining all site routers behind the route gate.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::config::HttpServerConfig;
use super::content_routes::{content_routes, not_found_handler, SiteState};
use super::gate::{route_gate, RouteGate, NOT_FOUND_PATH};
use super::health_routes::health_routes;
use crate::observability::Event;

/// HTTP Server for the site
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving the given state
    pub fn new(state: Arc<SiteState>) -> Self {
        let config = state.config.server.clone();
        let router = Self::build_router(state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(state: Arc<SiteState>) -> Router {
        let gate = Arc::new(RouteGate::from_config(&state.config));

        let site = Router::new()
            // Health check at root level
            .merge(health_routes())
            // About, education, experience, blog
            .merge(content_routes(state))
            // Rewrite target for gated sections
            .route(NOT_FOUND_PATH, get(not_found_handler))
            .fallback(not_found_handler);

        // The gate rewrites the URI, so it must run before `site` routes it.
        Router::new()
            .fallback_service(site)
            .layer(middleware::from_fn_with_state(gate, route_gate))
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(event = Event::BootComplete.as_str(), %addr, "listening");

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}
