//! # HTTP Server
//!
//! Combines the endpoint routers into one axum server.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::config::HttpServerConfig;
use super::observability_routes::health_routes;
use super::preference_routes::preference_routes;
use super::sheet_routes::sheet_routes;
use super::state::AppState;

/// HTTP server for the customer API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `state`
    pub fn new(config: HttpServerConfig, state: Arc<AppState>) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(config: &HttpServerConfig, state: Arc<AppState>) -> Router {
        let api = sheet_routes(state.clone()).merge(preference_routes(state));

        Router::new()
            .merge(health_routes())
            .nest("/api", api)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(config.cors_layer()),
            )
    }

    /// Address the server binds to
    pub fn listen_addr(&self) -> io::Result<SocketAddr> {
        self.config.listen_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until Ctrl+C
    pub async fn start(self) -> io::Result<()> {
        let addr = self.listen_addr()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Backend API running on http://{}", addr);
        tracing::info!("  - /health");
        tracing::info!("  - /api/sheet");
        tracing::info!("  - /api/preferences/theme");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Received Ctrl+C, shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::InMemoryTable;

    fn state() -> Arc<AppState> {
        Arc::new(AppState::in_memory(Arc::new(InMemoryTable::with_header())))
    }

    #[test]
    fn test_server_listen_addr() {
        let server = HttpServer::new(HttpServerConfig::default(), state());
        assert_eq!(server.listen_addr().unwrap().port(), 3001);

        let config = HttpServerConfig {
            port: 8080,
            ..Default::default()
        };
        let server = HttpServer::new(config, state());
        assert_eq!(server.listen_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_origins() {
        let config = HttpServerConfig {
            cors_origins: vec![
                "http://localhost:5173".to_string(),
                "bad\norigin".to_string(),
            ],
            ..Default::default()
        };
        let _router = HttpServer::new(config, state()).router();
    }
}
