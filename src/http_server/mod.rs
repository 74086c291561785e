//! # HTTP Server Module
//!
//! Axum server exposing the customer record store.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/sheet` - Customer list and create
//! - `/api/sheet/:id` - Customer get, update and delete
//! - `/api/preferences/theme` - Theme preference

pub mod config;
pub mod errors;
pub mod observability_routes;
pub mod preference_routes;
pub mod server;
pub mod sheet_routes;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::HttpServer;
pub use state::AppState;
