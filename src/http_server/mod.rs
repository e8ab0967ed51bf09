//! # HTTP Server Module
//!
//! Axum server exposing the blog list API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/blogs` - Posts and list statistics
//! - `/api/users` - User registration and listing
//! - `/api/login` - Token issuance

pub mod auth_routes;
pub mod blog_routes;
pub mod config;
pub mod errors;
pub mod health_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult};
pub use server::{build_router, HttpServer};
pub use state::AppState;
