//! bloglist - a minimal blog list REST API
//!
//! Posts, users with token authentication, ownership-scoped deletion and
//! aggregate statistics over the list of posts.

pub mod auth;
pub mod blog;
pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
