//! # Auth Module
//!
//! User accounts, password hashing and bearer tokens.

pub mod crypto;
pub mod errors;
pub mod jwt;
pub mod service;
pub mod user;

pub use crypto::PasswordPolicy;
pub use errors::{AuthError, AuthResult};
pub use jwt::{JwtClaims, JwtConfig, JwtManager};
pub use service::{AuthService, LoginResponse};
pub use user::{InMemoryUserRepository, LoginRequest, RegisterRequest, User, UserRepository};
