//! # Auth Service
//!
//! Registration, login and caller identification on top of the user
//! repository and the token manager.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use super::crypto::PasswordPolicy;
use super::errors::{AuthError, AuthResult};
use super::jwt::{JwtConfig, JwtManager};
use super::user::{InMemoryUserRepository, LoginRequest, RegisterRequest, User, UserRepository};

/// Successful login payload
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: String,
}

/// Auth service combining all auth components
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt_manager: JwtManager,
    password_policy: PasswordPolicy,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        jwt_config: JwtConfig,
        password_policy: PasswordPolicy,
    ) -> Self {
        Self {
            users,
            jwt_manager: JwtManager::new(jwt_config),
            password_policy,
        }
    }

    /// Service backed by an empty in-memory user store
    pub fn in_memory(jwt_config: JwtConfig, password_policy: PasswordPolicy) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            jwt_config,
            password_policy,
        )
    }

    /// The underlying user store
    pub fn users(&self) -> &dyn UserRepository {
        self.users.as_ref()
    }

    /// Register a new user
    pub fn register(&self, request: RegisterRequest) -> AuthResult<User> {
        if self.users.find_by_username(&request.username)?.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let user = User::new(
            request.username,
            request.name,
            &request.password,
            &self.password_policy,
        )?;
        self.users.create(&user)?;

        Ok(user)
    }

    /// Check credentials and issue a token
    pub fn login(&self, request: LoginRequest) -> AuthResult<LoginResponse> {
        let user = self
            .users
            .find_by_username(&request.username)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.verify_password(&request.password)? {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt_manager.generate_token(&user)?;

        Ok(LoginResponse {
            token,
            username: user.username,
            name: user.name,
        })
    }

    /// Resolve a bearer token to the caller's user ID
    pub fn authenticate(&self, token: &str) -> AuthResult<Uuid> {
        self.jwt_manager.caller_id(token)
    }
}
