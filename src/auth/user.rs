//! # User Management
//!
//! User model and repository for authentication.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{hash_password, verify_password, PasswordPolicy};
use super::errors::{AuthError, AuthResult};

/// Shortest accepted username
pub const MIN_USERNAME_LENGTH: usize = 3;

/// User model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Login name (unique)
    pub username: String,

    /// Display name
    pub name: String,

    /// Argon2id password hash (never plaintext)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Posts created by this user, oldest first
    #[serde(default)]
    pub posts: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the given username and password
    pub fn new(
        username: String,
        name: String,
        password: &str,
        policy: &PasswordPolicy,
    ) -> AuthResult<Self> {
        validate_username(&username)?;
        policy.validate(password)?;

        let password_hash = hash_password(password)?;

        Ok(Self {
            id: Uuid::new_v4(),
            username,
            name,
            password_hash,
            posts: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// Verify a password against this user's stored hash
    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }

    /// Record a newly created post
    pub fn add_post(&mut self, post_id: Uuid) {
        if !self.posts.contains(&post_id) {
            self.posts.push(post_id);
        }
    }

    /// Forget a deleted post
    pub fn remove_post(&mut self, post_id: Uuid) {
        self.posts.retain(|id| *id != post_id);
    }
}

fn validate_username(username: &str) -> AuthResult<()> {
    if username.trim().chars().count() < MIN_USERNAME_LENGTH {
        return Err(AuthError::InvalidUsername(format!(
            "Username must be at least {} characters",
            MIN_USERNAME_LENGTH
        )));
    }
    Ok(())
}

/// User registration request
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    #[serde(default)]
    pub name: String,
    pub password: String,
}

/// User login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// User repository trait
///
/// Abstracts storage operations for users.
pub trait UserRepository: Send + Sync {
    /// All users in registration order
    fn list(&self) -> AuthResult<Vec<User>>;

    /// Find a user by their ID
    fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>>;

    /// Find a user by their username
    fn find_by_username(&self, username: &str) -> AuthResult<Option<User>>;

    /// Create a new user
    fn create(&self, user: &User) -> AuthResult<()>;

    /// Append a post to its owner's list under a single write
    fn add_post(&self, user_id: Uuid, post_id: Uuid) -> AuthResult<()>;

    /// Drop a post from its owner's list; an unknown user is a no-op
    fn remove_post(&self, user_id: Uuid, post_id: Uuid) -> AuthResult<()>;
}

/// In-memory user repository
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> AuthError {
    AuthError::StorageError("Lock poisoned".to_string())
}

impl UserRepository for InMemoryUserRepository {
    fn list(&self) -> AuthResult<Vec<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.clone())
    }

    fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    fn find_by_username(&self, username: &str) -> AuthResult<Option<User>> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;

        if users.iter().any(|u| u.username == user.username) {
            return Err(AuthError::UsernameTaken);
        }

        users.push(user.clone());
        Ok(())
    }

    fn add_post(&self, user_id: Uuid, post_id: Uuid) -> AuthResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;

        match users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.add_post(post_id);
                Ok(())
            }
            None => Err(AuthError::StorageError("User not found".to_string())),
        }
    }

    fn remove_post(&self, user_id: Uuid, post_id: Uuid) -> AuthResult<()> {
        let mut users = self.users.write().map_err(poisoned)?;

        if let Some(user) = users.iter_mut().find(|u| u.id == user_id) {
            user.remove_post(post_id);
        }
        Ok(())
    }
}
