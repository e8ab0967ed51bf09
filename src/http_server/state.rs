//! Shared handler state
//!
//! Holds the post store and the auth service, and resolves the caller of
//! a request from its `Authorization` header.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header, HeaderMap};
use uuid::Uuid;

use crate::auth::{AuthError, AuthService, User};
use crate::blog::{InMemoryPostRepository, OwnerSummary, Post, PostRepository, PostView};
use crate::config::AppConfig;
use crate::observability::{Event, Logger};

use super::errors::{ApiError, ApiResult};

/// State shared by every route
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostRepository>, auth: AuthService) -> Self {
        Self { posts, auth }
    }

    /// Empty in-memory stores configured from `config`
    pub fn in_memory(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(InMemoryPostRepository::new()),
            AuthService::in_memory(config.jwt_config(), config.password_policy()),
        )
    }

    /// Identify the caller or fail with 401
    ///
    /// Runs before any mutating operation and before the ownership check.
    pub fn require_caller(&self, headers: &HeaderMap) -> ApiResult<Uuid> {
        let result = match extract_bearer_token(headers) {
            Some(token) => self.auth.authenticate(token),
            None => Err(AuthError::AuthenticationRequired),
        };

        result.map_err(|err| {
            let reason = err.to_string();
            Logger::event(Event::AuthRejected, &[("reason", reason.as_str())]);
            ApiError::from(err)
        })
    }

    /// Check the caller still has a user record
    ///
    /// A valid token for a user that no longer exists is treated as invalid.
    pub fn ensure_caller_exists(&self, caller_id: Uuid) -> ApiResult<()> {
        match self.auth.users().find_by_id(caller_id)? {
            Some(_) => Ok(()),
            None => Err(ApiError::Auth(AuthError::MalformedToken)),
        }
    }

    /// Populate a single post's owner
    pub fn post_view(&self, post: Post) -> ApiResult<PostView> {
        let owner = self
            .auth
            .users()
            .find_by_id(post.owner_id)?
            .map(|user| owner_summary(&user));
        Ok(PostView::new(post, owner))
    }

    /// Populate owners for a list of posts with a single user scan
    pub fn post_views(&self, posts: Vec<Post>) -> ApiResult<Vec<PostView>> {
        let owners: HashMap<Uuid, OwnerSummary> = self
            .auth
            .users()
            .list()?
            .iter()
            .map(|user| (user.id, owner_summary(user)))
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| {
                let owner = owners.get(&post.owner_id).cloned();
                PostView::new(post, owner)
            })
            .collect())
    }
}

fn owner_summary(user: &User) -> OwnerSummary {
    OwnerSummary {
        username: user.username.clone(),
        name: user.name.clone(),
        id: user.id,
    }
}

/// Extract the token from `Authorization: Bearer <token>`
///
/// The scheme is matched case-insensitively.
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}
