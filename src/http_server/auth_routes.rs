//! User and Login HTTP Routes

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{LoginRequest, LoginResponse, RegisterRequest, User};
use crate::blog::Post;
use crate::observability::{Event, Logger};

use super::blog_routes::json_body;
use super::errors::ApiResult;
use super::state::AppState;

/// `/api/users` routes
pub fn user_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_users_handler).post(register_handler))
        .with_state(state)
}

/// `/api/login` routes
pub fn login_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(login_handler))
        .with_state(state)
}

// ==================
// Response Types
// ==================

/// Post fields shown under a user
#[derive(Debug, Clone, Serialize)]
pub struct UserPost {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    pub id: Uuid,
}

impl From<&Post> for UserPost {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            author: post.author.clone(),
            url: post.url.clone(),
            likes: post.likes,
            id: post.id,
        }
    }
}

/// A user with their posts populated
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub blogs: Vec<UserPost>,
}

impl UserResponse {
    /// Resolve the user's post IDs; posts that vanished are skipped
    fn new(user: &User, posts: &HashMap<Uuid, &Post>) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            name: user.name.clone(),
            blogs: user
                .posts
                .iter()
                .filter_map(|id| posts.get(id).map(|post| UserPost::from(*post)))
                .collect(),
        }
    }
}

// ==================
// Handlers
// ==================

/// List users with their posts
async fn list_users_handler(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    let posts = state.posts.list()?;
    let by_id: HashMap<Uuid, &Post> = posts.iter().map(|post| (post.id, post)).collect();

    let users = state.auth.users().list()?;
    Ok(Json(
        users
            .iter()
            .map(|user| UserResponse::new(user, &by_id))
            .collect(),
    ))
}

/// Register a new user
async fn register_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let request = json_body(body)?;
    let user = state.auth.register(request)?;

    let user_id = user.id.to_string();
    Logger::event(
        Event::UserRegistered,
        &[("user", user_id.as_str()), ("username", user.username.as_str())],
    );

    Ok((StatusCode::CREATED, Json(UserResponse::new(&user, &HashMap::new()))))
}

/// Exchange username and password for a token
async fn login_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let request = json_body(body)?;
    let username = request.username.clone();

    match state.auth.login(request) {
        Ok(response) => {
            Logger::event(Event::LoginSucceeded, &[("username", username.as_str())]);
            Ok(Json(response))
        }
        Err(err) => {
            Logger::event(Event::LoginFailed, &[("username", username.as_str())]);
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_response_skips_missing_posts() {
        let mut user = User {
            id: Uuid::new_v4(),
            username: "tester".to_string(),
            name: "Test".to_string(),
            password_hash: String::new(),
            posts: Vec::new(),
            created_at: chrono::Utc::now(),
        };
        let post = Post::new(
            "t".to_string(),
            "a".to_string(),
            "u".to_string(),
            2,
            user.id,
        );
        user.add_post(post.id);
        user.add_post(Uuid::new_v4());

        let posts = HashMap::from([(post.id, &post)]);
        let response = UserResponse::new(&user, &posts);

        assert_eq!(response.blogs.len(), 1);
        assert_eq!(response.blogs[0].title, "t");

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
