//! Blog HTTP Routes
//!
//! CRUD for posts plus the aggregated list statistics.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use uuid::Uuid;

use crate::auth::AuthError;
use crate::blog::{
    can_delete, BlogError, LikesUpdate, ListStats, NewPostRequest, Post, PostView,
};
use crate::observability::{Event, Logger};

use super::errors::{ApiError, ApiResult};
use super::state::AppState;

/// Blog routes with shared state
pub fn blog_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route("/stats", get(stats_handler))
        .route(
            "/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .with_state(state)
}

/// Parse a path segment as a post ID
pub(crate) fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::MalformedId)
}

/// Unwrap a JSON body, keeping the JSON error format on rejection
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> ApiResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::InvalidBody(rejection.body_text()))
}

// ==================
// Handlers
// ==================

/// List all posts with owners populated
async fn list_handler(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<PostView>>> {
    let posts = state.posts.list()?;
    Ok(Json(state.post_views(posts)?))
}

/// Aggregates over every stored post
async fn stats_handler(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    let posts = state.posts.list()?;
    // Serialize while `posts` is still borrowed by the stats
    Ok(Json(ListStats::compute(&posts)).into_response())
}

/// Fetch a single post
async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<PostView>> {
    let id = parse_id(&id)?;
    let post = state.posts.find_by_id(id)?.ok_or(BlogError::NotFound)?;
    Ok(Json(state.post_view(post)?))
}

/// Create a post owned by the caller
async fn create_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<NewPostRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PostView>)> {
    let caller_id = state.require_caller(&headers)?;
    let new_post = json_body(body)?.validate()?;
    state.ensure_caller_exists(caller_id)?;

    let post = Post::from_new(new_post, caller_id);
    state.posts.create(&post)?;
    state.auth.users().add_post(caller_id, post.id)?;

    let post_id = post.id.to_string();
    let user_id = caller_id.to_string();
    Logger::event(
        Event::PostCreated,
        &[("post", post_id.as_str()), ("user", user_id.as_str())],
    );

    Ok((StatusCode::CREATED, Json(state.post_view(post)?)))
}

/// Replace a post's likes count
async fn update_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<LikesUpdate>, JsonRejection>,
) -> ApiResult<Json<PostView>> {
    state.require_caller(&headers)?;
    let id = parse_id(&id)?;
    let likes = json_body(body)?.validate()?;

    let post = state
        .posts
        .update_likes(id, likes)?
        .ok_or(BlogError::NotFound)?;

    let post_id = post.id.to_string();
    let likes = likes.to_string();
    Logger::event(
        Event::PostUpdated,
        &[("likes", likes.as_str()), ("post", post_id.as_str())],
    );

    Ok(Json(state.post_view(post)?))
}

/// Delete a post; only its owner may do so
async fn delete_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let caller_id = state.require_caller(&headers)?;
    let id = parse_id(&id)?;

    let post = state.posts.find_by_id(id)?.ok_or(BlogError::NotFound)?;

    let post_id = post.id.to_string();
    let user_id = caller_id.to_string();
    let fields = [("post", post_id.as_str()), ("user", user_id.as_str())];

    if !can_delete(&caller_id, &post.owner_id) {
        Logger::event(Event::DeleteDenied, &fields);
        return Err(AuthError::Unauthorized.into());
    }

    // A concurrent delete may have won the race since the lookup
    if !state.posts.delete(post.id)? {
        return Err(BlogError::NotFound.into());
    }
    state.auth.users().remove_post(post.owner_id, post.id)?;

    Logger::event(Event::PostDeleted, &fields);
    Ok(StatusCode::NO_CONTENT)
}
