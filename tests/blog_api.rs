//! Blog API Tests
//!
//! Drives the full router in-process:
//! - Listing, creating, updating and deleting posts
//! - Likes default and required-field validation
//! - Credential precondition on mutating routes
//! - Ownership-scoped deletion
//! - List statistics, users and login

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use bloglist::config::AppConfig;
use bloglist::http_server::{build_router, AppState};

// =============================================================================
// Helper Functions
// =============================================================================

fn app() -> Router {
    let config = AppConfig::default();
    build_router(&config.server, AppState::in_memory(&config))
}

struct Reply {
    status: StatusCode,
    content_type: Option<String>,
    body: Value,
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    Reply {
        status,
        content_type,
        body,
    }
}

/// Register a user and return a token for them
async fn user_token(app: &Router, username: &str) -> String {
    let created = send(
        app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({"username": username, "name": "Name", "password": "password1"})),
    )
    .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let login = send(
        app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({"username": username, "password": "password1"})),
    )
    .await;
    assert_eq!(login.status, StatusCode::OK);
    login.body["token"].as_str().unwrap().to_string()
}

/// App seeded with two posts owned by "username1"
async fn seeded() -> (Router, String) {
    let app = app();
    let token = user_token(&app, "username1").await;

    for post in [
        json!({"title": "title1", "author": "author1", "url": "url1", "likes": 4}),
        json!({"title": "title2", "author": "author2", "url": "url2", "likes": 3}),
    ] {
        let reply = send(&app, Method::POST, "/api/blogs", Some(token.as_str()), Some(post)).await;
        assert_eq!(reply.status, StatusCode::CREATED);
    }

    (app, token)
}

async fn all_posts(app: &Router) -> Vec<Value> {
    let reply = send(app, Method::GET, "/api/blogs", None, None).await;
    reply.body.as_array().unwrap().clone()
}

fn id_of(post: &Value) -> String {
    post["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_posts_are_returned_as_json() {
    let (app, _) = seeded().await;

    let reply = send(&app, Method::GET, "/api/blogs", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.content_type.unwrap().starts_with("application/json"));
    assert_eq!(reply.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_unique_identifier_is_named_id() {
    let (app, _) = seeded().await;

    for post in all_posts(&app).await {
        assert!(post["id"].is_string());
        assert!(post.get("_id").is_none());
    }
}

#[tokio::test]
async fn test_posts_have_owner_populated() {
    let (app, _) = seeded().await;

    let posts = all_posts(&app).await;
    assert_eq!(posts[0]["user"]["username"], "username1");
    assert_eq!(posts[0]["user"]["name"], "Name");
    assert!(posts[0]["user"]["id"].is_string());
}

#[tokio::test]
async fn test_get_single_post() {
    let (app, _) = seeded().await;
    let posts = all_posts(&app).await;
    let first = &posts[0];

    let reply = send(
        &app,
        Method::GET,
        &format!("/api/blogs/{}", id_of(first)),
        None,
        None,
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["title"], "title1");
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn test_post_can_be_added() {
    let (app, token) = seeded().await;

    let reply = send(
        &app,
        Method::POST,
        "/api/blogs",
        Some(token.as_str()),
        Some(json!({"title": "Latest Blog", "author": "Latest Author", "url": "Latest URL", "likes": 7})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);
    assert!(reply.content_type.unwrap().starts_with("application/json"));
    assert_eq!(reply.body["likes"], 7);

    assert_eq!(all_posts(&app).await.len(), 3);
}

#[tokio::test]
async fn test_missing_likes_defaults_to_zero() {
    let (app, token) = seeded().await;

    let reply = send(
        &app,
        Method::POST,
        "/api/blogs",
        Some(token.as_str()),
        Some(json!({"title": "Latest Blog", "author": "Latest Author", "url": "Latest URL"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED);

    let posts = all_posts(&app).await;
    let added = posts.iter().find(|p| p["title"] == "Latest Blog").unwrap();
    assert_eq!(added["likes"], 0);
}

#[tokio::test]
async fn test_missing_title_is_rejected() {
    let (app, token) = seeded().await;

    let reply = send(
        &app,
        Method::POST,
        "/api/blogs",
        Some(token.as_str()),
        Some(json!({"author": "Latest Author", "url": "Latest URL"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        reply.body["error"],
        "Blog validation failed: title: Path `title` is required."
    );
    assert_eq!(all_posts(&app).await.len(), 2);
}

#[tokio::test]
async fn test_missing_url_is_rejected() {
    let (app, token) = seeded().await;

    let reply = send(
        &app,
        Method::POST,
        "/api/blogs",
        Some(token.as_str()),
        Some(json!({"title": "Latest Blog", "author": "Latest Author"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        reply.body["error"],
        "Blog validation failed: url: Path `url` is required."
    );
}

#[tokio::test]
async fn test_malformed_json_keeps_error_format() {
    let app = app();
    let token = user_token(&app, "username1").await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/blogs")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn test_create_requires_credential() {
    let (app, _) = seeded().await;
    let post = json!({"title": "t", "author": "a", "url": "u"});

    let missing = send(&app, Method::POST, "/api/blogs", None, Some(post.clone())).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"], "token missing");

    let invalid = send(&app, Method::POST, "/api/blogs", Some("garbage"), Some(post)).await;
    assert_eq!(invalid.status, StatusCode::UNAUTHORIZED);

    assert_eq!(all_posts(&app).await.len(), 2);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_likes_can_be_updated() {
    let (app, token) = seeded().await;
    let id = id_of(&all_posts(&app).await[1]);

    let reply = send(
        &app,
        Method::PUT,
        &format!("/api/blogs/{}", id),
        Some(token.as_str()),
        Some(json!({"likes": 10})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["likes"], 10);
    assert_eq!(reply.body["title"], "title2");
}

#[tokio::test]
async fn test_update_of_unknown_post() {
    let (app, token) = seeded().await;

    let reply = send(
        &app,
        Method::PUT,
        &format!("/api/blogs/{}", uuid::Uuid::new_v4()),
        Some(token.as_str()),
        Some(json!({"likes": 1})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Deletion
// =============================================================================

#[tokio::test]
async fn test_owner_can_delete() {
    let (app, token) = seeded().await;
    let id = id_of(&all_posts(&app).await[0]);

    let reply = send(
        &app,
        Method::DELETE,
        &format!("/api/blogs/{}", id),
        Some(token.as_str()),
        None,
    )
    .await;
    assert_eq!(reply.status, StatusCode::NO_CONTENT);

    let posts = all_posts(&app).await;
    assert_eq!(posts.len(), 1);
    assert!(posts.iter().all(|p| id_of(p) != id));

    // Owner's post list is kept in step
    let users = send(&app, Method::GET, "/api/users", None, None).await;
    assert_eq!(users.body[0]["blogs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_other_user_cannot_delete() {
    let (app, _) = seeded().await;
    let intruder = user_token(&app, "username2").await;
    let id = id_of(&all_posts(&app).await[0]);

    let reply = send(
        &app,
        Method::DELETE,
        &format!("/api/blogs/{}", id),
        Some(intruder.as_str()),
        None,
    )
    .await;
    assert_eq!(reply.status, StatusCode::FORBIDDEN);
    assert_eq!(reply.body["error"], "only the creator can delete a blog");
    assert_eq!(all_posts(&app).await.len(), 2);
}

#[tokio::test]
async fn test_delete_requires_credential() {
    let (app, _) = seeded().await;
    let id = id_of(&all_posts(&app).await[0]);

    let reply = send(&app, Method::DELETE, &format!("/api/blogs/{}", id), None, None).await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(all_posts(&app).await.len(), 2);
}

#[tokio::test]
async fn test_delete_of_unknown_or_malformed_id() {
    let (app, token) = seeded().await;

    let unknown = send(
        &app,
        Method::DELETE,
        &format!("/api/blogs/{}", uuid::Uuid::new_v4()),
        Some(token.as_str()),
        None,
    )
    .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let malformed = send(&app, Method::DELETE, "/api/blogs/12345", Some(token.as_str()), None).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body["error"], "malformatted id");
}

// =============================================================================
// Statistics
// =============================================================================

#[tokio::test]
async fn test_stats_of_seeded_posts() {
    let (app, _) = seeded().await;

    let reply = send(&app, Method::GET, "/api/blogs/stats", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["totalLikes"], 7);
    assert_eq!(
        reply.body["favouritePost"],
        json!({"title": "title1", "author": "author1", "likes": 4})
    );
    assert_eq!(
        reply.body["authorWithMostPosts"],
        json!({"author": "author1", "postCount": 1})
    );
    assert_eq!(
        reply.body["authorWithMostLikes"],
        json!({"author": "author1", "likeTotal": 4})
    );
}

#[tokio::test]
async fn test_stats_of_empty_list() {
    let app = app();

    let reply = send(&app, Method::GET, "/api/blogs/stats", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["totalLikes"], 0);
    assert!(reply.body["favouritePost"].is_null());
    assert!(reply.body["authorWithMostPosts"].is_null());
    assert!(reply.body["authorWithMostLikes"].is_null());
}

#[tokio::test]
async fn test_stats_with_likes_beyond_u64() {
    let app = app();
    let token = user_token(&app, "username1").await;

    for likes in [u64::MAX, 1] {
        let reply = send(
            &app,
            Method::POST,
            "/api/blogs",
            Some(token.as_str()),
            Some(json!({"title": "big", "author": "author1", "url": "url", "likes": likes})),
        )
        .await;
        assert_eq!(reply.status, StatusCode::CREATED);
    }

    let reply = send(&app, Method::GET, "/api/blogs/stats", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);

    // 2^64 does not fit a u64 and is parsed back as a float
    let two_pow_64 = 18_446_744_073_709_551_616.0;
    assert!(reply.body["totalLikes"].as_u64().is_none());
    assert_eq!(reply.body["totalLikes"].as_f64(), Some(two_pow_64));
    assert_eq!(
        reply.body["authorWithMostLikes"]["likeTotal"].as_f64(),
        Some(two_pow_64)
    );
    assert_eq!(reply.body["favouritePost"]["likes"], u64::MAX);
}

// =============================================================================
// Users and Login
// =============================================================================

#[tokio::test]
async fn test_users_list_their_posts() {
    let (app, _) = seeded().await;

    let reply = send(&app, Method::GET, "/api/users", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);

    let user = &reply.body[0];
    assert_eq!(user["username"], "username1");
    assert!(user.get("password_hash").is_none());

    let titles: Vec<&str> = user["blogs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["title1", "title2"]);
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let app = app();
    user_token(&app, "username1").await;

    let reply = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({"username": "username1", "name": "Other", "password": "password2"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CONFLICT);
    assert_eq!(reply.body["error"], "expected `username` to be unique");
}

#[tokio::test]
async fn test_short_password_is_rejected() {
    let app = app();

    let reply = send(
        &app,
        Method::POST,
        "/api/users",
        None,
        Some(json!({"username": "username1", "name": "Name", "password": "pw"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = app();
    user_token(&app, "username1").await;

    let reply = send(
        &app,
        Method::POST,
        "/api/login",
        None,
        Some(json!({"username": "username1", "password": "wrong"})),
    )
    .await;
    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.body["error"], "invalid username or password");
}

#[tokio::test]
async fn test_health() {
    let reply = send(&app(), Method::GET, "/health", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "ok");
}

// =============================================================================
// Concurrent Requests
// =============================================================================

async fn owner_blog_count(app: &Router) -> usize {
    let reply = send(app, Method::GET, "/api/users", None, None).await;
    reply.body[0]["blogs"].as_array().unwrap().len()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_creates_and_deletes_keep_owner_list() {
    let app = app();
    let token = user_token(&app, "username1").await;

    let creates: Vec<_> = (0..200)
        .map(|i| {
            let app = app.clone();
            let token = token.clone();
            tokio::spawn(async move {
                let post = json!({"title": format!("t{}", i), "author": "a", "url": "u"});
                send(&app, Method::POST, "/api/blogs", Some(token.as_str()), Some(post)).await
            })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in creates {
        let reply = handle.await.unwrap();
        assert_eq!(reply.status, StatusCode::CREATED);
        ids.push(id_of(&reply.body));
    }

    assert_eq!(all_posts(&app).await.len(), 200);
    assert_eq!(owner_blog_count(&app).await, 200);

    let deletes: Vec<_> = ids
        .into_iter()
        .take(100)
        .map(|id| {
            let app = app.clone();
            let token = token.clone();
            tokio::spawn(async move {
                let uri = format!("/api/blogs/{}", id);
                send(&app, Method::DELETE, &uri, Some(token.as_str()), None).await
            })
        })
        .collect();

    for handle in deletes {
        assert_eq!(handle.await.unwrap().status, StatusCode::NO_CONTENT);
    }

    assert_eq!(all_posts(&app).await.len(), 100);
    assert_eq!(owner_blog_count(&app).await, 100);
}
