//! # Post Model
//!
//! Post records plus the request bodies that create and update them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{BlogError, BlogResult};

/// A stored blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Unique post identifier
    pub id: Uuid,

    pub title: String,

    /// Author name, used as grouping key by the list helpers
    pub author: String,

    pub url: String,

    #[serde(default)]
    pub likes: u64,

    /// Owning user
    #[serde(rename = "user")]
    pub owner_id: Uuid,
}

impl Post {
    /// Create a post with a fresh identifier
    pub fn new(title: String, author: String, url: String, likes: u64, owner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            author,
            url,
            likes,
            owner_id,
        }
    }

    /// Build a post from a validated request, owned by `owner_id`
    pub fn from_new(new_post: NewPost, owner_id: Uuid) -> Self {
        Self::new(
            new_post.title,
            new_post.author,
            new_post.url,
            new_post.likes,
            owner_id,
        )
    }
}

/// Validated fields for a new post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
}

/// Post creation request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub likes: Option<u64>,
}

impl NewPostRequest {
    /// Check required fields and fill defaults
    ///
    /// `title` and `url` must be present and non-empty, `likes` defaults to 0.
    pub fn validate(self) -> BlogResult<NewPost> {
        let title = non_empty(self.title);
        let url = non_empty(self.url);

        let mut missing = Vec::new();
        if title.is_none() {
            missing.push("title");
        }
        if url.is_none() {
            missing.push("url");
        }

        match (title, url) {
            (Some(title), Some(url)) => Ok(NewPost {
                title,
                author: self.author.unwrap_or_default(),
                url,
                likes: self.likes.unwrap_or(0),
            }),
            _ => Err(validation_error(&missing)),
        }
    }
}

/// Likes update request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LikesUpdate {
    #[serde(default)]
    pub likes: Option<u64>,
}

impl LikesUpdate {
    /// Return the new likes count, which is required
    pub fn validate(self) -> BlogResult<u64> {
        self.likes.ok_or_else(|| validation_error(&["likes"]))
    }
}

/// Owner fields shown next to a post
#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub username: String,
    pub name: String,
    pub id: Uuid,
}

/// A post with its owner populated
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: u64,
    /// `None` once the owning user is gone
    pub user: Option<OwnerSummary>,
}

impl PostView {
    pub fn new(post: Post, owner: Option<OwnerSummary>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            author: post.author,
            url: post.url,
            likes: post.likes,
            user: owner,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn validation_error(fields: &[&str]) -> BlogError {
    let reasons: Vec<String> = fields
        .iter()
        .map(|field| format!("{}: Path `{}` is required.", field, field))
        .collect();
    BlogError::Validation(format!("Blog validation failed: {}", reasons.join(", ")))
}
