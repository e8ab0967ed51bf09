//! # Post Repository
//!
//! Storage abstraction for posts.

use std::sync::RwLock;

use uuid::Uuid;

use super::errors::{BlogError, BlogResult};
use super::post::Post;

/// Post repository trait
///
/// Abstracts storage operations for posts.
pub trait PostRepository: Send + Sync {
    /// All posts in insertion order
    fn list(&self) -> BlogResult<Vec<Post>>;

    /// Find a post by its ID
    fn find_by_id(&self, id: Uuid) -> BlogResult<Option<Post>>;

    /// Store a new post
    fn create(&self, post: &Post) -> BlogResult<()>;

    /// Replace the likes count, returning the updated post
    fn update_likes(&self, id: Uuid, likes: u64) -> BlogResult<Option<Post>>;

    /// Remove a post, returning whether it existed
    fn delete(&self, id: Uuid) -> BlogResult<bool>;
}

/// In-memory post repository
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with `posts`
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }
}

fn poisoned<T>(_: T) -> BlogError {
    BlogError::StorageError("Lock poisoned".to_string())
}

impl PostRepository for InMemoryPostRepository {
    fn list(&self) -> BlogResult<Vec<Post>> {
        let posts = self.posts.read().map_err(poisoned)?;
        Ok(posts.clone())
    }

    fn find_by_id(&self, id: Uuid) -> BlogResult<Option<Post>> {
        let posts = self.posts.read().map_err(poisoned)?;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    fn create(&self, post: &Post) -> BlogResult<()> {
        let mut posts = self.posts.write().map_err(poisoned)?;

        if posts.iter().any(|p| p.id == post.id) {
            return Err(BlogError::StorageError(format!(
                "Duplicate post id: {}",
                post.id
            )));
        }

        posts.push(post.clone());
        Ok(())
    }

    fn update_likes(&self, id: Uuid, likes: u64) -> BlogResult<Option<Post>> {
        let mut posts = self.posts.write().map_err(poisoned)?;

        Ok(posts.iter_mut().find(|p| p.id == id).map(|post| {
            post.likes = likes;
            post.clone()
        }))
    }

    fn delete(&self, id: Uuid) -> BlogResult<bool> {
        let mut posts = self.posts.write().map_err(poisoned)?;

        let len_before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() != len_before)
    }
}
