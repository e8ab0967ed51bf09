//! # Blog Module
//!
//! Posts, their storage, the list aggregation helpers and the ownership
//! rule applied on deletion.

pub mod errors;
pub mod list_helper;
pub mod ownership;
pub mod post;
pub mod repository;

pub use errors::{BlogError, BlogResult};
pub use list_helper::{
    author_with_most_likes, author_with_most_posts, favourite_post, total_likes,
    AuthorLikeTotal, AuthorPostCount, ListStats, PostSummary,
};
pub use ownership::can_delete;
pub use post::{LikesUpdate, NewPost, NewPostRequest, OwnerSummary, Post, PostView};
pub use repository::{InMemoryPostRepository, PostRepository};
