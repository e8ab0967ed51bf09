//! # List Helpers
//!
//! Pure aggregations over an in-memory list of posts.
//!
//! ## Invariants
//! - Input is never mutated; every author and title in a result borrows
//!   from the input posts.
//! - Ties resolve to the first-encountered candidate in input order.
//! - Empty input yields `0` for `total_likes` and `None` elsewhere.
//! - Like sums are accumulated as `u128`, so they are exact for any list
//!   of `u64` counts.

use std::collections::HashMap;

use serde::Serialize;

use super::post::Post;

/// Reduced view of the most liked post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PostSummary<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub likes: u64,
}

/// Author with the largest number of posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPostCount<'a> {
    pub author: &'a str,
    pub post_count: usize,
}

/// Author with the largest sum of likes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorLikeTotal<'a> {
    pub author: &'a str,
    pub like_total: u128,
}

/// All aggregates over one list of posts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStats<'a> {
    pub total_likes: u128,
    pub favourite_post: Option<PostSummary<'a>>,
    pub author_with_most_posts: Option<AuthorPostCount<'a>>,
    pub author_with_most_likes: Option<AuthorLikeTotal<'a>>,
}

impl<'a> ListStats<'a> {
    pub fn compute(posts: &'a [Post]) -> Self {
        Self {
            total_likes: total_likes(posts),
            favourite_post: favourite_post(posts),
            author_with_most_posts: author_with_most_posts(posts),
            author_with_most_likes: author_with_most_likes(posts),
        }
    }
}

/// Sum of likes across all posts
pub fn total_likes(posts: &[Post]) -> u128 {
    posts.iter().map(|post| u128::from(post.likes)).sum()
}

/// The post with the most likes
pub fn favourite_post(posts: &[Post]) -> Option<PostSummary<'_>> {
    first_max_by_key(posts.iter(), |post| post.likes).map(|post| PostSummary {
        title: &post.title,
        author: &post.author,
        likes: post.likes,
    })
}

/// The author who wrote the most posts
pub fn author_with_most_posts(posts: &[Post]) -> Option<AuthorPostCount<'_>> {
    let groups = group_by_author(posts, 0usize, |count, _| *count += 1);

    first_max_by_key(groups.into_iter(), |(_, count)| *count).map(|(author, post_count)| {
        AuthorPostCount { author, post_count }
    })
}

/// The author whose posts collected the most likes in total
pub fn author_with_most_likes(posts: &[Post]) -> Option<AuthorLikeTotal<'_>> {
    let groups = group_by_author(posts, 0u128, |total, post| {
        *total += u128::from(post.likes)
    });

    first_max_by_key(groups.into_iter(), |(_, total)| *total).map(|(author, like_total)| {
        AuthorLikeTotal { author, like_total }
    })
}

/// Fold posts into one accumulator per author.
///
/// Groups come back in order of each author's first appearance.
fn group_by_author<'a, A, F>(posts: &'a [Post], init: A, mut fold: F) -> Vec<(&'a str, A)>
where
    A: Clone,
    F: FnMut(&mut A, &Post),
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut groups: Vec<(&'a str, A)> = Vec::new();

    for post in posts {
        let slot = *index.entry(post.author.as_str()).or_insert_with(|| {
            groups.push((post.author.as_str(), init.clone()));
            groups.len() - 1
        });
        fold(&mut groups[slot].1, post);
    }

    groups
}

/// Left-to-right max reduction keeping the earlier item on ties.
///
/// `Iterator::max_by_key` returns the last maximum, which is the wrong
/// tie-break here.
fn first_max_by_key<I, K, F>(items: I, mut key: F) -> Option<I::Item>
where
    I: Iterator,
    K: Ord,
    F: FnMut(&I::Item) -> K,
{
    items.fold(None, |best, item| match best {
        Some((best_key, best_item)) => {
            let item_key = key(&item);
            if best_key >= item_key {
                Some((best_key, best_item))
            } else {
                Some((item_key, item))
            }
        }
        None => Some((key(&item), item)),
    })
    .map(|(_, item)| item)
}
