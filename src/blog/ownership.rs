//! # Ownership Guard
//!
//! Decides whether a caller may delete a post.
//!
//! ## Invariant
//! A caller may delete a post only when its identity equals the post's
//! recorded owner. The check is a value comparison and touches no storage.

/// Returns true when `caller_id` owns the resource recorded under `owner_id`
pub fn can_delete<I>(caller_id: &I, owner_id: &I) -> bool
where
    I: PartialEq + ?Sized,
{
    caller_id == owner_id
}
