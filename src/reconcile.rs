//! Mutual-follow set reconciliation.
//!
//! Pure functions over two relationship sets. Comparison is by handle;
//! output order follows the left-hand input and duplicates in it are kept.

use std::collections::HashSet;

use serde::Serialize;

use crate::api::Mutation;
use crate::model::Account;

/// Followers that the account does not follow back.
#[must_use]
pub fn compute_to_follow(followers: &[Account], following: &[Account]) -> Vec<String> {
    difference(followers, following)
}

/// Followed accounts that do not follow back.
#[must_use]
pub fn compute_to_unfollow(following: &[Account], followers: &[Account]) -> Vec<String> {
    difference(following, followers)
}

fn difference(keep: &[Account], exclude: &[Account]) -> Vec<String> {
    let excluded: HashSet<&str> = exclude.iter().map(|a| a.handle.as_str()).collect();
    keep.iter()
        .filter(|a| !excluded.contains(a.handle.as_str()))
        .map(|a| a.handle.clone())
        .collect()
}

/// Both mutation lists for one reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub to_unfollow: Vec<String>,
    pub to_follow: Vec<String>,
}

impl Plan {
    #[must_use]
    pub fn new(followers: &[Account], following: &[Account]) -> Self {
        Self {
            to_unfollow: compute_to_unfollow(following, followers),
            to_follow: compute_to_follow(followers, following),
        }
    }

    /// Drop the list of the other direction when `direction` is set.
    pub fn restrict_to(&mut self, direction: Option<Mutation>) {
        match direction {
            Some(Mutation::Follow) => self.to_unfollow.clear(),
            Some(Mutation::Unfollow) => self.to_follow.clear(),
            None => {}
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_unfollow.is_empty() && self.to_follow.is_empty()
    }
}
