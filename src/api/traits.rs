//! Relationship source and mutation executor traits.

use std::fmt;
use std::future::Future;

use tracing::warn;

use crate::error::Result;
use crate::model::Account;

/// Direction of a relationship edge relative to the subject account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    /// Accounts that follow the subject.
    Followers,
    /// Accounts the subject follows.
    Following,
}

impl Relationship {
    /// Path segment under `/users/{account}/`.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Followers => "followers",
            Self::Following => "following",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Retrieves complete relationship sets.
///
/// Implementors provide [`try_fetch`](Self::try_fetch); the fail-soft
/// contract methods are derived from it.
pub trait RelationshipSource: Send + Sync {
    /// Fetch every page of `relationship` for `account`.
    ///
    /// Any failing page fails the whole call.
    fn try_fetch(
        &self,
        account: &str,
        relationship: Relationship,
    ) -> impl Future<Output = Result<Vec<Account>>> + Send;

    fn try_fetch_followers(&self, account: &str) -> impl Future<Output = Result<Vec<Account>>> + Send {
        self.try_fetch(account, Relationship::Followers)
    }

    fn try_fetch_following(&self, account: &str) -> impl Future<Output = Result<Vec<Account>>> + Send {
        self.try_fetch(account, Relationship::Following)
    }

    /// Complete set, or empty if any page failed.
    ///
    /// An empty result cannot be told apart from a fetch failure.
    fn fetch(
        &self,
        account: &str,
        relationship: Relationship,
    ) -> impl Future<Output = Vec<Account>> + Send {
        async move {
            match self.try_fetch(account, relationship).await {
                Ok(accounts) => accounts,
                Err(e) => {
                    warn!(account, %relationship, error = %e, "Fetch failed, using empty set");
                    Vec::new()
                }
            }
        }
    }

    fn fetch_followers(&self, account: &str) -> impl Future<Output = Vec<Account>> + Send {
        self.fetch(account, Relationship::Followers)
    }

    fn fetch_following(&self, account: &str) -> impl Future<Output = Vec<Account>> + Send {
        self.fetch(account, Relationship::Following)
    }
}

/// A single graph mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Follow,
    Unfollow,
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Follow => f.write_str("follow"),
            Self::Unfollow => f.write_str("unfollow"),
        }
    }
}

/// Applies one follow/unfollow call.
///
/// Exactly one request per call. `true` only when the API confirms
/// success; every other outcome is `false`. No retries.
pub trait MutationExecutor: Send + Sync {
    fn follow_account(&self, handle: &str) -> impl Future<Output = bool> + Send;

    fn unfollow_account(&self, handle: &str) -> impl Future<Output = bool> + Send;

    /// Dispatch on `mutation`.
    fn apply(&self, mutation: Mutation, handle: &str) -> impl Future<Output = bool> + Send {
        async move {
            match mutation {
                Mutation::Follow => self.follow_account(handle).await,
                Mutation::Unfollow => self.unfollow_account(handle).await,
            }
        }
    }
}
