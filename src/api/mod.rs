//! Relationship API access.
//!
//! The reconciliation engine talks to the upstream graph through two
//! traits:
//!
//! - [`RelationshipSource`]: complete follower / following sets
//! - [`MutationExecutor`]: one follow or unfollow call
//!
//! [`GitHubClient`] implements both against the GitHub REST API.
//!
//! # Fault boundary
//!
//! The contract operations never return errors. A failed fetch degrades to
//! an empty set and a failed mutation to `false`, with a `warn!` in both
//! cases. `try_fetch_*` exposes the underlying error for callers that
//! prefer to stop instead.

mod github;
mod traits;

pub use github::GitHubClient;
pub use traits::{Mutation, MutationExecutor, Relationship, RelationshipSource};
