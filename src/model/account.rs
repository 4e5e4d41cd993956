//! Account model.

use serde::{Deserialize, Serialize};

/// An account in the relationship graph.
///
/// Identity is the handle alone. The upstream API calls it `login`;
/// any other attributes it returns are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "login")]
    pub handle: String,
}

impl Account {
    pub fn new(handle: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
        }
    }
}

/// Whether `handle` is safe to place in an API path segment.
///
/// GitHub logins use ASCII letters, digits and `-`; managed enterprise
/// accounts add an `_` suffix. Anything else (`/`, `.`, `%`, whitespace)
/// is rejected before a request is built.
#[must_use]
pub fn is_valid_handle(handle: &str) -> bool {
    !handle.is_empty()
        && handle
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// Project a relationship set onto its handles, keeping order.
#[must_use]
pub fn handles(accounts: &[Account]) -> Vec<String> {
    accounts.iter().map(|a| a.handle.clone()).collect()
}
