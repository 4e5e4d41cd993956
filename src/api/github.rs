//! GitHub REST API client.
//!
//! Endpoints used:
//! - `GET /users/{account}/followers?page=N&per_page=M`
//! - `GET /users/{account}/following?page=N&per_page=M`
//! - `PUT /user/following/{handle}` (follow, 204 on success)
//! - `DELETE /user/following/{handle}` (unfollow, 204 on success)

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_LENGTH};
use reqwest::{Method, StatusCode};
use tracing::{debug, info, warn};

use super::traits::{MutationExecutor, Relationship, RelationshipSource};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::model::{is_valid_handle, Account};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// GitHub API client implementing both the source and executor traits.
pub struct GitHubClient {
    client: reqwest::Client,
    api_url: String,
    page_size: usize,
}

impl GitHubClient {
    /// Build a client from resolved settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the page size is zero, the credential is not a
    /// valid header value, or the HTTP client cannot be constructed.
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_config(&settings.api_url, &settings.token, settings.page_size)
    }

    /// Build a client against an explicit base URL.
    ///
    /// # Errors
    ///
    /// See [`GitHubClient::new`].
    pub fn with_config(api_url: &str, token: &str, page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::InvalidArgument("page size must be at least 1".into()));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::Config("token contains invalid header characters".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));

        let client = reqwest::Client::builder()
            .user_agent(concat!("followsync/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            page_size,
        })
    }

    async fn fetch_page(
        &self,
        account: &str,
        relationship: Relationship,
        page: usize,
    ) -> Result<Vec<Account>> {
        if !is_valid_handle(account) {
            return Err(Error::InvalidArgument(format!(
                "account {account:?} is not a valid handle"
            )));
        }
        let url = format!("{}/users/{account}/{}", self.api_url, relationship.path());

        let response = self
            .client
            .get(&url)
            .query(&[("page", page), ("per_page", self.page_size)])
            .send()
            .await
            .map_err(|e| Error::Api(format!("{relationship} page {page} request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api(format!(
                "{relationship} page {page} returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Api(format!("Failed to parse {relationship} page {page}: {e}")))
    }

    async fn mutate(&self, method: Method, handle: &str) -> bool {
        if !is_valid_handle(handle) {
            warn!(handle, %method, "Refusing to send a request for an invalid handle");
            return false;
        }
        let url = format!("{}/user/following/{handle}", self.api_url);

        match self
            .client
            .request(method.clone(), &url)
            .header(CONTENT_LENGTH, "0")
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::NO_CONTENT => true,
            Ok(response) => {
                warn!(handle, %method, status = %response.status(), "Mutation not confirmed");
                false
            }
            Err(e) => {
                warn!(handle, %method, error = %e, "Mutation request failed");
                false
            }
        }
    }
}

impl RelationshipSource for GitHubClient {
    async fn try_fetch(&self, account: &str, relationship: Relationship) -> Result<Vec<Account>> {
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let batch = self.fetch_page(account, relationship, page).await?;
            let received = batch.len();
            all.extend(batch);
            debug!(account, %relationship, page, received, "Fetched page");

            if received < self.page_size {
                break;
            }
            page += 1;
        }

        Ok(all)
    }
}

impl MutationExecutor for GitHubClient {
    async fn follow_account(&self, handle: &str) -> bool {
        let ok = self.mutate(Method::PUT, handle).await;
        if ok {
            info!(handle, "Followed");
        }
        ok
    }

    async fn unfollow_account(&self, handle: &str) -> bool {
        let ok = self.mutate(Method::DELETE, handle).await;
        if ok {
            info!(handle, "Unfollowed");
        }
        ok
    }
}
