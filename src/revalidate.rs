//! Best-effort cache invalidation after content mutations.
//!
//! Derived paths are posted to an invalidation hook concurrently. Individual
//! failures are logged and swallowed: a stale cached page is preferable to a
//! failed mutation, and the calls are idempotent so nothing retries.

use futures_util::future::{BoxFuture, join_all};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

/// Failure of a single invalidation call.
#[derive(Debug, Error)]
pub enum InvalidateError {
    #[error("invalidation hook returned status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Seam for on-demand cache invalidation of one rendered path.
pub trait Invalidator: Send + Sync {
    /// Invalidate the cached page at `url_path`.
    fn invalidate<'a>(&'a self, url_path: &'a str) -> BoxFuture<'a, Result<(), InvalidateError>>;
}

/// Posts `{"urlPath": ...}` to a configured invalidation hook.
pub struct HttpInvalidator {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpInvalidator {
    /// Build an invalidator targeting `endpoint`.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

impl Invalidator for HttpInvalidator {
    fn invalidate<'a>(&'a self, url_path: &'a str) -> BoxFuture<'a, Result<(), InvalidateError>> {
        Box::pin(async move {
            let response = self
                .client
                .post(self.endpoint.clone())
                .json(&json!({ "urlPath": url_path }))
                .send()
                .await?;
            if !response.status().is_success() {
                return Err(InvalidateError::Status(response.status()));
            }
            Ok(())
        })
    }
}

/// No-op used when no invalidation hook is configured.
pub struct NullInvalidator;

impl Invalidator for NullInvalidator {
    fn invalidate<'a>(&'a self, url_path: &'a str) -> BoxFuture<'a, Result<(), InvalidateError>> {
        Box::pin(async move {
            debug!(%url_path, "no invalidation hook configured; skipping");
            Ok(())
        })
    }
}

/// Fire one invalidation call per path, concurrently.
///
/// Failures are logged and discarded; the caller's mutation never fails on a
/// cold cache. Returns the number of calls that succeeded.
pub async fn revalidate_paths(invalidator: &dyn Invalidator, paths: &[String]) -> usize {
    let calls = paths.iter().map(|path| async move {
        match invalidator.invalidate(path).await {
            Ok(()) => true,
            Err(error) => {
                warn!(%path, %error, "revalidation call failed");
                false
            }
        }
    });
    join_all(calls)
        .await
        .into_iter()
        .filter(|ok| *ok)
        .count()
}
