//! HTTP surface: host-based rewriting, public content routes, and platform
//! APIs.

mod api;
mod content;
mod error;
mod rewrite;

use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    middleware,
    routing::{any, get, post},
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub use self::error::ApiError;
use crate::{
    config::AppConfig,
    db::DbPool,
    host::HostRouter,
    revalidate::{HttpInvalidator, Invalidator, NullInvalidator},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: DbPool,
    /// Resolved runtime configuration.
    pub config: Arc<AppConfig>,
    /// Hostname classifier.
    pub hosts: HostRouter,
    /// Cache-invalidation seam.
    pub invalidator: Arc<dyn Invalidator>,
}

impl AppState {
    /// Assemble the shared state from a pool and resolved configuration.
    ///
    /// # Errors
    /// Returns an error when the configured invalidation endpoint is not a
    /// valid URL.
    pub fn new(pool: DbPool, config: AppConfig) -> Result<Self, url::ParseError> {
        let hosts = HostRouter::new(&config.base_domain, &config.dashboard_host);
        let invalidator: Arc<dyn Invalidator> = match config.revalidate_endpoint.as_deref() {
            Some(endpoint) => Arc::new(HttpInvalidator::new(endpoint.parse()?)),
            None => Arc::new(NullInvalidator),
        };
        Ok(Self {
            pool,
            config: Arc::new(config),
            hosts,
            invalidator,
        })
    }
}

/// Build the full application router.
///
/// Public requests are rewritten into the internal namespaces by the host
/// middleware; `/api/` and `/_`-prefixed paths route as-is.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/revalidate", post(api::revalidate))
        .route("/api/sitemap", get(api::sitemap))
        .route("/api/internal-links", get(api::internal_links))
        .route("/_home", any(content::marketing_home))
        .route("/_home/{*rest}", any(content::marketing_home))
        .route("/_dashboard", any(content::dashboard_home))
        .route("/_dashboard/{*rest}", any(content::dashboard_home))
        .route("/_sites/{site}/{lang}", get(content::site_home))
        .route("/_sites/{site}/{lang}/{*slug}", get(content::site_content))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rewrite::rewrite_by_host,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .with_state(state)
}
