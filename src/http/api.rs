//! Platform API endpoints: the revalidation webhook and path-list feeds.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use super::{AppState, error::ApiError};
use crate::{content, db, host::HostRoute};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RevalidateBody {
    url_path: String,
}

/// `POST /api/revalidate`: invalidate one cached path on demand.
pub(super) async fn revalidate(
    State(state): State<AppState>,
    Json(body): Json<RevalidateBody>,
) -> Result<Json<Value>, ApiError> {
    state.invalidator.invalidate(&body.url_path).await?;
    info!(path = %body.url_path, "revalidated");
    Ok(Json(json!({ "message": "OK" })))
}

#[derive(Deserialize)]
pub(super) struct SitemapQuery {
    subdomain: String,
}

/// `GET /api/sitemap?subdomain=…`: every addressable path of a site,
/// expanded per published language.
pub(super) async fn sitemap(
    State(state): State<AppState>,
    Query(query): Query<SitemapQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let mut conn = state.pool.get().await.map_err(ApiError::unavailable)?;
    let site = db::site_by_subdomain(&mut conn, &query.subdomain)
        .await?
        .ok_or(ApiError::NotFound)?;
    let paths = content::enumerate_site(&mut conn, &site).await?;
    let localized: Vec<String> = state
        .config
        .languages
        .iter()
        .flat_map(|lang| {
            paths.iter().map(move |path| {
                if path == "/" {
                    format!("/{lang}")
                } else {
                    format!("/{lang}{path}")
                }
            })
        })
        .collect();
    Ok(Json(localized))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct InternalLinksQuery {
    current_host: String,
}

/// `GET /api/internal-links?currentHost=…`: language-neutral slug paths for
/// cross-linking within one tenant site.
pub(super) async fn internal_links(
    State(state): State<AppState>,
    Query(query): Query<InternalLinksQuery>,
) -> Result<Json<Vec<String>>, ApiError> {
    let HostRoute::Tenant(key) = state.hosts.classify(&query.current_host) else {
        return Err(ApiError::NotFound);
    };
    let mut conn = state.pool.get().await.map_err(ApiError::unavailable)?;
    let site = db::site_by_host_key(&mut conn, &key)
        .await?
        .ok_or(ApiError::NotFound)?;
    let paths = content::enumerate_site(&mut conn, &site).await?;
    Ok(Json(paths))
}
