//! Public-site content handlers and namespace placeholders.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use super::{AppState, error::ApiError};
use crate::{
    content::{self, HomePage, Resolution},
    db::{self, DbConnection},
    models::Site,
};

/// Marketing namespace placeholder; the marketing UI lives elsewhere.
pub(super) async fn marketing_home(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "message": "quilld",
        "baseDomain": state.config.base_domain,
    }))
}

/// Dashboard namespace placeholder; the management SPA lives elsewhere.
pub(super) async fn dashboard_home() -> Json<Value> {
    Json(json!({ "message": "dashboard" }))
}

/// `GET /{lang}` on a tenant host: featured plus latest posts.
pub(super) async fn site_home(
    State(state): State<AppState>,
    Path((site_key, lang)): Path<(String, String)>,
) -> Result<Json<HomePage>, ApiError> {
    let mut conn = state.pool.get().await.map_err(ApiError::unavailable)?;
    let site = require_site(&mut conn, &site_key).await?;
    let page = content::home(&mut conn, &site, &lang).await?;
    Ok(Json(page))
}

/// `GET /{lang}/{...slug}` on a tenant host: a resolved post or category.
pub(super) async fn site_content(
    State(state): State<AppState>,
    Path((site_key, lang, slug)): Path<(String, String, String)>,
) -> Result<Json<Resolution>, ApiError> {
    let mut conn = state.pool.get().await.map_err(ApiError::unavailable)?;
    let site = require_site(&mut conn, &site_key).await?;
    let segments: Vec<String> = slug.split('/').map(ToOwned::to_owned).collect();
    match content::resolve(&mut conn, &site, &lang, &segments).await? {
        Some(resolution) => Ok(Json(resolution)),
        None => Err(ApiError::NotFound),
    }
}

async fn require_site(conn: &mut DbConnection, key: &str) -> Result<Site, ApiError> {
    db::site_by_host_key(conn, key).await?.ok_or(ApiError::NotFound)
}
