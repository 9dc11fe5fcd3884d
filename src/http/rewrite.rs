//! Host-based request rewriting into internal route namespaces.
//!
//! The public router never sees raw tenant URLs: this middleware classifies
//! the `Host` header and rewrites the request into `/_home`, `/_dashboard`,
//! or `/_sites/{key}` before routing. Platform APIs under `/api/` and
//! already-internal paths pass through untouched.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, Uri, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use super::AppState;
use crate::host::HostRoute;

/// Cookie that marks an authenticated dashboard session.
const SESSION_COOKIE: &str = "session";

pub(super) async fn rewrite_by_host(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();
    if path.starts_with("/api/") || path.starts_with("/_") {
        return next.run(req).await;
    }
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    let target = match state.hosts.classify(&host) {
        HostRoute::Marketing => namespaced("/_home", &path),
        HostRoute::Dashboard => {
            // An authenticated session has no business on the login page.
            if path == "/login" && has_session_cookie(req.headers()) {
                return Redirect::temporary("/").into_response();
            }
            namespaced("/_dashboard", &path)
        }
        HostRoute::Tenant(key) => {
            if path == "/" {
                format!("/_sites/{key}/{}", state.config.default_lang)
            } else {
                format!("/_sites/{key}{path}")
            }
        }
    };
    let target = match req.uri().query() {
        Some(query) => format!("{target}?{query}"),
        None => target,
    };
    match target.parse::<Uri>() {
        Ok(uri) => {
            *req.uri_mut() = uri;
            next.run(req).await
        }
        Err(err) => {
            debug!(%err, %target, "failed to rebuild rewritten uri");
            StatusCode::BAD_REQUEST.into_response()
        }
    }
}

fn namespaced(namespace: &str, path: &str) -> String {
    if path == "/" {
        namespace.to_owned()
    } else {
        format!("{namespace}{path}")
    }
}

fn has_session_cookie(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .any(|cookie| {
            cookie
                .trim_start()
                .strip_prefix(SESSION_COOKIE)
                .is_some_and(|rest| rest.starts_with('='))
        })
}
