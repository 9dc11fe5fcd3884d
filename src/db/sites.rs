//! Tenant site helpers.

use diesel::{prelude::*, result::QueryResult};
use diesel_async::RunQueryDsl;

use super::connection::DbConnection;
use crate::models::Site;

/// Insert a new tenant site.
///
/// # Errors
/// Returns any error produced by the insertion query.
#[must_use = "handle the result"]
pub async fn create_site(conn: &mut DbConnection, site: &crate::models::NewSite<'_>) -> QueryResult<i32> {
    use crate::schema::sites::dsl::{id, sites};
    diesel::insert_into(sites)
        .values(site)
        .returning(id)
        .get_result(conn)
        .await
}

/// Look up a site by its platform subdomain.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn site_by_subdomain(conn: &mut DbConnection, key: &str) -> QueryResult<Option<Site>> {
    use crate::schema::sites::dsl::{sites, subdomain};
    sites
        .filter(subdomain.eq(key))
        .first::<Site>(conn)
        .await
        .optional()
}

/// Look up a site by its custom domain.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn site_by_custom_domain(conn: &mut DbConnection, domain: &str) -> QueryResult<Option<Site>> {
    use crate::schema::sites::dsl::{custom_domain, sites};
    sites
        .filter(custom_domain.eq(domain))
        .first::<Site>(conn)
        .await
        .optional()
}

/// Resolve a host key to a site: a platform subdomain first, then a custom
/// domain.
///
/// # Errors
/// Returns any error produced by the underlying database queries.
#[must_use = "handle the result"]
pub async fn site_by_host_key(conn: &mut DbConnection, key: &str) -> QueryResult<Option<Site>> {
    if let Some(site) = site_by_subdomain(conn, key).await? {
        return Ok(Some(site));
    }
    site_by_custom_domain(conn, key).await
}

/// List every tenant site.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn list_sites(conn: &mut DbConnection) -> QueryResult<Vec<Site>> {
    use crate::schema::sites::dsl::{id, sites};
    sites.order(id.asc()).load::<Site>(conn).await
}
