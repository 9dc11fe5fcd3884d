//! Category record helpers.

use diesel::{prelude::*, result::QueryResult};
use diesel_async::RunQueryDsl;

use super::connection::DbConnection;
use crate::models::Category;

/// Insert a new category node.
///
/// # Errors
/// Returns any error produced by the insertion query.
#[must_use = "handle the result"]
pub async fn create_category(
    conn: &mut DbConnection,
    cat: &crate::models::NewCategory<'_>,
) -> QueryResult<i32> {
    use crate::schema::categories::dsl::{categories, id};
    diesel::insert_into(categories)
        .values(cat)
        .returning(id)
        .get_result(conn)
        .await
}

/// Load a site's full category set in sibling order.
///
/// One round trip fetches every node; tree shape is reconstructed in memory
/// by [`crate::content::CategoryTree`].
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn site_categories(conn: &mut DbConnection, site: i32) -> QueryResult<Vec<Category>> {
    use crate::schema::categories::dsl::{categories, id, position, site_id};
    categories
        .filter(site_id.eq(site))
        .order((position.asc(), id.asc()))
        .load::<Category>(conn)
        .await
}
