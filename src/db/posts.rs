//! Post record helpers.

use diesel::{prelude::*, result::QueryResult};
use diesel_async::RunQueryDsl;

use super::connection::DbConnection;
use crate::models::Post;

/// Insert a new post.
///
/// # Errors
/// Returns any error produced by the insertion query.
#[must_use = "handle the result"]
pub async fn create_post(conn: &mut DbConnection, post: &crate::models::NewPost<'_>) -> QueryResult<i32> {
    use crate::schema::posts::dsl::{id, posts};
    diesel::insert_into(posts)
        .values(post)
        .returning(id)
        .get_result(conn)
        .await
}

/// Find a published post by slug anywhere within a site.
///
/// The resolver tries this before category descent, so a post sharing a slug
/// with a category always wins the tie.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn published_post_by_slug(
    conn: &mut DbConnection,
    site: i32,
    post_slug: &str,
) -> QueryResult<Option<Post>> {
    use crate::schema::posts::dsl::{id, posts, published, site_id, slug};
    posts
        .filter(site_id.eq(site))
        .filter(slug.eq(post_slug))
        .filter(published.eq(true))
        .order(id.asc())
        .first::<Post>(conn)
        .await
        .optional()
}

/// List the published posts attached directly to a category, newest first.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn posts_in_category(conn: &mut DbConnection, category: i32) -> QueryResult<Vec<Post>> {
    use crate::schema::posts::dsl::{category_id, created_at, posts, published};
    posts
        .filter(category_id.eq(category))
        .filter(published.eq(true))
        .order(created_at.desc())
        .load::<Post>(conn)
        .await
}

/// List published sibling posts of `exclude` within the same category.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn related_posts(
    conn: &mut DbConnection,
    category: i32,
    exclude: i32,
    limit: i64,
) -> QueryResult<Vec<Post>> {
    use crate::schema::posts::dsl::{category_id, created_at, id, posts, published};
    posts
        .filter(category_id.eq(category))
        .filter(published.eq(true))
        .filter(id.ne(exclude))
        .order(created_at.desc())
        .limit(limit)
        .load::<Post>(conn)
        .await
}

/// List a site's featured published posts, newest first.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn featured_posts(conn: &mut DbConnection, site: i32, limit: i64) -> QueryResult<Vec<Post>> {
    use crate::schema::posts::dsl::{created_at, is_featured, posts, published, site_id};
    posts
        .filter(site_id.eq(site))
        .filter(published.eq(true))
        .filter(is_featured.eq(true))
        .order(created_at.desc())
        .limit(limit)
        .load::<Post>(conn)
        .await
}

/// List a site's latest published posts.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn latest_posts(conn: &mut DbConnection, site: i32, limit: i64) -> QueryResult<Vec<Post>> {
    use crate::schema::posts::dsl::{created_at, posts, published, site_id};
    posts
        .filter(site_id.eq(site))
        .filter(published.eq(true))
        .order(created_at.desc())
        .limit(limit)
        .load::<Post>(conn)
        .await
}

/// Load every published post for a site, for path enumeration.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn site_posts(conn: &mut DbConnection, site: i32) -> QueryResult<Vec<Post>> {
    use crate::schema::posts::dsl::{id, posts, published, site_id};
    posts
        .filter(site_id.eq(site))
        .filter(published.eq(true))
        .order(id.asc())
        .load::<Post>(conn)
        .await
}
