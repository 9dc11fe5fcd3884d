//! Shared fixtures for the integration suites.

#![allow(dead_code, reason = "each test binary uses a subset of these helpers")]

use chrono::Utc;
use quilld::{
    config::AppConfig,
    db::{self, DbConnection, DbPool},
    models::{NewCategory, NewCategoryTranslation, NewPost, NewSite, Site},
};

/// Single-connection pool over an in-memory database, migrated.
///
/// An in-memory `SQLite` database exists per connection, so the pool is
/// capped at one connection to keep every caller on the same database.
pub async fn memory_pool() -> DbPool {
    let pool = db::establish_pool_sized(":memory:", 1)
        .await
        .expect("failed to build pool");
    {
        let mut conn = pool.get().await.expect("failed to get connection");
        db::apply_migrations(&mut conn, "")
            .await
            .expect("failed to apply migrations");
    }
    pool
}

/// Configuration used by the HTTP suites: `blogkit.io` platform, English
/// base language plus German.
pub fn test_config() -> AppConfig {
    AppConfig {
        base_domain: "blogkit.io".to_owned(),
        languages: vec!["en".to_owned(), "de".to_owned()],
        ..AppConfig::default()
    }
}

pub async fn seed_category(
    conn: &mut DbConnection,
    site: i32,
    parent: Option<i32>,
    slug: &str,
    title: &str,
) -> i32 {
    db::create_category(
        conn,
        &NewCategory {
            site_id: site,
            parent_id: parent,
            slug,
            title,
            content: None,
            position: 0,
        },
    )
    .await
    .expect("failed to create category")
}

pub async fn seed_post(
    conn: &mut DbConnection,
    site: i32,
    category: Option<i32>,
    slug: &str,
    featured: bool,
) -> i32 {
    db::create_post(
        conn,
        &NewPost {
            site_id: site,
            category_id: category,
            slug,
            title: slug,
            content: "body",
            image: None,
            published: true,
            is_featured: featured,
            created_at: Utc::now().naive_utc(),
        },
    )
    .await
    .expect("failed to create post")
}

/// Seed the demo site used across the suites:
///
/// - a chain `a1 -> a2 -> a3 -> a4 -> a5 -> a6` (six levels deep),
/// - a sibling branch `news -> world`,
/// - posts `alpha` (in a1, featured), `zeta` (in a6), `brief` (in world),
/// - a German title translation for `a1`.
pub async fn seed_demo(conn: &mut DbConnection) -> Site {
    db::create_site(
        conn,
        &NewSite {
            name: "Demo",
            subdomain: Some("demo"),
            custom_domain: None,
        },
    )
    .await
    .expect("failed to create site");
    let site = db::site_by_host_key(conn, "demo")
        .await
        .expect("site lookup failed")
        .expect("site not found");

    let mut parent = None;
    let mut chain = Vec::new();
    for level in 1..=6 {
        let id = seed_category(
            conn,
            site.id,
            parent,
            &format!("a{level}"),
            &format!("Level {level}"),
        )
        .await;
        chain.push(id);
        parent = Some(id);
    }
    let news = seed_category(conn, site.id, None, "news", "News").await;
    let world = seed_category(conn, site.id, Some(news), "world", "World").await;

    seed_post(conn, site.id, chain.first().copied(), "alpha", true).await;
    seed_post(conn, site.id, chain.last().copied(), "zeta", false).await;
    seed_post(conn, site.id, Some(world), "brief", false).await;

    db::upsert_category_translation(
        conn,
        &NewCategoryTranslation {
            category_id: chain[0],
            lang: "de",
            title: "Ebene 1",
            content: None,
        },
    )
    .await
    .expect("failed to insert translation");

    site
}
