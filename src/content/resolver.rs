//! Resolution of public slug chains to posts and categories.
//!
//! A request path like `/de/shoes/running/trail` carries a language and a
//! slug chain. Only the last non-empty segment identifies a post; the full
//! chain identifies a category. Posts are tried first, so a post sharing a
//! slug with a category wins the tie.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use diesel::result::QueryResult;
use serde::Serialize;

use super::{
    lang::{localized, localized_opt},
    tree::CategoryTree,
};
use crate::{
    db::{
        DbConnection,
        category_translations_for,
        featured_posts,
        latest_posts,
        post_translations_for,
        posts_in_category,
        published_post_by_slug,
        related_posts,
        site_categories,
    },
    models::{Category, CategoryTranslation, Post, PostTranslation, Site},
};

/// Sibling posts surfaced alongside a resolved post.
pub const RELATED_POSTS_LIMIT: i64 = 3;
/// Featured posts surfaced on the site home.
pub const FEATURED_POSTS_LIMIT: i64 = 4;
/// Latest posts surfaced on the site home.
pub const LATEST_POSTS_LIMIT: i64 = 8;

/// One entry of the ancestor-to-self navigation trail.
///
/// The first entry is always the synthetic Home crumb (`id` 0, path `/`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub id: i32,
    pub title: String,
    pub path: String,
}

impl Breadcrumb {
    /// The synthetic first crumb of every trail.
    #[must_use]
    pub fn home() -> Self {
        Self {
            id: 0,
            title: "Home".to_owned(),
            path: "/".to_owned(),
        }
    }
}

/// Link to a post, title translation-resolved, path fully qualified.
#[derive(Debug, Clone, Serialize)]
pub struct PostLink {
    pub id: i32,
    pub title: String,
    pub path: String,
    pub image: Option<String>,
}

/// Link to a category, title translation-resolved, path fully qualified.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryLink {
    pub id: i32,
    pub title: String,
    pub path: String,
}

/// A fully resolved post.
#[derive(Debug, Serialize)]
pub struct PostPage {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub path: String,
    pub created_at: NaiveDateTime,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub related: Vec<PostLink>,
}

/// A fully resolved category: breadcrumbs, sibling navigation, child links,
/// and the posts attached directly to it.
#[derive(Debug, Serialize)]
pub struct CategoryPage {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub path: String,
    pub breadcrumbs: Vec<Breadcrumb>,
    pub navigation: Vec<CategoryLink>,
    pub children: Vec<CategoryLink>,
    pub posts: Vec<PostLink>,
}

/// Outcome of resolving a slug chain.
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution {
    Post(PostPage),
    Category(CategoryPage),
}

/// Site home feed.
#[derive(Debug, Serialize)]
pub struct HomePage {
    pub featured: Vec<PostLink>,
    pub latest: Vec<PostLink>,
}

/// Resolve a slug chain within a site to a post or category.
///
/// Returns `Ok(None)` when neither resolves; callers map that to a uniform
/// not-found reply without distinguishing which lookup missed.
///
/// # Errors
/// Returns any error produced by the underlying database queries.
#[must_use = "handle the result"]
pub async fn resolve(
    conn: &mut DbConnection,
    site: &Site,
    language: &str,
    segments: &[String],
) -> QueryResult<Option<Resolution>> {
    let Some(last) = segments.iter().rev().find(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let tree = CategoryTree::from_rows(site_categories(conn, site.id).await?);
    if let Some(post) = published_post_by_slug(conn, site.id, last).await? {
        let page = post_page(conn, &tree, language, &post).await?;
        return Ok(Some(Resolution::Post(page)));
    }
    let Some(category) = tree.descend(segments) else {
        return Ok(None);
    };
    let page = category_page(conn, &tree, language, category).await?;
    Ok(Some(Resolution::Category(page)))
}

/// Resolve a site's home feed: featured posts plus the latest posts.
///
/// # Errors
/// Returns any error produced by the underlying database queries.
#[must_use = "handle the result"]
pub async fn home(conn: &mut DbConnection, site: &Site, language: &str) -> QueryResult<HomePage> {
    let tree = CategoryTree::from_rows(site_categories(conn, site.id).await?);
    let featured = featured_posts(conn, site.id, FEATURED_POSTS_LIMIT).await?;
    let latest = latest_posts(conn, site.id, LATEST_POSTS_LIMIT).await?;
    let ids: Vec<i32> = featured.iter().chain(latest.iter()).map(|p| p.id).collect();
    let translations = post_translation_map(post_translations_for(conn, &ids, language).await?);
    Ok(HomePage {
        featured: featured
            .iter()
            .map(|post| post_link(&tree, post, &translations))
            .collect(),
        latest: latest
            .iter()
            .map(|post| post_link(&tree, post, &translations))
            .collect(),
    })
}

async fn post_page(
    conn: &mut DbConnection,
    tree: &CategoryTree,
    language: &str,
    post: &Post,
) -> QueryResult<PostPage> {
    let ancestors = post
        .category_id
        .map(|id| tree.ancestors(id))
        .unwrap_or_default();
    let category_ids: Vec<i32> = ancestors.iter().map(|cat| cat.id).collect();
    let category_translations =
        category_translation_map(category_translations_for(conn, &category_ids, language).await?);

    let related_rows = match post.category_id {
        Some(category) => related_posts(conn, category, post.id, RELATED_POSTS_LIMIT).await?,
        None => Vec::new(),
    };
    let mut post_ids: Vec<i32> = related_rows.iter().map(|p| p.id).collect();
    post_ids.push(post.id);
    let post_translations =
        post_translation_map(post_translations_for(conn, &post_ids, language).await?);

    let path = tree.post_path(post);
    let title = localized(
        &post.title,
        post_translations.get(&post.id).map(|t| t.title.as_str()),
    )
    .to_owned();
    let content = localized(
        &post.content,
        post_translations
            .get(&post.id)
            .and_then(|t| t.content.as_deref()),
    )
    .to_owned();

    let mut breadcrumbs = category_breadcrumbs(&ancestors, &category_translations);
    breadcrumbs.push(Breadcrumb {
        id: post.id,
        title: title.clone(),
        path: path.clone(),
    });

    Ok(PostPage {
        id: post.id,
        title,
        content,
        image: post.image.clone(),
        path,
        created_at: post.created_at,
        breadcrumbs,
        related: related_rows
            .iter()
            .map(|p| post_link(tree, p, &post_translations))
            .collect(),
    })
}

async fn category_page(
    conn: &mut DbConnection,
    tree: &CategoryTree,
    language: &str,
    category: &Category,
) -> QueryResult<CategoryPage> {
    let ancestors = tree.ancestors(category.id);
    let siblings = tree.siblings(category.id);
    let children = tree.children(category.id);
    let category_ids: Vec<i32> = ancestors
        .iter()
        .chain(siblings.iter())
        .chain(children.iter())
        .map(|cat| cat.id)
        .collect();
    let category_translations =
        category_translation_map(category_translations_for(conn, &category_ids, language).await?);

    let posts = posts_in_category(conn, category.id).await?;
    let post_ids: Vec<i32> = posts.iter().map(|p| p.id).collect();
    let post_translations =
        post_translation_map(post_translations_for(conn, &post_ids, language).await?);

    let title = localized(
        &category.title,
        category_translations
            .get(&category.id)
            .map(|t| t.title.as_str()),
    )
    .to_owned();
    let content = localized_opt(
        category.content.as_deref(),
        category_translations
            .get(&category.id)
            .and_then(|t| t.content.as_deref()),
    )
    .map(ToOwned::to_owned);

    Ok(CategoryPage {
        id: category.id,
        title,
        content,
        path: tree.path(category.id),
        breadcrumbs: category_breadcrumbs(&ancestors, &category_translations),
        navigation: siblings
            .iter()
            .map(|cat| category_link(tree, cat, &category_translations))
            .collect(),
        children: children
            .iter()
            .map(|cat| category_link(tree, cat, &category_translations))
            .collect(),
        posts: posts
            .iter()
            .map(|post| post_link(tree, post, &post_translations))
            .collect(),
    })
}

fn category_breadcrumbs(
    ancestors: &[&Category],
    translations: &HashMap<i32, CategoryTranslation>,
) -> Vec<Breadcrumb> {
    let mut crumbs = vec![Breadcrumb::home()];
    let mut path = String::new();
    for cat in ancestors {
        path.push('/');
        path.push_str(&cat.slug);
        let title = localized(
            &cat.title,
            translations.get(&cat.id).map(|t| t.title.as_str()),
        );
        crumbs.push(Breadcrumb {
            id: cat.id,
            title: title.to_owned(),
            path: path.clone(),
        });
    }
    crumbs
}

fn category_link(
    tree: &CategoryTree,
    category: &Category,
    translations: &HashMap<i32, CategoryTranslation>,
) -> CategoryLink {
    CategoryLink {
        id: category.id,
        title: localized(
            &category.title,
            translations.get(&category.id).map(|t| t.title.as_str()),
        )
        .to_owned(),
        path: tree.path(category.id),
    }
}

fn post_link(
    tree: &CategoryTree,
    post: &Post,
    translations: &HashMap<i32, PostTranslation>,
) -> PostLink {
    PostLink {
        id: post.id,
        title: localized(
            &post.title,
            translations.get(&post.id).map(|t| t.title.as_str()),
        )
        .to_owned(),
        path: tree.post_path(post),
        image: post.image.clone(),
    }
}

fn category_translation_map(rows: Vec<CategoryTranslation>) -> HashMap<i32, CategoryTranslation> {
    rows.into_iter().map(|t| (t.category_id, t)).collect()
}

fn post_translation_map(rows: Vec<PostTranslation>) -> HashMap<i32, PostTranslation> {
    rows.into_iter().map(|t| (t.post_id, t)).collect()
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use chrono::Utc;
    use diesel_async::AsyncConnection;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::{
        db::{
            apply_migrations,
            create_category,
            create_post,
            create_site,
            site_by_host_key,
            upsert_category_translation,
            upsert_post_translation,
        },
        models::{NewCategory, NewCategoryTranslation, NewPost, NewPostTranslation, NewSite},
    };

    #[fixture]
    async fn migrated_conn() -> DbConnection {
        let mut conn = DbConnection::establish(":memory:")
            .await
            .expect("failed to create in-memory connection");
        apply_migrations(&mut conn, "")
            .await
            .expect("failed to apply migrations");
        conn
    }

    async fn seed_category(
        conn: &mut DbConnection,
        site: i32,
        parent: Option<i32>,
        slug: &str,
        title: &str,
    ) -> i32 {
        create_category(
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

    async fn seed_post(conn: &mut DbConnection, site: i32, category: Option<i32>, slug: &str) -> i32 {
        create_post(
            conn,
            &NewPost {
                site_id: site,
                category_id: category,
                slug,
                title: slug,
                content: "body",
                image: None,
                published: true,
                is_featured: false,
                created_at: Utc::now().naive_utc(),
            },
        )
        .await
        .expect("failed to create post")
    }

    /// demo site with shoes -> running plus a sibling category bags, one post
    /// under running.
    async fn seed_demo(conn: &mut DbConnection) -> Site {
        create_site(
            conn,
            &NewSite {
                name: "Demo",
                subdomain: Some("demo"),
                custom_domain: None,
            },
        )
        .await
        .expect("failed to create site");
        let site = site_by_host_key(conn, "demo")
            .await
            .expect("lookup failed")
            .expect("site not found");
        let shoes = seed_category(conn, site.id, None, "shoes", "Shoes").await;
        let running = seed_category(conn, site.id, Some(shoes), "running", "Running").await;
        seed_category(conn, site.id, None, "bags", "Bags").await;
        seed_post(conn, site.id, Some(running), "trail-review").await;
        site
    }

    fn segments(path: &[&str]) -> Vec<String> {
        path.iter().map(|s| (*s).to_owned()).collect()
    }

    #[rstest]
    #[tokio::test]
    async fn post_breadcrumbs_start_home_and_end_with_full_path(
        #[future] migrated_conn: DbConnection,
    ) {
        let mut conn = migrated_conn.await;
        let site = seed_demo(&mut conn).await;

        let resolved = resolve(&mut conn, &site, "en", &segments(&["shoes", "running", "trail-review"]))
            .await
            .expect("resolution failed")
            .expect("path should resolve");
        let Resolution::Post(page) = resolved else {
            panic!("expected a post");
        };

        assert_eq!(page.breadcrumbs.first(), Some(&Breadcrumb::home()));
        let paths: Vec<&str> = page.breadcrumbs.iter().map(|b| b.path.as_str()).collect();
        assert_eq!(paths, ["/", "/shoes", "/shoes/running", "/shoes/running/trail-review"]);
        assert_eq!(page.path, "/shoes/running/trail-review");
    }

    #[rstest]
    #[tokio::test]
    async fn post_wins_slug_collision_with_category(#[future] migrated_conn: DbConnection) {
        let mut conn = migrated_conn.await;
        let site = seed_demo(&mut conn).await;
        // A category and a post both addressed by the slug "running": the
        // category already exists under /shoes, the post sits in /bags.
        let bags = CategoryTree::from_rows(
            crate::db::site_categories(&mut conn, site.id)
                .await
                .expect("failed to load categories"),
        )
        .descend(&["bags"])
        .map(|c| c.id)
        .expect("bags category should exist");
        seed_post(&mut conn, site.id, Some(bags), "running").await;

        let resolved = resolve(&mut conn, &site, "en", &segments(&["shoes", "running"]))
            .await
            .expect("resolution failed")
            .expect("path should resolve");
        assert!(
            matches!(resolved, Resolution::Post(_)),
            "post resolution must take precedence over categories"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn category_page_lists_siblings_children_and_posts(
        #[future] migrated_conn: DbConnection,
    ) {
        let mut conn = migrated_conn.await;
        let site = seed_demo(&mut conn).await;

        let resolved = resolve(&mut conn, &site, "en", &segments(&["shoes"]))
            .await
            .expect("resolution failed")
            .expect("path should resolve");
        let Resolution::Category(page) = resolved else {
            panic!("expected a category");
        };

        assert_eq!(page.title, "Shoes");
        let nav: Vec<&str> = page.navigation.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(nav, ["Bags"]);
        let children: Vec<&str> = page.children.iter().map(|l| l.path.as_str()).collect();
        assert_eq!(children, ["/shoes/running"]);
        assert!(page.posts.is_empty());

        let resolved = resolve(&mut conn, &site, "en", &segments(&["shoes", "running"]))
            .await
            .expect("resolution failed")
            .expect("path should resolve");
        let Resolution::Category(page) = resolved else {
            panic!("expected a category");
        };
        let posts: Vec<&str> = page.posts.iter().map(|l| l.path.as_str()).collect();
        assert_eq!(posts, ["/shoes/running/trail-review"]);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_translation_falls_back_to_base_title(#[future] migrated_conn: DbConnection) {
        let mut conn = migrated_conn.await;
        let site = seed_demo(&mut conn).await;

        let resolved = resolve(&mut conn, &site, "de", &segments(&["shoes"]))
            .await
            .expect("resolution failed")
            .expect("path should resolve");
        let Resolution::Category(page) = resolved else {
            panic!("expected a category");
        };
        assert_eq!(page.title, "Shoes");
    }

    #[rstest]
    #[tokio::test]
    async fn translations_resolve_titles_and_content(#[future] migrated_conn: DbConnection) {
        let mut conn = migrated_conn.await;
        let site = seed_demo(&mut conn).await;
        let tree = CategoryTree::from_rows(
            crate::db::site_categories(&mut conn, site.id)
                .await
                .expect("failed to load categories"),
        );
        let shoes = tree.descend(&["shoes"]).map(|c| c.id).expect("shoes should exist");
        upsert_category_translation(
            &mut conn,
            &NewCategoryTranslation {
                category_id: shoes,
                lang: "de",
                title: "Schuhe",
                content: None,
            },
        )
        .await
        .expect("failed to insert translation");

        let resolved = resolve(&mut conn, &site, "de", &segments(&["shoes"]))
            .await
            .expect("resolution failed")
            .expect("path should resolve");
        let Resolution::Category(page) = resolved else {
            panic!("expected a category");
        };
        assert_eq!(page.title, "Schuhe");
        // Breadcrumb titles go through the same fallback chain.
        assert_eq!(
            page.breadcrumbs.last().map(|b| b.title.as_str()),
            Some("Schuhe")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn empty_translation_content_falls_back_to_base(#[future] migrated_conn: DbConnection) {
        let mut conn = migrated_conn.await;
        let site = seed_demo(&mut conn).await;
        let post = crate::db::published_post_by_slug(&mut conn, site.id, "trail-review")
            .await
            .expect("lookup failed")
            .expect("post not found");
        upsert_post_translation(
            &mut conn,
            &NewPostTranslation {
                post_id: post.id,
                lang: "de",
                title: "Trail-Test",
                content: Some(""),
            },
        )
        .await
        .expect("failed to insert translation");

        let resolved = resolve(&mut conn, &site, "de", &segments(&["shoes", "running", "trail-review"]))
            .await
            .expect("resolution failed")
            .expect("path should resolve");
        let Resolution::Post(page) = resolved else {
            panic!("expected a post");
        };
        assert_eq!(page.title, "Trail-Test");
        assert_eq!(page.content, "body");
    }

    #[rstest]
    #[tokio::test]
    async fn unresolvable_chains_return_none(#[future] migrated_conn: DbConnection) {
        let mut conn = migrated_conn.await;
        let site = seed_demo(&mut conn).await;
        for path in [&["nope"][..], &["shoes", "nope"][..], &[][..]] {
            assert!(
                resolve(&mut conn, &site, "en", &segments(path))
                    .await
                    .expect("resolution failed")
                    .is_none()
            );
        }
    }

    #[rstest]
    #[tokio::test]
    async fn home_feed_splits_featured_and_latest(#[future] migrated_conn: DbConnection) {
        let mut conn = migrated_conn.await;
        let site = seed_demo(&mut conn).await;
        let tree = CategoryTree::from_rows(
            crate::db::site_categories(&mut conn, site.id)
                .await
                .expect("failed to load categories"),
        );
        let bags = tree.descend(&["bags"]).map(|c| c.id).expect("bags should exist");
        create_post(
            &mut conn,
            &NewPost {
                site_id: site.id,
                category_id: Some(bags),
                slug: "totes",
                title: "Totes",
                content: "body",
                image: None,
                published: true,
                is_featured: true,
                created_at: Utc::now().naive_utc(),
            },
        )
        .await
        .expect("failed to create post");

        let feed = home(&mut conn, &site, "en").await.expect("home failed");
        let featured: Vec<&str> = feed.featured.iter().map(|l| l.path.as_str()).collect();
        assert_eq!(featured, ["/bags/totes"]);
        assert_eq!(feed.latest.len(), 2);
    }
}
