//! Exhaustive path enumeration for sitemaps, pre-rendering, and cache
//! revalidation.
//!
//! Both enumerations are pre-order walks of the category tree: one path per
//! category node, one per published post attached to a node, at any depth.

use std::collections::{HashMap, HashSet};

use diesel::result::QueryResult;

use super::tree::CategoryTree;
use crate::{
    db::{DbConnection, site_categories, site_posts},
    models::{Post, Site},
};

/// Every addressable content path of a site, in pre-order: each category
/// followed by its directly attached posts, then its subtree.
#[must_use]
pub fn site_paths(tree: &CategoryTree, posts: &[Post]) -> Vec<String> {
    let by_category = posts_by_category(posts);
    let mut paths = Vec::new();
    for cat in tree.walk() {
        let base = tree.path(cat.id);
        paths.push(base.clone());
        if let Some(attached) = by_category.get(&cat.id) {
            for post in attached {
                paths.push(format!("{base}/{}", post.slug));
            }
        }
    }
    paths
}

/// Paths invalidated by a mutation of `category_id`: the site root, the
/// ancestor chain, the category itself, every descendant category, and the
/// posts attached to the mutated subtree. Sibling branches are untouched.
///
/// Returns an empty set when the category is not part of the tree.
#[must_use]
pub fn revalidation_paths(tree: &CategoryTree, posts: &[Post], category_id: i32) -> Vec<String> {
    if tree.get(category_id).is_none() {
        return Vec::new();
    }
    let mut paths = vec!["/".to_owned()];
    for cat in tree.ancestors(category_id) {
        paths.push(tree.path(cat.id));
    }
    let subtree = tree.subtree(category_id);
    let subtree_ids: HashSet<i32> = subtree.iter().map(|cat| cat.id).collect();
    for cat in &subtree {
        if cat.id != category_id {
            paths.push(tree.path(cat.id));
        }
    }
    for post in posts {
        if post
            .category_id
            .is_some_and(|id| subtree_ids.contains(&id))
        {
            paths.push(tree.post_path(post));
        }
    }
    paths
}

/// Enumerate a site's full path set, site root first.
///
/// # Errors
/// Returns any error produced by the underlying database queries.
#[must_use = "handle the result"]
pub async fn enumerate_site(conn: &mut DbConnection, site: &Site) -> QueryResult<Vec<String>> {
    let tree = CategoryTree::from_rows(site_categories(conn, site.id).await?);
    let posts = site_posts(conn, site.id).await?;
    let mut paths = vec!["/".to_owned()];
    paths.extend(site_paths(&tree, &posts));
    Ok(paths)
}

/// Revalidation set for the category at `category_path` within a site.
///
/// Returns `Ok(None)` when the path does not resolve to a category.
///
/// # Errors
/// Returns any error produced by the underlying database queries.
#[must_use = "handle the result"]
pub async fn revalidation_paths_for(
    conn: &mut DbConnection,
    site: &Site,
    category_path: &str,
) -> QueryResult<Option<Vec<String>>> {
    let tree = CategoryTree::from_rows(site_categories(conn, site.id).await?);
    let segments: Vec<&str> = category_path.split('/').filter(|s| !s.is_empty()).collect();
    let Some(category) = tree.descend(&segments) else {
        return Ok(None);
    };
    let posts = site_posts(conn, site.id).await?;
    Ok(Some(revalidation_paths(&tree, &posts, category.id)))
}

fn posts_by_category(posts: &[Post]) -> HashMap<i32, Vec<&Post>> {
    let mut by_category: HashMap<i32, Vec<&Post>> = HashMap::new();
    for post in posts {
        if let Some(id) = post.category_id {
            by_category.entry(id).or_default().push(post);
        }
    }
    by_category
}
