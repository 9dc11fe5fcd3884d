//! Manage database connections and domain queries.
//!
//! This module tree exposes helpers for creating pooled Diesel connections,
//! running embedded migrations, and executing application queries grouped by
//! domain concerns.

mod categories;
mod connection;
mod migrations;
mod posts;
mod sites;
mod translations;


pub use self::{
    categories::{create_category, site_categories},
    connection::{Backend, DbConnection, DbPool, MIGRATIONS, establish_pool, establish_pool_sized},
    migrations::{apply_migrations, run_migrations},
    posts::{
        create_post,
        featured_posts,
        latest_posts,
        posts_in_category,
        published_post_by_slug,
        related_posts,
        site_posts,
    },
    sites::{create_site, list_sites, site_by_custom_domain, site_by_host_key, site_by_subdomain},
    translations::{
        category_translations_for,
        post_translations_for,
        upsert_category_translation,
        upsert_post_translation,
    },
};
