//! Queryable and insertable records for the tenant content schema.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Tenant record. A public hostname resolves to a site through either its
/// `subdomain` (under the platform base domain) or its `custom_domain`.
#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
pub struct Site {
    pub id: i32,
    pub name: String,
    pub subdomain: Option<String>,
    pub custom_domain: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = crate::schema::sites)]
pub struct NewSite<'a> {
    pub name: &'a str,
    pub subdomain: Option<&'a str>,
    pub custom_domain: Option<&'a str>,
}

/// Node in a per-site category tree. `parent_id` is `None` for roots; the
/// parent chain is acyclic and of unbounded depth.
#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
pub struct Category {
    pub id: i32,
    pub site_id: i32,
    pub parent_id: Option<i32>,
    pub slug: String,
    pub title: String,
    pub content: Option<String>,
    pub position: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory<'a> {
    pub site_id: i32,
    pub parent_id: Option<i32>,
    pub slug: &'a str,
    pub title: &'a str,
    pub content: Option<&'a str>,
    pub position: i32,
}

/// Language-keyed override of a category's title and content, unique on
/// `(category_id, lang)`.
#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
pub struct CategoryTranslation {
    pub id: i32,
    pub category_id: i32,
    pub lang: String,
    pub title: String,
    pub content: Option<String>,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = crate::schema::category_translations)]
pub struct NewCategoryTranslation<'a> {
    pub category_id: i32,
    pub lang: &'a str,
    pub title: &'a str,
    pub content: Option<&'a str>,
}

/// Leaf content unit. `category_id` is nullable only transiently (a post
/// whose category was deleted); resolution treats such posts as attached
/// directly under the site root.
#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
pub struct Post {
    pub id: i32,
    pub site_id: i32,
    pub category_id: Option<i32>,
    pub slug: String,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub published: bool,
    pub is_featured: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::posts)]
pub struct NewPost<'a> {
    pub site_id: i32,
    pub category_id: Option<i32>,
    pub slug: &'a str,
    pub title: &'a str,
    pub content: &'a str,
    pub image: Option<&'a str>,
    pub published: bool,
    pub is_featured: bool,
    pub created_at: NaiveDateTime,
}

/// Language-keyed override of a post's title and content, unique on
/// `(post_id, lang)`.
#[derive(Queryable, Serialize, Deserialize, Debug, Clone)]
pub struct PostTranslation {
    pub id: i32,
    pub post_id: i32,
    pub lang: String,
    pub title: String,
    pub content: Option<String>,
}

#[derive(Insertable, Deserialize)]
#[diesel(table_name = crate::schema::post_translations)]
pub struct NewPostTranslation<'a> {
    pub post_id: i32,
    pub lang: &'a str,
    pub title: &'a str,
    pub content: Option<&'a str>,
}
