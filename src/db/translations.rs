//! Translation row helpers.
//!
//! Translation rows are created on demand per language and updated
//! independently of their parent entity, so writes are upserts keyed on the
//! `(entity, lang)` uniqueness constraint.

use diesel::{prelude::*, result::QueryResult, upsert::excluded};
use diesel_async::RunQueryDsl;

use super::connection::DbConnection;
use crate::models::{CategoryTranslation, PostTranslation};

/// Insert or update a category translation for one language.
///
/// # Errors
/// Returns any error produced by the upsert query.
#[must_use = "handle the result"]
pub async fn upsert_category_translation(
    conn: &mut DbConnection,
    tr: &crate::models::NewCategoryTranslation<'_>,
) -> QueryResult<usize> {
    use crate::schema::category_translations::dsl as t;
    diesel::insert_into(t::category_translations)
        .values(tr)
        .on_conflict((t::category_id, t::lang))
        .do_update()
        .set((t::title.eq(excluded(t::title)), t::content.eq(excluded(t::content))))
        .execute(conn)
        .await
}

/// Insert or update a post translation for one language.
///
/// # Errors
/// Returns any error produced by the upsert query.
#[must_use = "handle the result"]
pub async fn upsert_post_translation(
    conn: &mut DbConnection,
    tr: &crate::models::NewPostTranslation<'_>,
) -> QueryResult<usize> {
    use crate::schema::post_translations::dsl as t;
    diesel::insert_into(t::post_translations)
        .values(tr)
        .on_conflict((t::post_id, t::lang))
        .do_update()
        .set((t::title.eq(excluded(t::title)), t::content.eq(excluded(t::content))))
        .execute(conn)
        .await
}

/// Batch-load category translations for one language.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn category_translations_for(
    conn: &mut DbConnection,
    ids: &[i32],
    language: &str,
) -> QueryResult<Vec<CategoryTranslation>> {
    use crate::schema::category_translations::dsl::{category_id, category_translations, lang};
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    category_translations
        .filter(category_id.eq_any(ids.iter().copied()))
        .filter(lang.eq(language))
        .load::<CategoryTranslation>(conn)
        .await
}

/// Batch-load post translations for one language.
///
/// # Errors
/// Returns any error produced by the underlying database query.
#[must_use = "handle the result"]
pub async fn post_translations_for(
    conn: &mut DbConnection,
    ids: &[i32],
    language: &str,
) -> QueryResult<Vec<PostTranslation>> {
    use crate::schema::post_translations::dsl::{lang, post_id, post_translations};
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    post_translations
        .filter(post_id.eq_any(ids.iter().copied()))
        .filter(lang.eq(language))
        .load::<PostTranslation>(conn)
        .await
}
