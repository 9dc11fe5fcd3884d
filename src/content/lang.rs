//! Translation fallback rules.
//!
//! The fallback chain is requested language -> base-language field, applied
//! field by field: a translation row may override the title while its empty
//! content still falls back to the base content.

/// Pick the translated text when it is present and non-empty, else the base.
#[must_use]
pub fn localized<'a>(base: &'a str, translated: Option<&'a str>) -> &'a str {
    match translated {
        Some(text) if !text.trim().is_empty() => text,
        _ => base,
    }
}

/// Optional-field variant of [`localized`].
#[must_use]
pub fn localized_opt<'a>(base: Option<&'a str>, translated: Option<&'a str>) -> Option<&'a str> {
    match translated {
        Some(text) if !text.trim().is_empty() => Some(text),
        _ => base,
    }
}
