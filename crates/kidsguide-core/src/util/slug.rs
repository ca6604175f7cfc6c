//! Slug generation utilities for human-readable resource identifiers.
//!
//! ## Summary
//! Catalog entries (cities, categories, activities, ...) get a stable,
//! URL-safe slug from their name. Generated event occurrences use a looser
//! title transform plus a timestamp suffix so a whole recurring batch can
//! share one title.

/// Generate a URL-safe slug from a name.
///
/// Converts to lowercase, replaces spaces and special characters with hyphens,
/// collapses multiple hyphens, and trims edge hyphens.
///
/// Examples:
/// - "Story Time" -> "story-time"
/// - "Kids' Yoga & Stretch" -> "kids-yoga-stretch"
/// - "Ages 3-5" -> "ages-3-5"
#[must_use]
pub fn generate_slug(name: &str) -> String {
    let slug = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    // Slugs share the path segment with ids; keep them distinguishable
    if uuid::Uuid::parse_str(&slug).is_ok() {
        format!("res-{slug}")
    } else {
        slug
    }
}

/// Lowercase a title, turn each whitespace run into one hyphen and drop
/// everything that is not `[a-z0-9_-]`.
///
/// Unlike [`generate_slug`] this keeps underscores and repeated hyphens as
/// written: "Art  Club!" -> "art-club", "Lego -- Build" -> "lego---build".
#[must_use]
pub fn slugify_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_whitespace = false;

    for c in title.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
            out.push(c);
        }
    }

    out
}

/// Slug for one generated event occurrence: title slug, a hyphen, and the
/// occurrence timestamp in milliseconds.
#[must_use]
pub fn occurrence_slug(title: &str, timestamp_millis: i64) -> String {
    format!("{}-{timestamp_millis}", slugify_title(title))
}

/// Whether a caller-supplied slug is already in canonical form.
#[must_use]
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
