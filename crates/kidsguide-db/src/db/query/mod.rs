pub mod activity;
pub mod age_group;
pub mod category;
pub mod city;
pub mod event;
pub mod location;
pub mod organization;
pub mod tag;

/// ## Summary
/// Builds an `ILIKE` pattern matching `needle` anywhere, with `%`, `_`
/// and `\` in the needle matched literally.
#[must_use]
pub fn contains_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
