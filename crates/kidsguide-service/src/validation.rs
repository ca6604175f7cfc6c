//! Structured request validation.
//!
//! ## Summary
//! Admin payloads arrive as loosely shaped JSON. Each payload type
//! implements [`Validate`], turning itself into a typed, normalized value or
//! a list of per-field problems the HTTP layer returns as-is.

use serde::Serialize;

use kidsguide_core::util::slug::{generate_slug, is_valid_slug};

/// One problem with one field of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every problem found in a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }

    /// ## Summary
    /// Returns `value` when no errors were recorded, otherwise the errors.
    ///
    /// ## Errors
    /// Returns `self` if any field failed validation.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// A request payload that can be checked and normalized.
pub trait Validate {
    type Valid;

    /// ## Errors
    /// Returns every field problem found, not just the first.
    fn validate(self) -> Result<Self::Valid, ValidationErrors>;
}

const MAX_NAME_LEN: usize = 200;

/// Trims a required text field; records an error if it is blank or too long.
pub fn required_text(errors: &mut ValidationErrors, field: &str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, "is required");
    } else if value.chars().count() > MAX_NAME_LEN {
        errors.push(field, "is too long");
    }
    value.to_string()
}

/// Trims an optional text field; blank becomes `None`.
#[must_use]
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Optional absolute `http(s)` URL.
pub fn optional_url(errors: &mut ValidationErrors, field: &str, value: Option<String>) -> Option<String> {
    let value = optional_text(value)?;
    let valid = (value.starts_with("http://") || value.starts_with("https://"))
        && value.len() > "https://".len()
        && !value.chars().any(char::is_whitespace);
    if !valid {
        errors.push(field, "must be an http(s) URL");
    }
    Some(value)
}

/// Optional email address; only the overall `local@domain.tld` shape is checked.
pub fn optional_email(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<String>,
) -> Option<String> {
    let value = optional_text(value)?;
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        errors.push(field, "must be an email address");
    }
    Some(value)
}

/// ## Summary
/// Uses the caller's slug when given (it must already be canonical),
/// otherwise derives one from `name`.
pub fn resolve_slug(
    errors: &mut ValidationErrors,
    field: &str,
    slug: Option<String>,
    name: &str,
) -> String {
    match optional_text(slug) {
        Some(slug) => {
            if !is_valid_slug(&slug) {
                errors.push(field, "must contain only lowercase letters, digits and single hyphens");
            }
            slug
        }
        None => {
            let generated = generate_slug(name);
            if generated.is_empty() && !name.trim().is_empty() {
                errors.push(field, "cannot be derived from the name; provide one");
            }
            generated
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_trims_and_flags_blank() {
        let mut errors = ValidationErrors::new();
        assert_eq!(required_text(&mut errors, "name", "  Zoo  "), "Zoo");
        assert!(errors.is_empty());

        required_text(&mut errors, "name", "   ");
        assert_eq!(errors.fields(), vec!["name"]);
    }

    #[test]
    fn test_optional_text_blank_is_none() {
        assert_eq!(optional_text(Some("  ".to_string())), None);
        assert_eq!(optional_text(Some(" x ".to_string())), Some("x".to_string()));
    }

    #[test]
    fn test_optional_url() {
        let mut errors = ValidationErrors::new();
        optional_url(&mut errors, "website", Some("https://zoo.example.org".to_string()));
        assert!(errors.is_empty());

        optional_url(&mut errors, "website", Some("zoo.example.org".to_string()));
        assert_eq!(errors.fields(), vec!["website"]);
    }

    #[test]
    fn test_optional_email() {
        let mut errors = ValidationErrors::new();
        optional_email(&mut errors, "email", Some("hello@library.org".to_string()));
        assert!(errors.is_empty());

        optional_email(&mut errors, "email", Some("hello@library".to_string()));
        optional_email(&mut errors, "email", Some("not an email".to_string()));
        assert_eq!(errors.fields(), vec!["email", "email"]);
    }

    #[test]
    fn test_resolve_slug_generates_from_name() {
        let mut errors = ValidationErrors::new();
        assert_eq!(resolve_slug(&mut errors, "slug", None, "Splash Pads"), "splash-pads");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_resolve_slug_rejects_malformed() {
        let mut errors = ValidationErrors::new();
        resolve_slug(&mut errors, "slug", Some("Splash Pads".to_string()), "Splash Pads");
        assert_eq!(errors.fields(), vec!["slug"]);
    }

    #[test]
    fn test_display_joins_fields() {
        let mut errors = ValidationErrors::single("name", "is required");
        errors.push("slug", "is invalid");
        assert_eq!(errors.to_string(), "name: is required; slug: is invalid");
    }

    #[test]
    fn test_finish() {
        assert_eq!(ValidationErrors::new().finish(5), Ok(5));
        assert!(ValidationErrors::single("x", "bad").finish(5).is_err());
    }
}
