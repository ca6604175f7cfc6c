//! Age groups and their range rules.
//!
//! ## Summary
//! Age groups partition childhood into inclusive year ranges ("Toddlers
//! 1-3", "Preschool 3-5"...). Two groups may not cover the same age, so
//! every create and update is checked against the stored set with
//! [`find_overlap`] before it is written.

use serde::Deserialize;
use uuid::Uuid;

use kidsguide_core::constants::MAX_CHILD_AGE;
use kidsguide_db::db::connection::DbConnection;
use kidsguide_db::db::pagination::{Page, PageRequest};
use kidsguide_db::db::query::age_group as age_group_query;
use kidsguide_db::model::age_group::{AgeGroup, AgeGroupChanges, NewAgeGroup};

use crate::error::{ServiceError, ServiceResult};
use crate::validation::{Validate, ValidationErrors, required_text, resolve_slug};

/// An inclusive range of ages in whole years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: i32,
    pub max: i32,
}

impl AgeRange {
    /// Whether the two inclusive ranges share at least one age.
    #[must_use]
    pub fn overlaps(self, other: AgeRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

impl From<&AgeGroup> for AgeRange {
    fn from(group: &AgeGroup) -> Self {
        Self {
            min: group.min_age,
            max: group.max_age,
        }
    }
}

/// ## Summary
/// Returns the first group in `groups` whose range overlaps `candidate`,
/// ignoring the group with id `exclude` (the one being edited).
#[must_use]
pub fn find_overlap(
    candidate: AgeRange,
    groups: &[AgeGroup],
    exclude: Option<Uuid>,
) -> Option<&AgeGroup> {
    groups
        .iter()
        .filter(|group| Some(group.id) != exclude)
        .find(|group| candidate.overlaps(AgeRange::from(*group)))
}

/// Body of `POST`/`PUT /admin/age-groups`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGroupInput {
    pub name: String,
    pub slug: Option<String>,
    pub min_age: i32,
    pub max_age: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgeGroupFields {
    pub name: String,
    pub slug: String,
    pub range: AgeRange,
}

impl Validate for AgeGroupInput {
    type Valid = AgeGroupFields;

    fn validate(self) -> Result<AgeGroupFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = required_text(&mut errors, "name", &self.name);
        let slug = resolve_slug(&mut errors, "slug", self.slug, &name);

        if self.min_age < 0 {
            errors.push("minAge", "must not be negative");
        }
        if self.max_age > MAX_CHILD_AGE {
            errors.push("maxAge", "must be 21 or younger");
        }
        if self.min_age > self.max_age {
            errors.push("maxAge", "must be greater than or equal to minAge");
        }

        errors.finish(AgeGroupFields {
            name,
            slug,
            range: AgeRange {
                min: self.min_age,
                max: self.max_age,
            },
        })
    }
}

fn overlap_conflict(range: AgeRange, existing: &AgeGroup) -> ServiceError {
    ServiceError::Conflict(format!(
        "ages {}-{} overlap age group '{}' ({}-{})",
        range.min, range.max, existing.name, existing.min_age, existing.max_age
    ))
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(conn: &mut DbConnection<'_>, page: PageRequest) -> ServiceResult<Page<AgeGroup>> {
    Ok(age_group_query::list(conn, page).await?)
}

/// ## Errors
/// Returns `NotFound` if no age group has this slug.
pub async fn get_by_slug(conn: &mut DbConnection<'_>, slug: &str) -> ServiceResult<AgeGroup> {
    age_group_query::find_by_slug(conn, slug)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("age group '{slug}'")))
}

/// ## Summary
/// Creates an age group whose range does not overlap any stored group.
///
/// ## Errors
/// Returns a validation error, or `Conflict` when the range overlaps an
/// existing group or the slug is taken.
#[tracing::instrument(skip(conn, input))]
pub async fn create(conn: &mut DbConnection<'_>, input: AgeGroupInput) -> ServiceResult<AgeGroup> {
    let fields = input.validate()?;

    let existing = age_group_query::list_all(conn).await?;
    if let Some(other) = find_overlap(fields.range, &existing, None) {
        tracing::debug!(other = %other.slug, "Rejected overlapping age group");
        return Err(overlap_conflict(fields.range, other));
    }

    let new_group = NewAgeGroup {
        id: Uuid::now_v7(),
        name: fields.name,
        slug: fields.slug,
        min_age: fields.range.min,
        max_age: fields.range.max,
    };
    Ok(age_group_query::create(conn, &new_group).await?)
}

/// ## Summary
/// Updates an age group; its own current range is not counted as an overlap.
///
/// ## Errors
/// Returns a validation error, `NotFound`, or `Conflict`.
#[tracing::instrument(skip(conn, input))]
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    input: AgeGroupInput,
) -> ServiceResult<AgeGroup> {
    let fields = input.validate()?;

    let existing = age_group_query::list_all(conn).await?;
    if !existing.iter().any(|group| group.id == id) {
        return Err(ServiceError::NotFound(format!("age group {id}")));
    }
    if let Some(other) = find_overlap(fields.range, &existing, Some(id)) {
        return Err(overlap_conflict(fields.range, other));
    }

    let changes = AgeGroupChanges {
        name: fields.name,
        slug: fields.slug,
        min_age: fields.range.min,
        max_age: fields.range.max,
        updated_at: chrono::Utc::now(),
    };
    age_group_query::update(conn, id, &changes)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("age group {id}")))
}

/// ## Errors
/// Returns `NotFound` if no age group has this ID.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    if age_group_query::delete(conn, id).await? {
        Ok(())
    } else {
        Err(ServiceError::NotFound(format!("age group {id}")))
    }
}
