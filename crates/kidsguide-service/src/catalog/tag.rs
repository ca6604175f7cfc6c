//! Free-form tags ("indoor", "free", "rainy-day").

use serde::Deserialize;
use uuid::Uuid;

use kidsguide_db::db::connection::DbConnection;
use kidsguide_db::db::pagination::{Page, PageRequest};
use kidsguide_db::db::query::tag as tag_query;
use kidsguide_db::model::tag::{NewTag, Tag, TagChanges};

use super::ensure_deleted;
use crate::error::{ServiceError, ServiceResult};
use crate::validation::{Validate, ValidationErrors, required_text, resolve_slug};

#[derive(Debug, Clone, Deserialize)]
pub struct TagInput {
    pub name: String,
    pub slug: Option<String>,
}

impl Validate for TagInput {
    type Valid = (String, String);

    /// Yields `(name, slug)`.
    fn validate(self) -> Result<(String, String), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required_text(&mut errors, "name", &self.name);
        let slug = resolve_slug(&mut errors, "slug", self.slug, &name);
        errors.finish((name, slug))
    }
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(conn: &mut DbConnection<'_>, page: PageRequest) -> ServiceResult<Page<Tag>> {
    Ok(tag_query::list(conn, page).await?)
}

/// ## Errors
/// Returns `NotFound` if no tag has this slug.
pub async fn get_by_slug(conn: &mut DbConnection<'_>, slug: &str) -> ServiceResult<Tag> {
    tag_query::find_by_slug(conn, slug)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("tag '{slug}'")))
}

/// ## Errors
/// Returns a validation error, or `Conflict` if the slug is taken.
#[tracing::instrument(skip(conn, input))]
pub async fn create(conn: &mut DbConnection<'_>, input: TagInput) -> ServiceResult<Tag> {
    let (name, slug) = input.validate()?;
    let new_tag = NewTag {
        id: Uuid::now_v7(),
        name,
        slug,
    };
    Ok(tag_query::create(conn, &new_tag).await?)
}

/// ## Errors
/// Returns a validation error, `NotFound`, or `Conflict`.
#[tracing::instrument(skip(conn, input))]
pub async fn update(conn: &mut DbConnection<'_>, id: Uuid, input: TagInput) -> ServiceResult<Tag> {
    let (name, slug) = input.validate()?;
    let changes = TagChanges {
        name,
        slug,
        updated_at: chrono::Utc::now(),
    };
    tag_query::update(conn, id, &changes)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("tag {id}")))
}

/// ## Errors
/// Returns `NotFound` if no tag has this ID.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    ensure_deleted(tag_query::delete(conn, id).await?, "tag", id)
}
