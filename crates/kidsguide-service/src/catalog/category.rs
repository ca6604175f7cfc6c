//! Activity categories ("Parks & Playgrounds", "Libraries", ...).

use serde::Deserialize;
use uuid::Uuid;

use kidsguide_db::db::connection::DbConnection;
use kidsguide_db::db::pagination::{Page, PageRequest};
use kidsguide_db::db::query::category as category_query;
use kidsguide_db::model::category::{Category, CategoryChanges, NewCategory};

use super::ensure_deleted;
use crate::error::{ServiceError, ServiceResult};
use crate::validation::{Validate, ValidationErrors, optional_text, required_text, resolve_slug};

/// Body of `POST`/`PUT /admin/categories`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    /// Icon name or emoji shown next to the category.
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFields {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl Validate for CategoryInput {
    type Valid = CategoryFields;

    fn validate(self) -> Result<CategoryFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required_text(&mut errors, "name", &self.name);
        let slug = resolve_slug(&mut errors, "slug", self.slug, &name);
        errors.finish(CategoryFields {
            name,
            slug,
            description: optional_text(self.description),
            icon: optional_text(self.icon),
        })
    }
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(conn: &mut DbConnection<'_>, page: PageRequest) -> ServiceResult<Page<Category>> {
    Ok(category_query::list(conn, page).await?)
}

/// ## Errors
/// Returns `NotFound` if no category has this slug.
pub async fn get_by_slug(conn: &mut DbConnection<'_>, slug: &str) -> ServiceResult<Category> {
    category_query::find_by_slug(conn, slug)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("category '{slug}'")))
}

/// ## Errors
/// Returns a validation error, or `Conflict` if the slug is taken.
#[tracing::instrument(skip(conn, input))]
pub async fn create(conn: &mut DbConnection<'_>, input: CategoryInput) -> ServiceResult<Category> {
    let fields = input.validate()?;
    let new_category = NewCategory {
        id: Uuid::now_v7(),
        name: fields.name,
        slug: fields.slug,
        description: fields.description,
        icon: fields.icon,
    };
    Ok(category_query::create(conn, &new_category).await?)
}

/// ## Errors
/// Returns a validation error, `NotFound`, or `Conflict`.
#[tracing::instrument(skip(conn, input))]
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    input: CategoryInput,
) -> ServiceResult<Category> {
    let fields = input.validate()?;
    let changes = CategoryChanges {
        name: fields.name,
        slug: fields.slug,
        description: fields.description,
        icon: fields.icon,
        updated_at: chrono::Utc::now(),
    };
    category_query::update(conn, id, &changes)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("category {id}")))
}

/// ## Errors
/// Returns `NotFound` if no category has this ID.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    ensure_deleted(category_query::delete(conn, id).await?, "category", id)
}
