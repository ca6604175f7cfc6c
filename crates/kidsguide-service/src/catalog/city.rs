//! Cities served by the directory.

use serde::Deserialize;
use uuid::Uuid;

use kidsguide_db::db::connection::DbConnection;
use kidsguide_db::db::pagination::{Page, PageRequest};
use kidsguide_db::db::query::city as city_query;
use kidsguide_db::model::city::{City, CityChanges, NewCity};

use super::ensure_deleted;
use crate::error::{ServiceError, ServiceResult};
use crate::validation::{Validate, ValidationErrors, optional_text, required_text, resolve_slug};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CityInput {
    pub name: String,
    pub slug: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityFields {
    pub name: String,
    pub slug: String,
    pub state: Option<String>,
}

impl Validate for CityInput {
    type Valid = CityFields;

    fn validate(self) -> Result<CityFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required_text(&mut errors, "name", &self.name);
        let slug = resolve_slug(&mut errors, "slug", self.slug, &name);
        errors.finish(CityFields {
            name,
            slug,
            state: optional_text(self.state),
        })
    }
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(conn: &mut DbConnection<'_>, page: PageRequest) -> ServiceResult<Page<City>> {
    Ok(city_query::list(conn, page).await?)
}

/// ## Errors
/// Returns `NotFound` if no city has this slug.
pub async fn get_by_slug(conn: &mut DbConnection<'_>, slug: &str) -> ServiceResult<City> {
    city_query::find_by_slug(conn, slug)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("city '{slug}'")))
}

/// ## Errors
/// Returns a validation error, or `Conflict` if the slug is taken.
#[tracing::instrument(skip(conn, input))]
pub async fn create(conn: &mut DbConnection<'_>, input: CityInput) -> ServiceResult<City> {
    let fields = input.validate()?;
    let new_city = NewCity {
        id: Uuid::now_v7(),
        name: fields.name,
        slug: fields.slug,
        state: fields.state,
    };
    Ok(city_query::create(conn, &new_city).await?)
}

/// ## Errors
/// Returns a validation error, `NotFound`, or `Conflict`.
#[tracing::instrument(skip(conn, input))]
pub async fn update(conn: &mut DbConnection<'_>, id: Uuid, input: CityInput) -> ServiceResult<City> {
    let fields = input.validate()?;
    let changes = CityChanges {
        name: fields.name,
        slug: fields.slug,
        state: fields.state,
        updated_at: chrono::Utc::now(),
    };
    city_query::update(conn, id, &changes)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("city {id}")))
}

/// Deleting a city detaches its locations and activities (`ON DELETE SET NULL`).
///
/// ## Errors
/// Returns `NotFound` if no city has this ID.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    ensure_deleted(city_query::delete(conn, id).await?, "city", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_input_normalizes() {
        let fields = CityInput {
            name: "  Oak Park ".to_string(),
            slug: None,
            state: Some("  ".to_string()),
        }
        .validate();
        assert_eq!(
            fields.ok(),
            Some(CityFields {
                name: "Oak Park".to_string(),
                slug: "oak-park".to_string(),
                state: None,
            })
        );
    }

    #[test]
    fn test_city_input_requires_name() {
        let result = CityInput {
            name: String::new(),
            slug: None,
            state: None,
        }
        .validate();
        assert_eq!(result.err().map(|e| e.fields().join(",")), Some("name".to_string()));
    }
}
