//! Venues where activities take place.

use serde::Deserialize;
use uuid::Uuid;

use kidsguide_db::db::connection::DbConnection;
use kidsguide_db::db::pagination::{Page, PageRequest};
use kidsguide_db::db::query::location as location_query;
use kidsguide_db::model::location::{Location, LocationChanges, NewLocation};

use super::ensure_deleted;
use crate::error::{ServiceError, ServiceResult};
use crate::validation::{Validate, ValidationErrors, optional_text, required_text, resolve_slug};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    pub name: String,
    pub slug: Option<String>,
    pub address: Option<String>,
    pub city_id: Option<Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationFields {
    pub name: String,
    pub slug: String,
    pub address: Option<String>,
    pub city_id: Option<Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

fn check_coordinate(errors: &mut ValidationErrors, field: &str, value: Option<f64>, bound: f64) {
    if value.is_some_and(|v| !v.is_finite() || v.abs() > bound) {
        errors.push(field, &format!("must be between -{bound} and {bound}"));
    }
}

impl Validate for LocationInput {
    type Valid = LocationFields;

    fn validate(self) -> Result<LocationFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required_text(&mut errors, "name", &self.name);
        let slug = resolve_slug(&mut errors, "slug", self.slug, &name);
        check_coordinate(&mut errors, "latitude", self.latitude, 90.0);
        check_coordinate(&mut errors, "longitude", self.longitude, 180.0);
        if self.latitude.is_some() != self.longitude.is_some() {
            errors.push("longitude", "latitude and longitude must be given together");
        }

        errors.finish(LocationFields {
            name,
            slug,
            address: optional_text(self.address),
            city_id: self.city_id,
            latitude: self.latitude,
            longitude: self.longitude,
        })
    }
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    city_slug: Option<&str>,
    page: PageRequest,
) -> ServiceResult<Page<Location>> {
    Ok(location_query::list(conn, city_slug, page).await?)
}

/// ## Errors
/// Returns `NotFound` if no location has this slug.
pub async fn get_by_slug(conn: &mut DbConnection<'_>, slug: &str) -> ServiceResult<Location> {
    location_query::find_by_slug(conn, slug)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("location '{slug}'")))
}

/// ## Errors
/// Returns a validation error (including an unknown city), or `Conflict`.
#[tracing::instrument(skip(conn, input))]
pub async fn create(conn: &mut DbConnection<'_>, input: LocationInput) -> ServiceResult<Location> {
    let fields = input.validate()?;
    let new_location = NewLocation {
        id: Uuid::now_v7(),
        name: fields.name,
        slug: fields.slug,
        address: fields.address,
        city_id: fields.city_id,
        latitude: fields.latitude,
        longitude: fields.longitude,
    };
    Ok(location_query::create(conn, &new_location).await?)
}

/// ## Errors
/// Returns a validation error, `NotFound`, or `Conflict`.
#[tracing::instrument(skip(conn, input))]
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    input: LocationInput,
) -> ServiceResult<Location> {
    let fields = input.validate()?;
    let changes = LocationChanges {
        name: fields.name,
        slug: fields.slug,
        address: fields.address,
        city_id: fields.city_id,
        latitude: fields.latitude,
        longitude: fields.longitude,
        updated_at: chrono::Utc::now(),
    };
    location_query::update(conn, id, &changes)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("location {id}")))
}

/// ## Errors
/// Returns `NotFound` if no location has this ID.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    ensure_deleted(location_query::delete(conn, id).await?, "location", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(latitude: Option<f64>, longitude: Option<f64>) -> LocationInput {
        LocationInput {
            name: "Scoville Park".to_string(),
            slug: None,
            address: Some("800 W Lake St".to_string()),
            city_id: None,
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_coordinates_in_range() {
        assert!(input(Some(41.8881), Some(-87.7845)).validate().is_ok());
        assert!(input(None, None).validate().is_ok());
    }

    #[test]
    fn test_coordinates_out_of_range() {
        let Err(errors) = input(Some(95.0), Some(-200.0)).validate() else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.fields(), vec!["latitude", "longitude"]);
    }

    #[test]
    fn test_half_a_coordinate_rejected() {
        let result = input(Some(41.8881), None).validate();
        assert_eq!(result.err().map(|e| e.fields().join(",")), Some("longitude".to_string()));
    }
}
