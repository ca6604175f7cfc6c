//! Organizations that run activities (libraries, park districts, clubs).

use serde::Deserialize;
use uuid::Uuid;

use kidsguide_db::db::connection::DbConnection;
use kidsguide_db::db::pagination::{Page, PageRequest};
use kidsguide_db::db::query::organization as organization_query;
use kidsguide_db::model::organization::{NewOrganization, Organization, OrganizationChanges};

use super::ensure_deleted;
use crate::error::{ServiceError, ServiceResult};
use crate::validation::{
    Validate, ValidationErrors, optional_email, optional_text, optional_url, required_text,
    resolve_slug,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationInput {
    pub name: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationFields {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub logo_url: Option<String>,
}

impl Validate for OrganizationInput {
    type Valid = OrganizationFields;

    fn validate(self) -> Result<OrganizationFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = required_text(&mut errors, "name", &self.name);
        let slug = resolve_slug(&mut errors, "slug", self.slug, &name);
        let website = optional_url(&mut errors, "website", self.website);
        let email = optional_email(&mut errors, "email", self.email);
        let logo_url = optional_url(&mut errors, "logoUrl", self.logo_url);

        errors.finish(OrganizationFields {
            name,
            slug,
            description: optional_text(self.description),
            website,
            email,
            phone: optional_text(self.phone),
            logo_url,
        })
    }
}

/// ## Summary
/// Lists organizations, optionally narrowed by a case-insensitive name search.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    search: Option<&str>,
    page: PageRequest,
) -> ServiceResult<Page<Organization>> {
    Ok(organization_query::list(conn, search, page).await?)
}

/// ## Errors
/// Returns `NotFound` if no organization has this slug.
pub async fn get_by_slug(conn: &mut DbConnection<'_>, slug: &str) -> ServiceResult<Organization> {
    organization_query::find_by_slug(conn, slug)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("organization '{slug}'")))
}

/// ## Errors
/// Returns a validation error, or `Conflict` if the slug is taken.
#[tracing::instrument(skip(conn, input))]
pub async fn create(
    conn: &mut DbConnection<'_>,
    input: OrganizationInput,
) -> ServiceResult<Organization> {
    let fields = input.validate()?;
    let new_organization = NewOrganization {
        id: Uuid::now_v7(),
        name: fields.name,
        slug: fields.slug,
        description: fields.description,
        website: fields.website,
        email: fields.email,
        phone: fields.phone,
        logo_url: fields.logo_url,
    };
    Ok(organization_query::create(conn, &new_organization).await?)
}

/// ## Errors
/// Returns a validation error, `NotFound`, or `Conflict`.
#[tracing::instrument(skip(conn, input))]
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    input: OrganizationInput,
) -> ServiceResult<Organization> {
    let fields = input.validate()?;
    let changes = OrganizationChanges {
        name: fields.name,
        slug: fields.slug,
        description: fields.description,
        website: fields.website,
        email: fields.email,
        phone: fields.phone,
        logo_url: fields.logo_url,
        updated_at: chrono::Utc::now(),
    };
    organization_query::update(conn, id, &changes)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("organization {id}")))
}

/// ## Errors
/// Returns `NotFound` if no organization has this ID.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    ensure_deleted(organization_query::delete(conn, id).await?, "organization", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> OrganizationInput {
        OrganizationInput {
            name: "Oak Park Public Library".to_string(),
            slug: None,
            description: None,
            website: Some("https://oppl.example.org".to_string()),
            email: Some("kids@oppl.example.org".to_string()),
            phone: Some("708-555-0100".to_string()),
            logo_url: None,
        }
    }

    #[test]
    fn test_valid_organization() {
        let fields = input().validate();
        assert_eq!(
            fields.map(|f| f.slug).ok(),
            Some("oak-park-public-library".to_string())
        );
    }

    #[test]
    fn test_reports_url_and_email_together() {
        let mut bad = input();
        bad.website = Some("oppl.example.org".to_string());
        bad.email = Some("kids at oppl".to_string());
        bad.logo_url = Some("ftp://oppl.example.org/logo.png".to_string());
        let Err(errors) = bad.validate() else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.fields(), vec!["website", "email", "logoUrl"]);
    }
}
