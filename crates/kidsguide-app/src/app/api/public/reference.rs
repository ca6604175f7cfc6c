//! Cities, categories, tags, age groups, organizations and locations.

use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use kidsguide_db::model::age_group::AgeGroup;
use kidsguide_db::model::category::Category;
use kidsguide_db::model::city::City;
use kidsguide_db::model::location::Location;
use kidsguide_db::model::organization::Organization;
use kidsguide_db::model::tag::Tag;
use kidsguide_service::age_group;
use kidsguide_service::catalog::{category, city, location, organization, tag};

use crate::app::api::params::{Paginated, page_request, path_slug, query_text};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

#[handler]
async fn list_cities(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Paginated<City>>> {
    let page = page_request(req, depot)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(city::list(&mut conn, page).await?.into()))
}

#[handler]
async fn get_city(req: &mut Request, depot: &mut Depot) -> AppResult<Json<City>> {
    let slug = path_slug(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(city::get_by_slug(&mut conn, &slug).await?))
}

#[handler]
async fn list_categories(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<Paginated<Category>>> {
    let page = page_request(req, depot)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(category::list(&mut conn, page).await?.into()))
}

#[handler]
async fn get_category(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Category>> {
    let slug = path_slug(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(category::get_by_slug(&mut conn, &slug).await?))
}

#[handler]
async fn list_tags(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Paginated<Tag>>> {
    let page = page_request(req, depot)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(tag::list(&mut conn, page).await?.into()))
}

#[handler]
async fn get_tag(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Tag>> {
    let slug = path_slug(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(tag::get_by_slug(&mut conn, &slug).await?))
}

#[handler]
async fn list_age_groups(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<Paginated<AgeGroup>>> {
    let page = page_request(req, depot)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(age_group::list(&mut conn, page).await?.into()))
}

#[handler]
async fn get_age_group(req: &mut Request, depot: &mut Depot) -> AppResult<Json<AgeGroup>> {
    let slug = path_slug(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(age_group::get_by_slug(&mut conn, &slug).await?))
}

/// ## Summary
/// GET /api/organizations, with an optional `q` name search.
#[handler]
async fn list_organizations(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<Paginated<Organization>>> {
    let page = page_request(req, depot)?;
    let search = query_text(req, "q");
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(
        organization::list(&mut conn, search.as_deref(), page)
            .await?
            .into(),
    ))
}

#[handler]
async fn get_organization(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Organization>> {
    let slug = path_slug(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(organization::get_by_slug(&mut conn, &slug).await?))
}

/// ## Summary
/// GET /api/locations, optionally limited to one `city` (slug).
#[handler]
async fn list_locations(
    req: &mut Request,
    depot: &mut Depot,
) -> AppResult<Json<Paginated<Location>>> {
    let page = page_request(req, depot)?;
    let city_slug = query_text(req, "city");
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(
        location::list(&mut conn, city_slug.as_deref(), page)
            .await?
            .into(),
    ))
}

#[handler]
async fn get_location(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Location>> {
    let slug = path_slug(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(location::get_by_slug(&mut conn, &slug).await?))
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(
            Router::with_path("cities")
                .get(list_cities)
                .push(Router::with_path("{slug}").get(get_city)),
        )
        .push(
            Router::with_path("categories")
                .get(list_categories)
                .push(Router::with_path("{slug}").get(get_category)),
        )
        .push(
            Router::with_path("tags")
                .get(list_tags)
                .push(Router::with_path("{slug}").get(get_tag)),
        )
        .push(
            Router::with_path("age-groups")
                .get(list_age_groups)
                .push(Router::with_path("{slug}").get(get_age_group)),
        )
        .push(
            Router::with_path("organizations")
                .get(list_organizations)
                .push(Router::with_path("{slug}").get(get_organization)),
        )
        .push(
            Router::with_path("locations")
                .get(list_locations)
                .push(Router::with_path("{slug}").get(get_location)),
        )
}
