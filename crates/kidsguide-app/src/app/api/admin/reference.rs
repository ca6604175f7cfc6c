//! Create/update/delete for the smaller catalog tables.

use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use kidsguide_db::model::age_group::AgeGroup;
use kidsguide_db::model::category::Category;
use kidsguide_db::model::city::City;
use kidsguide_db::model::location::Location;
use kidsguide_db::model::organization::Organization;
use kidsguide_db::model::tag::Tag;
use kidsguide_service::age_group::{self, AgeGroupInput};
use kidsguide_service::catalog::category::{self, CategoryInput};
use kidsguide_service::catalog::city::{self, CityInput};
use kidsguide_service::catalog::location::{self, LocationInput};
use kidsguide_service::catalog::organization::{self, OrganizationInput};
use kidsguide_service::catalog::tag::{self, TagInput};

use crate::app::api::params::{json_body, path_id};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

#[handler]
async fn create_city(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<City>> {
    let input: CityInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let created = city::create(&mut conn, input).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

#[handler]
async fn update_city(req: &mut Request, depot: &mut Depot) -> AppResult<Json<City>> {
    let id = path_id(req)?;
    let input: CityInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(city::update(&mut conn, id, input).await?))
}

#[handler]
async fn delete_city(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let id = path_id(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    city::delete(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[handler]
async fn create_category(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<Category>> {
    let input: CategoryInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let created = category::create(&mut conn, input).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

#[handler]
async fn update_category(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Category>> {
    let id = path_id(req)?;
    let input: CategoryInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(category::update(&mut conn, id, input).await?))
}

#[handler]
async fn delete_category(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let id = path_id(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    category::delete(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[handler]
async fn create_tag(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<Tag>> {
    let input: TagInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let created = tag::create(&mut conn, input).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

#[handler]
async fn update_tag(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Tag>> {
    let id = path_id(req)?;
    let input: TagInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(tag::update(&mut conn, id, input).await?))
}

#[handler]
async fn delete_tag(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let id = path_id(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    tag::delete(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[handler]
async fn create_organization(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<Organization>> {
    let input: OrganizationInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let created = organization::create(&mut conn, input).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

#[handler]
async fn update_organization(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Organization>> {
    let id = path_id(req)?;
    let input: OrganizationInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(organization::update(&mut conn, id, input).await?))
}

#[handler]
async fn delete_organization(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let id = path_id(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    organization::delete(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[handler]
async fn create_location(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<Location>> {
    let input: LocationInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let created = location::create(&mut conn, input).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

#[handler]
async fn update_location(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Location>> {
    let id = path_id(req)?;
    let input: LocationInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(location::update(&mut conn, id, input).await?))
}

#[handler]
async fn delete_location(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let id = path_id(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    location::delete(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// ## Summary
/// POST /api/admin/age-groups
///
/// ## Errors
/// Returns HTTP 409 when the range overlaps an existing age group.
#[handler]
async fn create_age_group(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<AgeGroup>> {
    let input: AgeGroupInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let created = age_group::create(&mut conn, input).await?;
    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

#[handler]
async fn update_age_group(req: &mut Request, depot: &mut Depot) -> AppResult<Json<AgeGroup>> {
    let id = path_id(req)?;
    let input: AgeGroupInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    Ok(Json(age_group::update(&mut conn, id, input).await?))
}

#[handler]
async fn delete_age_group(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let id = path_id(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    age_group::delete(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /{path}`, `PUT /{path}/{id}` and `DELETE /{path}/{id}`.
fn crud(
    path: &'static str,
    create: impl salvo::Handler,
    update: impl salvo::Handler,
    delete: impl salvo::Handler,
) -> Router {
    Router::with_path(path)
        .post(create)
        .push(Router::with_path("{id}").put(update).delete(delete))
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(crud("cities", create_city, update_city, delete_city))
        .push(crud("categories", create_category, update_category, delete_category))
        .push(crud("tags", create_tag, update_tag, delete_tag))
        .push(crud(
            "organizations",
            create_organization,
            update_organization,
            delete_organization,
        ))
        .push(crud("locations", create_location, update_location, delete_location))
        .push(crud("age-groups", create_age_group, update_age_group, delete_age_group))
}
