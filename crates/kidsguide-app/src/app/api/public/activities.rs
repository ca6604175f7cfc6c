use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use kidsguide_db::db::query::activity::ActivityFilter;
use kidsguide_db::model::activity::Activity;
use kidsguide_service::catalog::activity::{self, ActivityDetail};

use crate::app::api::params::{Paginated, page_request, path_slug, query_flag, query_int, query_text};
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Errors
/// Returns `BadRequest` if `age` is not a whole number.
pub fn activity_filter(req: &Request) -> AppResult<ActivityFilter> {
    Ok(ActivityFilter {
        city: query_text(req, "city"),
        category: query_text(req, "category"),
        tag: query_text(req, "tag"),
        organization: query_text(req, "organization"),
        age: query_int(req, "age")?,
        search: query_text(req, "q"),
        featured: query_flag(req, "featured"),
    })
}

/// ## Summary
/// GET /api/activities
#[handler]
async fn list_activities(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Paginated<Activity>>> {
    let filter = activity_filter(req)?;
    let page = page_request(req, depot)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let activities = activity::list(&mut conn, &filter, page).await?;

    Ok(Json(activities.into()))
}

/// ## Summary
/// GET /api/activities/{slug}: the activity with its links and upcoming events.
#[handler]
async fn get_activity(req: &mut Request, depot: &mut Depot) -> AppResult<Json<ActivityDetail>> {
    let slug = path_slug(req)?;
    let today = get_config_from_depot(depot)?.site.today()?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let detail = activity::get_detail(&mut conn, &slug, today).await?;

    Ok(Json(detail))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("activities")
        .get(list_activities)
        .push(Router::with_path("{slug}").get(get_activity))
}
