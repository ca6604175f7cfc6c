use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};

use kidsguide_db::db::query::event::EventFilter;
use kidsguide_db::model::event::Event;
use kidsguide_service::event::service as event_service;

use crate::app::api::params::{
    Paginated, page_request, path_slug, query_date, query_flag, query_uuid,
};
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// GET /api/events
///
/// `upcoming=true` moves the lower bound up to today in the site timezone.
/// Cancelled events are hidden unless `include_cancelled=true`.
#[handler]
async fn list_events(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Paginated<Event>>> {
    let settings = get_config_from_depot(depot)?;
    let page = page_request(req, depot)?;

    let mut from = query_date(req, "from")?;
    if query_flag(req, "upcoming") == Some(true) {
        let today = settings.site.today()?;
        from = Some(from.map_or(today, |f| f.max(today)));
    }

    let filter = EventFilter {
        activity_id: query_uuid(req, "activity")?,
        from,
        to: query_date(req, "to")?,
        include_cancelled: query_flag(req, "include_cancelled").unwrap_or(false),
    };

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    let events = event_service::list(&mut conn, filter, page).await?;

    Ok(Json(events.into()))
}

/// ## Summary
/// GET /api/events/{slug}
#[handler]
async fn get_event(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Event>> {
    let slug = path_slug(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(event_service::get_by_slug(&mut conn, &slug).await?))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("events")
        .get(list_events)
        .push(Router::with_path("{slug}").get(get_event))
}
