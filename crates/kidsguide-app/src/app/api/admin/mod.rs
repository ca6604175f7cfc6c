//! Catalog management API. Unauthenticated; deploy behind a trusted proxy.

use kidsguide_core::constants::ADMIN_ROUTE_COMPONENT;
use salvo::Router;

mod activities;
mod events;
mod reference;

#[must_use]
pub fn routes() -> Router {
    Router::with_path(ADMIN_ROUTE_COMPONENT)
        .push(activities::routes())
        .push(events::routes())
        .push(reference::routes())
}
