//! Read-only directory API.

use salvo::Router;

mod activities;
mod events;
mod reference;

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(activities::routes())
        .push(events::routes())
        .push(reference::routes())
}
