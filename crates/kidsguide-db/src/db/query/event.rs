//! Query composition for `event`.

use chrono::NaiveDate;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::pagination::{Page, PageRequest};
use crate::db::schema::event;
use crate::model::event::{Event, EventChanges, NewEvent};

/// Listing filters for events. Date bounds are inclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub activity_id: Option<Uuid>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub include_cancelled: bool,
}

#[must_use]
pub fn all() -> event::BoxedQuery<'static, Pg> {
    event::table.into_boxed()
}

#[must_use]
pub fn by_slug(slug: &str) -> event::BoxedQuery<'_, Pg> {
    all().filter(event::slug.eq(slug))
}

/// ## Summary
/// Returns a query applying every set field of `filter`.
#[must_use]
pub fn filtered(filter: EventFilter) -> event::BoxedQuery<'static, Pg> {
    let mut query = all();

    if let Some(activity_id) = filter.activity_id {
        query = query.filter(event::activity_id.eq(activity_id));
    }
    if let Some(from) = filter.from {
        query = query.filter(event::date.ge(from));
    }
    if let Some(to) = filter.to {
        query = query.filter(event::date.le(to));
    }
    if !filter.include_cancelled {
        query = query.filter(event::cancelled.eq(false));
    }

    query
}

/// ## Summary
/// Lists events in calendar order (date, then time).
///
/// ## Errors
/// Returns an error if the database operation fails.
#[tracing::instrument(skip(conn))]
pub async fn list(
    conn: &mut DbConnection<'_>,
    filter: EventFilter,
    page: PageRequest,
) -> QueryResult<Page<Event>> {
    let total = filtered(filter).count().get_result::<i64>(conn).await?;
    let items = filtered(filter)
        .order((event::date.asc(), event::time.asc(), event::title.asc()))
        .limit(page.limit())
        .offset(page.offset())
        .select(Event::as_select())
        .load(conn)
        .await?;

    Ok(Page {
        items,
        total,
        request: page,
    })
}

/// ## Summary
/// The next `limit` non-cancelled events of one activity on or after `from`.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn upcoming_for_activity(
    conn: &mut DbConnection<'_>,
    activity_id: Uuid,
    from: NaiveDate,
    limit: i64,
) -> QueryResult<Vec<Event>> {
    filtered(EventFilter {
        activity_id: Some(activity_id),
        from: Some(from),
        to: None,
        include_cancelled: false,
    })
    .order((event::date.asc(), event::time.asc()))
    .limit(limit)
    .select(Event::as_select())
    .load(conn)
    .await
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_by_slug(conn: &mut DbConnection<'_>, slug: &str) -> QueryResult<Option<Event>> {
    by_slug(slug)
        .select(Event::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Inserts one event row.
///
/// Generated occurrences are inserted one call per row so a failing row
/// does not take the rest of its batch down with it.
///
/// ## Errors
/// Returns an error if the insert fails (duplicate slug, unknown activity).
pub async fn create(conn: &mut DbConnection<'_>, new_event: &NewEvent) -> QueryResult<Event> {
    diesel::insert_into(event::table)
        .values(new_event)
        .returning(Event::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    changes: &EventChanges,
) -> QueryResult<Option<Event>> {
    diesel::update(event::table.filter(event::id.eq(id)))
        .set(changes)
        .returning(Event::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<bool> {
    let removed = diesel::delete(event::table.filter(event::id.eq(id)))
        .execute(conn)
        .await?;
    Ok(removed > 0)
}
