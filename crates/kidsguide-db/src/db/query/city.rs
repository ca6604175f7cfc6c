//! Query composition for `city`.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::pagination::{Page, PageRequest};
use crate::db::schema::city;
use crate::model::city::{City, CityChanges, NewCity};

/// ## Summary
/// Returns a query to select all cities.
#[must_use]
pub fn all() -> city::BoxedQuery<'static, Pg> {
    city::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a city by ID.
#[must_use]
pub fn by_id(id: uuid::Uuid) -> city::BoxedQuery<'static, Pg> {
    all().filter(city::id.eq(id))
}

/// ## Summary
/// Returns a query to find a city by slug.
#[must_use]
pub fn by_slug(slug: &str) -> city::BoxedQuery<'_, Pg> {
    all().filter(city::slug.eq(slug))
}

/// ## Summary
/// Lists cities alphabetically.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(conn: &mut DbConnection<'_>, page: PageRequest) -> QueryResult<Page<City>> {
    let total = all().count().get_result::<i64>(conn).await?;
    let items = all()
        .order(city::name.asc())
        .limit(page.limit())
        .offset(page.offset())
        .select(City::as_select())
        .load(conn)
        .await?;

    Ok(Page {
        items,
        total,
        request: page,
    })
}

/// ## Summary
/// Finds a city by slug.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_by_slug(conn: &mut DbConnection<'_>, slug: &str) -> QueryResult<Option<City>> {
    by_slug(slug)
        .select(City::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Inserts a city and returns the stored row.
///
/// ## Errors
/// Returns an error if the database operation fails (including duplicate slug).
pub async fn create(conn: &mut DbConnection<'_>, new_city: &NewCity) -> QueryResult<City> {
    diesel::insert_into(city::table)
        .values(new_city)
        .returning(City::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Replaces a city's fields. Returns `None` if no city has this ID.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &CityChanges,
) -> QueryResult<Option<City>> {
    diesel::update(city::table.filter(city::id.eq(id)))
        .set(changes)
        .returning(City::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes a city. Returns whether a row was removed.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<bool> {
    let removed = diesel::delete(city::table.filter(city::id.eq(id)))
        .execute(conn)
        .await?;
    Ok(removed > 0)
}
