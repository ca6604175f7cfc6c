//! Query composition for `location`.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::pagination::{Page, PageRequest};
use crate::db::schema::{city, location};
use crate::model::location::{Location, LocationChanges, NewLocation};

#[must_use]
pub fn all() -> location::BoxedQuery<'static, Pg> {
    location::table.into_boxed()
}

#[must_use]
pub fn by_slug(slug: &str) -> location::BoxedQuery<'_, Pg> {
    all().filter(location::slug.eq(slug))
}

/// ## Summary
/// Returns a query for locations in the city with slug `city_slug`, or all
/// locations when no city is given.
#[must_use]
pub fn in_city(city_slug: Option<&str>) -> location::BoxedQuery<'static, Pg> {
    let mut query = all();
    if let Some(city_slug) = city_slug {
        query = query.filter(
            location::city_id.eq_any(
                city::table
                    .filter(city::slug.eq(city_slug.to_string()))
                    .select(city::id.nullable()),
            ),
        );
    }
    query
}

/// ## Summary
/// Lists locations alphabetically, optionally limited to one city.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    city_slug: Option<&str>,
    page: PageRequest,
) -> QueryResult<Page<Location>> {
    let total = in_city(city_slug).count().get_result::<i64>(conn).await?;
    let items = in_city(city_slug)
        .order(location::name.asc())
        .limit(page.limit())
        .offset(page.offset())
        .select(Location::as_select())
        .load(conn)
        .await?;

    Ok(Page {
        items,
        total,
        request: page,
    })
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_by_slug(
    conn: &mut DbConnection<'_>,
    slug: &str,
) -> QueryResult<Option<Location>> {
    by_slug(slug)
        .select(Location::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_by_id(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
) -> QueryResult<Option<Location>> {
    all()
        .filter(location::id.eq(id))
        .select(Location::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns an error if the insert fails (duplicate slug, unknown city).
pub async fn create(conn: &mut DbConnection<'_>, new_location: &NewLocation) -> QueryResult<Location> {
    diesel::insert_into(location::table)
        .values(new_location)
        .returning(Location::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &LocationChanges,
) -> QueryResult<Option<Location>> {
    diesel::update(location::table.filter(location::id.eq(id)))
        .set(changes)
        .returning(Location::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<bool> {
    let removed = diesel::delete(location::table.filter(location::id.eq(id)))
        .execute(conn)
        .await?;
    Ok(removed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_city_uses_city_subselect() {
        let sql = diesel::debug_query::<Pg, _>(&in_city(Some("round-rock"))).to_string();
        assert!(sql.contains("\"location\".\"city_id\""));
        assert!(sql.contains("FROM \"city\""));
    }

    #[test]
    fn test_in_city_without_city_is_unfiltered() {
        let sql = diesel::debug_query::<Pg, _>(&in_city(None)).to_string();
        assert!(!sql.contains("WHERE"));
    }
}
