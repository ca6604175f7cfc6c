//! Query composition for `organization`.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::pagination::{Page, PageRequest};
use crate::db::query::contains_pattern;
use crate::db::schema::organization;
use crate::model::organization::{Organization, OrganizationChanges, NewOrganization};

/// ## Summary
/// Returns a query to select all organizations.
#[must_use]
pub fn all() -> organization::BoxedQuery<'static, Pg> {
    organization::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a organization by ID.
#[must_use]
pub fn by_id(id: uuid::Uuid) -> organization::BoxedQuery<'static, Pg> {
    all().filter(organization::id.eq(id))
}

/// ## Summary
/// Returns a query to find a organization by slug.
#[must_use]
pub fn by_slug(slug: &str) -> organization::BoxedQuery<'_, Pg> {
    all().filter(organization::slug.eq(slug))
}

/// ## Summary
/// Returns a query for organizations whose name contains `search`
/// (case-insensitive). `None` matches every organization.
#[must_use]
pub fn matching(search: Option<&str>) -> organization::BoxedQuery<'static, Pg> {
    let mut query = all();
    if let Some(search) = search.filter(|s| !s.trim().is_empty()) {
        query = query.filter(organization::name.ilike(contains_pattern(search)));
    }
    query
}

/// ## Summary
/// Lists organizations alphabetically, optionally narrowed by a name search.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    search: Option<&str>,
    page: PageRequest,
) -> QueryResult<Page<Organization>> {
    let total = matching(search).count().get_result::<i64>(conn).await?;
    let items = matching(search)
        .order(organization::name.asc())
        .limit(page.limit())
        .offset(page.offset())
        .select(Organization::as_select())
        .load(conn)
        .await?;

    Ok(Page {
        items,
        total,
        request: page,
    })
}

/// ## Summary
/// Finds a organization by slug.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_by_slug(conn: &mut DbConnection<'_>, slug: &str) -> QueryResult<Option<Organization>> {
    by_slug(slug)
        .select(Organization::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Inserts a organization and returns the stored row.
///
/// ## Errors
/// Returns an error if the database operation fails (including duplicate slug).
pub async fn create(conn: &mut DbConnection<'_>, new_organization: &NewOrganization) -> QueryResult<Organization> {
    diesel::insert_into(organization::table)
        .values(new_organization)
        .returning(Organization::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Replaces a organization's fields. Returns `None` if no organization has this ID.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &OrganizationChanges,
) -> QueryResult<Option<Organization>> {
    diesel::update(organization::table.filter(organization::id.eq(id)))
        .set(changes)
        .returning(Organization::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes a organization. Returns whether a row was removed.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<bool> {
    let removed = diesel::delete(organization::table.filter(organization::id.eq(id)))
        .execute(conn)
        .await?;
    Ok(removed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_slug_filters_slug() {
        let sql = diesel::debug_query::<Pg, _>(&by_slug("city-parks-dept")).to_string();
        assert!(sql.contains("\"organization\".\"slug\" = $1"));
    }

    #[test]
    fn test_matching_uses_ilike() {
        let sql = diesel::debug_query::<Pg, _>(&matching(Some("library"))).to_string();
        assert!(sql.contains("ILIKE"));
        assert!(sql.contains("%library%"));
    }

    #[test]
    fn test_matching_blank_search_is_unfiltered() {
        let sql = diesel::debug_query::<Pg, _>(&matching(Some("  "))).to_string();
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_by_id_filters_id() {
        let sql = diesel::debug_query::<Pg, _>(&by_id(uuid::Uuid::new_v4())).to_string();
        assert!(sql.contains("\"organization\".\"id\" = $1"));
    }
}
