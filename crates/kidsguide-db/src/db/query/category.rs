//! Query composition for `category`.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::pagination::{Page, PageRequest};
use crate::db::schema::category;
use crate::model::category::{Category, CategoryChanges, NewCategory};

/// ## Summary
/// Returns a query to select all categories.
#[must_use]
pub fn all() -> category::BoxedQuery<'static, Pg> {
    category::table.into_boxed()
}

/// ## Summary
/// Returns a query to find a category by ID.
#[must_use]
pub fn by_id(id: uuid::Uuid) -> category::BoxedQuery<'static, Pg> {
    all().filter(category::id.eq(id))
}

/// ## Summary
/// Returns a query to find a category by slug.
#[must_use]
pub fn by_slug(slug: &str) -> category::BoxedQuery<'_, Pg> {
    all().filter(category::slug.eq(slug))
}

/// ## Summary
/// Lists categories alphabetically.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(conn: &mut DbConnection<'_>, page: PageRequest) -> QueryResult<Page<Category>> {
    let total = all().count().get_result::<i64>(conn).await?;
    let items = all()
        .order(category::name.asc())
        .limit(page.limit())
        .offset(page.offset())
        .select(Category::as_select())
        .load(conn)
        .await?;

    Ok(Page {
        items,
        total,
        request: page,
    })
}

/// ## Summary
/// Finds a category by slug.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_by_slug(conn: &mut DbConnection<'_>, slug: &str) -> QueryResult<Option<Category>> {
    by_slug(slug)
        .select(Category::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Inserts a category and returns the stored row.
///
/// ## Errors
/// Returns an error if the database operation fails (including duplicate slug).
pub async fn create(conn: &mut DbConnection<'_>, new_category: &NewCategory) -> QueryResult<Category> {
    diesel::insert_into(category::table)
        .values(new_category)
        .returning(Category::as_returning())
        .get_result(conn)
        .await
}

/// ## Summary
/// Replaces a category's fields. Returns `None` if no category has this ID.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &CategoryChanges,
) -> QueryResult<Option<Category>> {
    diesel::update(category::table.filter(category::id.eq(id)))
        .set(changes)
        .returning(Category::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Summary
/// Deletes a category. Returns whether a row was removed.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<bool> {
    let removed = diesel::delete(category::table.filter(category::id.eq(id)))
        .execute(conn)
        .await?;
    Ok(removed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_slug_filters_slug() {
        let sql = diesel::debug_query::<Pg, _>(&by_slug("museums")).to_string();
        assert!(sql.contains("\"category\".\"slug\" = $1"));
    }

    #[test]
    fn test_by_id_filters_id() {
        let sql = diesel::debug_query::<Pg, _>(&by_id(uuid::Uuid::new_v4())).to_string();
        assert!(sql.contains("\"category\".\"id\" = $1"));
    }
}
