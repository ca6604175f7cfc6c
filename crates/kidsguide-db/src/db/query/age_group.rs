//! Query composition for `age_group`.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::pagination::{Page, PageRequest};
use crate::db::schema::age_group;
use crate::model::age_group::{AgeGroup, AgeGroupChanges, NewAgeGroup};

#[must_use]
pub fn all() -> age_group::BoxedQuery<'static, Pg> {
    age_group::table.into_boxed()
}

#[must_use]
pub fn by_slug(slug: &str) -> age_group::BoxedQuery<'_, Pg> {
    all().filter(age_group::slug.eq(slug))
}

/// ## Summary
/// Lists age groups youngest first.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(conn: &mut DbConnection<'_>, page: PageRequest) -> QueryResult<Page<AgeGroup>> {
    let total = all().count().get_result::<i64>(conn).await?;
    let items = all()
        .order((age_group::min_age.asc(), age_group::max_age.asc()))
        .limit(page.limit())
        .offset(page.offset())
        .select(AgeGroup::as_select())
        .load(conn)
        .await?;

    Ok(Page {
        items,
        total,
        request: page,
    })
}

/// ## Summary
/// Loads every age group. The table is small; overlap checks run over
/// the full set.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list_all(conn: &mut DbConnection<'_>) -> QueryResult<Vec<AgeGroup>> {
    all()
        .order(age_group::min_age.asc())
        .select(AgeGroup::as_select())
        .load(conn)
        .await
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_by_slug(
    conn: &mut DbConnection<'_>,
    slug: &str,
) -> QueryResult<Option<AgeGroup>> {
    by_slug(slug)
        .select(AgeGroup::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn create(conn: &mut DbConnection<'_>, new_group: &NewAgeGroup) -> QueryResult<AgeGroup> {
    diesel::insert_into(age_group::table)
        .values(new_group)
        .returning(AgeGroup::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &AgeGroupChanges,
) -> QueryResult<Option<AgeGroup>> {
    diesel::update(age_group::table.filter(age_group::id.eq(id)))
        .set(changes)
        .returning(AgeGroup::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<bool> {
    let removed = diesel::delete(age_group::table.filter(age_group::id.eq(id)))
        .execute(conn)
        .await?;
    Ok(removed > 0)
}
