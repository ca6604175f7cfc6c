use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::pagination::{Page, PageRequest};
use crate::db::schema::tag;
use crate::model::tag::{NewTag, Tag, TagChanges};

#[must_use]
pub fn all() -> tag::BoxedQuery<'static, Pg> {
    tag::table.into_boxed()
}

#[must_use]
pub fn by_id(id: uuid::Uuid) -> tag::BoxedQuery<'static, Pg> {
    all().filter(tag::id.eq(id))
}

#[must_use]
pub fn by_slug(slug: &str) -> tag::BoxedQuery<'_, Pg> {
    all().filter(tag::slug.eq(slug))
}

/// Lists tags alphabetically.
pub async fn list(conn: &mut DbConnection<'_>, page: PageRequest) -> QueryResult<Page<Tag>> {
    let total = all().count().get_result::<i64>(conn).await?;
    let items = all()
        .order(tag::name.asc())
        .limit(page.limit())
        .offset(page.offset())
        .select(Tag::as_select())
        .load(conn)
        .await?;

    Ok(Page {
        items,
        total,
        request: page,
    })
}

pub async fn find_by_slug(conn: &mut DbConnection<'_>, slug: &str) -> QueryResult<Option<Tag>> {
    by_slug(slug)
        .select(Tag::as_select())
        .first(conn)
        .await
        .optional()
}

/// Inserts a tag and returns the stored row.
pub async fn create(conn: &mut DbConnection<'_>, new_tag: &NewTag) -> QueryResult<Tag> {
    diesel::insert_into(tag::table)
        .values(new_tag)
        .returning(Tag::as_returning())
        .get_result(conn)
        .await
}

/// Replaces a tag's fields. Returns `None` if no tag has this ID.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    changes: &TagChanges,
) -> QueryResult<Option<Tag>> {
    diesel::update(tag::table.filter(tag::id.eq(id)))
        .set(changes)
        .returning(Tag::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// Deletes a tag. Returns whether a row was removed.
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> QueryResult<bool> {
    let removed = diesel::delete(tag::table.filter(tag::id.eq(id)))
        .execute(conn)
        .await?;
    Ok(removed > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_slug_filters_slug() {
        let sql = diesel::debug_query::<Pg, _>(&by_slug("outdoor")).to_string();
        assert!(sql.contains("\"tag\".\"slug\" = $1"));
    }

    #[test]
    fn test_by_id_filters_id() {
        let sql = diesel::debug_query::<Pg, _>(&by_id(uuid::Uuid::new_v4())).to_string();
        assert!(sql.contains("\"tag\".\"id\" = $1"));
    }
}
