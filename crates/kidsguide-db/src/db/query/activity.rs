//! Query composition for `activity` and its category/tag/age-group links.

use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::db::connection::DbConnection;
use crate::db::pagination::{Page, PageRequest};
use crate::db::query::contains_pattern;
use crate::db::schema::{
    activity, activity_age_group, activity_category, activity_tag, age_group, category, city,
    organization, tag,
};
use crate::model::activity::{
    Activity, ActivityChanges, NewActivity, NewActivityAgeGroup, NewActivityCategory,
    NewActivityTag,
};
use crate::model::age_group::AgeGroup;
use crate::model::category::Category;
use crate::model::tag::Tag;

/// Listing filters. Slug filters match exactly; `age` matches any linked
/// age group whose inclusive range contains it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityFilter {
    pub city: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub organization: Option<String>,
    pub age: Option<i32>,
    pub search: Option<String>,
    pub featured: Option<bool>,
}

/// ## Summary
/// Returns a query to select all activities.
#[must_use]
pub fn all() -> activity::BoxedQuery<'static, Pg> {
    activity::table.into_boxed()
}

/// ## Summary
/// Returns a query to find an activity by slug.
#[must_use]
pub fn by_slug(slug: &str) -> activity::BoxedQuery<'_, Pg> {
    all().filter(activity::slug.eq(slug))
}

/// ## Summary
/// Returns a query applying every set field of `filter`.
///
/// Link-table filters are expressed as `IN (SELECT ...)` subqueries so
/// the result never contains duplicate activities.
#[must_use]
pub fn filtered(filter: &ActivityFilter) -> activity::BoxedQuery<'static, Pg> {
    let mut query = all();

    if let Some(city_slug) = &filter.city {
        query = query.filter(
            activity::city_id.eq_any(
                city::table
                    .filter(city::slug.eq(city_slug.clone()))
                    .select(city::id.nullable()),
            ),
        );
    }

    if let Some(org_slug) = &filter.organization {
        query = query.filter(
            activity::organization_id.eq_any(
                organization::table
                    .filter(organization::slug.eq(org_slug.clone()))
                    .select(organization::id.nullable()),
            ),
        );
    }

    if let Some(category_slug) = &filter.category {
        query = query.filter(
            activity::id.eq_any(
                activity_category::table
                    .inner_join(category::table)
                    .filter(category::slug.eq(category_slug.clone()))
                    .select(activity_category::activity_id),
            ),
        );
    }

    if let Some(tag_slug) = &filter.tag {
        query = query.filter(
            activity::id.eq_any(
                activity_tag::table
                    .inner_join(tag::table)
                    .filter(tag::slug.eq(tag_slug.clone()))
                    .select(activity_tag::activity_id),
            ),
        );
    }

    if let Some(age) = filter.age {
        query = query.filter(
            activity::id.eq_any(
                activity_age_group::table
                    .inner_join(age_group::table)
                    .filter(age_group::min_age.le(age))
                    .filter(age_group::max_age.ge(age))
                    .select(activity_age_group::activity_id),
            ),
        );
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        query = query.filter(activity::title.ilike(contains_pattern(search)));
    }

    if let Some(featured) = filter.featured {
        query = query.filter(activity::is_featured.eq(featured));
    }

    query
}

/// ## Summary
/// Lists activities matching `filter`, featured ones first, then by title.
///
/// ## Errors
/// Returns an error if the database operation fails.
#[tracing::instrument(skip(conn))]
pub async fn list(
    conn: &mut DbConnection<'_>,
    filter: &ActivityFilter,
    page: PageRequest,
) -> QueryResult<Page<Activity>> {
    let total = filtered(filter).count().get_result::<i64>(conn).await?;
    let items = filtered(filter)
        .order((activity::is_featured.desc(), activity::title.asc()))
        .limit(page.limit())
        .offset(page.offset())
        .select(Activity::as_select())
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
) -> QueryResult<Option<Activity>> {
    by_slug(slug)
        .select(Activity::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_by_id(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<Option<Activity>> {
    all()
        .filter(activity::id.eq(id))
        .select(Activity::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Errors
/// Returns an error if the insert fails (duplicate slug, dangling reference).
pub async fn create(conn: &mut AsyncPgConnection, new_activity: &NewActivity) -> QueryResult<Activity> {
    diesel::insert_into(activity::table)
        .values(new_activity)
        .returning(Activity::as_returning())
        .get_result(conn)
        .await
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update(
    conn: &mut AsyncPgConnection,
    id: Uuid,
    changes: &ActivityChanges,
) -> QueryResult<Option<Activity>> {
    diesel::update(activity::table.filter(activity::id.eq(id)))
        .set(changes)
        .returning(Activity::as_returning())
        .get_result(conn)
        .await
        .optional()
}

/// Deletes an activity; its links and events go with it (`ON DELETE CASCADE`).
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> QueryResult<bool> {
    let removed = diesel::delete(activity::table.filter(activity::id.eq(id)))
        .execute(conn)
        .await?;
    Ok(removed > 0)
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn categories_for(conn: &mut DbConnection<'_>, activity_id: Uuid) -> QueryResult<Vec<Category>> {
    activity_category::table
        .inner_join(category::table)
        .filter(activity_category::activity_id.eq(activity_id))
        .order(category::name.asc())
        .select(Category::as_select())
        .load(conn)
        .await
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn tags_for(conn: &mut DbConnection<'_>, activity_id: Uuid) -> QueryResult<Vec<Tag>> {
    activity_tag::table
        .inner_join(tag::table)
        .filter(activity_tag::activity_id.eq(activity_id))
        .order(tag::name.asc())
        .select(Tag::as_select())
        .load(conn)
        .await
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn age_groups_for(conn: &mut DbConnection<'_>, activity_id: Uuid) -> QueryResult<Vec<AgeGroup>> {
    activity_age_group::table
        .inner_join(age_group::table)
        .filter(activity_age_group::activity_id.eq(activity_id))
        .order(age_group::min_age.asc())
        .select(AgeGroup::as_select())
        .load(conn)
        .await
}

/// ## Summary
/// Replaces the activity's category links with exactly `category_ids`.
///
/// Takes a bare connection so it can run inside a transaction; the delete
/// and insert are separate statements.
///
/// ## Errors
/// Returns an error if the database operation fails (including unknown IDs).
pub async fn replace_categories(
    conn: &mut AsyncPgConnection,
    activity_id: Uuid,
    category_ids: &[Uuid],
) -> QueryResult<()> {
    diesel::delete(activity_category::table.filter(activity_category::activity_id.eq(activity_id)))
        .execute(conn)
        .await?;

    if category_ids.is_empty() {
        return Ok(());
    }

    let rows: Vec<NewActivityCategory> = category_ids
        .iter()
        .map(|&category_id| NewActivityCategory {
            activity_id,
            category_id,
        })
        .collect();

    diesel::insert_into(activity_category::table)
        .values(&rows)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;
    Ok(())
}

/// ## Summary
/// Replaces the activity's tag links with exactly `tag_ids`.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn replace_tags(
    conn: &mut AsyncPgConnection,
    activity_id: Uuid,
    tag_ids: &[Uuid],
) -> QueryResult<()> {
    diesel::delete(activity_tag::table.filter(activity_tag::activity_id.eq(activity_id)))
        .execute(conn)
        .await?;

    if tag_ids.is_empty() {
        return Ok(());
    }

    let rows: Vec<NewActivityTag> = tag_ids
        .iter()
        .map(|&tag_id| NewActivityTag {
            activity_id,
            tag_id,
        })
        .collect();

    diesel::insert_into(activity_tag::table)
        .values(&rows)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;
    Ok(())
}

/// ## Summary
/// Replaces the activity's age-group links with exactly `age_group_ids`.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn replace_age_groups(
    conn: &mut AsyncPgConnection,
    activity_id: Uuid,
    age_group_ids: &[Uuid],
) -> QueryResult<()> {
    diesel::delete(
        activity_age_group::table.filter(activity_age_group::activity_id.eq(activity_id)),
    )
    .execute(conn)
    .await?;

    if age_group_ids.is_empty() {
        return Ok(());
    }

    let rows: Vec<NewActivityAgeGroup> = age_group_ids
        .iter()
        .map(|&age_group_id| NewActivityAgeGroup {
            activity_id,
            age_group_id,
        })
        .collect();

    diesel::insert_into(activity_age_group::table)
        .values(&rows)
        .on_conflict_do_nothing()
        .execute(conn)
        .await?;
    Ok(())
}
