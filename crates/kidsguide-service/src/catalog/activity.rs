//! Activities: the directory's main listings.
//!
//! ## Summary
//! An activity row carries its own fields plus links to categories, tags
//! and age groups. Writes replace the links wholesale inside the same
//! transaction as the row itself, so a listing is never visible with a
//! half-applied set of links.

use chrono::NaiveDate;
use diesel_async::AsyncConnection;
use diesel_async::scoped_futures::ScopedFutureExt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kidsguide_db::db::connection::DbConnection;
use kidsguide_db::db::pagination::{Page, PageRequest};
use kidsguide_db::db::query::activity::{self as activity_query, ActivityFilter};
use kidsguide_db::db::query::event as event_query;
use kidsguide_db::model::activity::{Activity, ActivityChanges, NewActivity};
use kidsguide_db::model::age_group::AgeGroup;
use kidsguide_db::model::category::Category;
use kidsguide_db::model::event::Event;
use kidsguide_db::model::tag::Tag;

use super::ensure_deleted;
use crate::error::{ServiceError, ServiceResult};
use crate::validation::{
    Validate, ValidationErrors, optional_text, optional_url, required_text, resolve_slug,
};

/// Number of upcoming events embedded in an activity's detail view.
pub const UPCOMING_EVENT_LIMIT: i64 = 10;

/// Body of `POST`/`PUT /admin/activities`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInput {
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub organization_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub website: Option<String>,
    pub cost: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub category_ids: Vec<Uuid>,
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
    #[serde(default)]
    pub age_group_ids: Vec<Uuid>,
}

/// Link sets, sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLinks {
    pub categories: Vec<Uuid>,
    pub tags: Vec<Uuid>,
    pub age_groups: Vec<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityFields {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub organization_id: Option<Uuid>,
    pub location_id: Option<Uuid>,
    pub city_id: Option<Uuid>,
    pub website: Option<String>,
    pub cost: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub links: ActivityLinks,
}

fn unique_ids(mut ids: Vec<Uuid>) -> Vec<Uuid> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

impl Validate for ActivityInput {
    type Valid = ActivityFields;

    fn validate(self) -> Result<ActivityFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let title = required_text(&mut errors, "title", &self.title);
        let slug = resolve_slug(&mut errors, "slug", self.slug, &title);
        let website = optional_url(&mut errors, "website", self.website);
        let image_url = optional_url(&mut errors, "imageUrl", self.image_url);

        errors.finish(ActivityFields {
            title,
            slug,
            description: optional_text(self.description),
            organization_id: self.organization_id,
            location_id: self.location_id,
            city_id: self.city_id,
            website,
            cost: optional_text(self.cost),
            image_url,
            is_featured: self.is_featured,
            links: ActivityLinks {
                categories: unique_ids(self.category_ids),
                tags: unique_ids(self.tag_ids),
                age_groups: unique_ids(self.age_group_ids),
            },
        })
    }
}

/// An activity with everything its detail page shows.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDetail {
    #[serde(flatten)]
    pub activity: Activity,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub age_groups: Vec<AgeGroup>,
    pub upcoming_events: Vec<Event>,
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    filter: &ActivityFilter,
    page: PageRequest,
) -> ServiceResult<Page<Activity>> {
    Ok(activity_query::list(conn, filter, page).await?)
}

/// ## Summary
/// Loads an activity by slug with its links and the next
/// [`UPCOMING_EVENT_LIMIT`] non-cancelled events on or after `today`.
///
/// ## Errors
/// Returns `NotFound` if no activity has this slug.
#[tracing::instrument(skip(conn))]
pub async fn get_detail(
    conn: &mut DbConnection<'_>,
    slug: &str,
    today: NaiveDate,
) -> ServiceResult<ActivityDetail> {
    let activity = activity_query::find_by_slug(conn, slug)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("activity '{slug}'")))?;

    let categories = activity_query::categories_for(conn, activity.id).await?;
    let tags = activity_query::tags_for(conn, activity.id).await?;
    let age_groups = activity_query::age_groups_for(conn, activity.id).await?;
    let upcoming_events =
        event_query::upcoming_for_activity(conn, activity.id, today, UPCOMING_EVENT_LIMIT).await?;

    Ok(ActivityDetail {
        activity,
        categories,
        tags,
        age_groups,
        upcoming_events,
    })
}

/// ## Summary
/// Creates an activity and its links in one transaction.
///
/// ## Errors
/// Returns a validation error (including unknown linked IDs), or
/// `Conflict` if the slug is taken.
#[tracing::instrument(skip(conn, input))]
pub async fn create(conn: &mut DbConnection<'_>, input: ActivityInput) -> ServiceResult<Activity> {
    let fields = input.validate()?;
    let links = fields.links;
    let new_activity = NewActivity {
        id: Uuid::now_v7(),
        title: fields.title,
        slug: fields.slug,
        description: fields.description,
        organization_id: fields.organization_id,
        location_id: fields.location_id,
        city_id: fields.city_id,
        website: fields.website,
        cost: fields.cost,
        image_url: fields.image_url,
        is_featured: fields.is_featured,
    };

    let created = conn
        .transaction::<_, ServiceError, _>(move |tx| {
            let new_activity = new_activity.clone();
            let links = links.clone();

            async move {
                let created = activity_query::create(tx, &new_activity).await?;
                activity_query::replace_categories(tx, created.id, &links.categories).await?;
                activity_query::replace_tags(tx, created.id, &links.tags).await?;
                activity_query::replace_age_groups(tx, created.id, &links.age_groups).await?;
                Ok(created)
            }
            .scope_boxed()
        })
        .await?;

    tracing::info!(slug = %created.slug, "Activity created");
    Ok(created)
}

/// ## Summary
/// Updates an activity and replaces all of its links in one transaction.
///
/// ## Errors
/// Returns a validation error, `NotFound`, or `Conflict`.
#[tracing::instrument(skip(conn, input))]
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: Uuid,
    input: ActivityInput,
) -> ServiceResult<Activity> {
    let fields = input.validate()?;
    let links = fields.links;
    let changes = ActivityChanges {
        title: fields.title,
        slug: fields.slug,
        description: fields.description,
        organization_id: fields.organization_id,
        location_id: fields.location_id,
        city_id: fields.city_id,
        website: fields.website,
        cost: fields.cost,
        image_url: fields.image_url,
        is_featured: fields.is_featured,
        updated_at: chrono::Utc::now(),
    };

    conn.transaction::<_, ServiceError, _>(move |tx| {
        let changes = changes.clone();
        let links = links.clone();

        async move {
            let updated = activity_query::update(tx, id, &changes)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("activity {id}")))?;
            activity_query::replace_categories(tx, id, &links.categories).await?;
            activity_query::replace_tags(tx, id, &links.tags).await?;
            activity_query::replace_age_groups(tx, id, &links.age_groups).await?;
            Ok(updated)
        }
        .scope_boxed()
    })
    .await
}

/// Deleting an activity also removes its links and events (`ON DELETE CASCADE`).
///
/// ## Errors
/// Returns `NotFound` if no activity has this ID.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    ensure_deleted(activity_query::delete(conn, id).await?, "activity", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ActivityInput {
        serde_json::from_value(serde_json::json!({
            "title": "Toddler Story Time",
            "website": "https://library.example.org/storytime",
            "cost": "Free",
        }))
        .unwrap_or_else(|e| panic!("bad fixture: {e}"))
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let Ok(fields) = input().validate() else {
            panic!("expected valid activity");
        };
        assert_eq!(fields.slug, "toddler-story-time");
        assert!(!fields.is_featured);
        assert_eq!(fields.links, ActivityLinks::default());
    }

    #[test]
    fn test_link_ids_deduplicated() {
        let a = Uuid::now_v7();
        let b = Uuid::now_v7();
        let mut raw = input();
        raw.tag_ids = vec![b, a, b];
        let fields = raw.validate();
        assert_eq!(fields.map(|f| f.links.tags.len()).ok(), Some(2));
    }

    #[test]
    fn test_invalid_image_url() {
        let mut raw = input();
        raw.image_url = Some("not a url".to_string());
        assert_eq!(
            raw.validate().err().map(|e| e.fields().join(",")),
            Some("imageUrl".to_string())
        );
    }

    #[test]
    fn test_detail_flattens_activity() {
        let now = chrono::Utc::now();
        let detail = ActivityDetail {
            activity: Activity {
                id: Uuid::nil(),
                title: "Splash Pad".to_string(),
                slug: "splash-pad".to_string(),
                description: None,
                organization_id: None,
                location_id: None,
                city_id: None,
                website: None,
                cost: None,
                image_url: None,
                is_featured: true,
                created_at: now,
                updated_at: now,
            },
            categories: vec![],
            tags: vec![],
            age_groups: vec![],
            upcoming_events: vec![],
        };
        let json = serde_json::to_value(&detail).unwrap_or_default();
        assert_eq!(json["slug"], "splash-pad");
        assert_eq!(json["isFeatured"], true);
        assert!(json["upcomingEvents"].is_array());
    }
}
