use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::schema;

/// A listed child-friendly activity.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = schema::activity)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: uuid::Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub organization_id: Option<uuid::Uuid>,
    pub location_id: Option<uuid::Uuid>,
    pub city_id: Option<uuid::Uuid>,
    pub website: Option<String>,
    pub cost: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::activity)]
pub struct NewActivity {
    pub id: uuid::Uuid,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub organization_id: Option<uuid::Uuid>,
    pub location_id: Option<uuid::Uuid>,
    pub city_id: Option<uuid::Uuid>,
    pub website: Option<String>,
    pub cost: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::activity)]
#[diesel(treat_none_as_null = true)]
pub struct ActivityChanges {
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub organization_id: Option<uuid::Uuid>,
    pub location_id: Option<uuid::Uuid>,
    pub city_id: Option<uuid::Uuid>,
    pub website: Option<String>,
    pub cost: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = schema::activity_category)]
pub struct NewActivityCategory {
    pub activity_id: uuid::Uuid,
    pub category_id: uuid::Uuid,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = schema::activity_tag)]
pub struct NewActivityTag {
    pub activity_id: uuid::Uuid,
    pub tag_id: uuid::Uuid,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = schema::activity_age_group)]
pub struct NewActivityAgeGroup {
    pub activity_id: uuid::Uuid,
    pub age_group_id: uuid::Uuid,
}
