use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::schema;

/// One dated occurrence of an activity.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = schema::event)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: uuid::Uuid,
    pub activity_id: uuid::Uuid,
    pub title: String,
    pub date: chrono::NaiveDate,
    pub time: Option<chrono::NaiveTime>,
    pub cancelled: bool,
    pub notes: Option<String>,
    pub slug: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::event)]
pub struct NewEvent {
    pub id: uuid::Uuid,
    pub activity_id: uuid::Uuid,
    pub title: String,
    pub date: chrono::NaiveDate,
    pub time: Option<chrono::NaiveTime>,
    pub cancelled: bool,
    pub notes: Option<String>,
    pub slug: String,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::event)]
#[diesel(treat_none_as_null = true)]
pub struct EventChanges {
    pub activity_id: uuid::Uuid,
    pub title: String,
    pub date: chrono::NaiveDate,
    pub time: Option<chrono::NaiveTime>,
    pub cancelled: bool,
    pub notes: Option<String>,
    pub slug: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
