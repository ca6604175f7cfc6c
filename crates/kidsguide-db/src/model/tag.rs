use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = schema::tag)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: uuid::Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::tag)]
pub struct NewTag {
    pub id: uuid::Uuid,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::tag)]
pub struct TagChanges {
    pub name: String,
    pub slug: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
