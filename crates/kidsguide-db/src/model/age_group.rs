use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::schema;

/// Inclusive age range in whole years, e.g. "Preschool" = 3..=5.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = schema::age_group)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct AgeGroup {
    pub id: uuid::Uuid,
    pub name: String,
    pub slug: String,
    pub min_age: i32,
    pub max_age: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::age_group)]
pub struct NewAgeGroup {
    pub id: uuid::Uuid,
    pub name: String,
    pub slug: String,
    pub min_age: i32,
    pub max_age: i32,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::age_group)]
pub struct AgeGroupChanges {
    pub name: String,
    pub slug: String,
    pub min_age: i32,
    pub max_age: i32,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
