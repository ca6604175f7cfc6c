use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::schema;

/// A physical venue (park, library branch, museum, ...).
#[derive(Debug, Clone, PartialEq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = schema::location)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: uuid::Uuid,
    pub name: String,
    pub slug: String,
    pub address: Option<String>,
    pub city_id: Option<uuid::Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::location)]
pub struct NewLocation {
    pub id: uuid::Uuid,
    pub name: String,
    pub slug: String,
    pub address: Option<String>,
    pub city_id: Option<uuid::Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::location)]
#[diesel(treat_none_as_null = true)]
pub struct LocationChanges {
    pub name: String,
    pub slug: String,
    pub address: Option<String>,
    pub city_id: Option<uuid::Uuid>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
