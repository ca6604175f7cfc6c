use diesel::{pg::Pg, prelude::*};
use serde::Serialize;

use crate::db::schema;

#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = schema::city)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct City {
    pub id: uuid::Uuid,
    pub name: String,
    pub slug: String,
    pub state: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::city)]
pub struct NewCity {
    pub id: uuid::Uuid,
    pub name: String,
    pub slug: String,
    pub state: Option<String>,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::city)]
#[diesel(treat_none_as_null = true)]
pub struct CityChanges {
    pub name: String,
    pub slug: String,
    pub state: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
