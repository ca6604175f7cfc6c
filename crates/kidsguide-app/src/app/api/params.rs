//! Request decoding shared by the public and admin handlers.

use chrono::NaiveDate;
use salvo::{Depot, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use kidsguide_core::util::date::parse_calendar_date;
use kidsguide_db::db::pagination::{Page, PageMeta, PageRequest};

use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult};

/// The list response envelope: `{ data, pagination }`.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> From<Page<T>> for Paginated<T> {
    fn from(page: Page<T>) -> Self {
        let pagination = page.meta();
        Self {
            data: page.items,
            pagination,
        }
    }
}

/// ## Summary
/// Reads `page` and `limit` from the query string, bounded by the site
/// configuration. Non-numeric values fall back to the defaults.
///
/// ## Errors
/// Returns an error if the configuration is missing from the depot.
pub fn page_request(req: &Request, depot: &Depot) -> AppResult<PageRequest> {
    let settings = get_config_from_depot(depot)?;
    Ok(PageRequest::new(
        req.query::<u32>("page"),
        req.query::<u32>("limit"),
        settings.site.default_page_size,
        settings.site.max_page_size,
    ))
}

/// ## Errors
/// Returns `BadRequest` if the `{id}` path segment is not a UUID.
pub fn path_id(req: &Request) -> AppResult<Uuid> {
    let raw = req.param::<String>("id").unwrap_or_default();
    Uuid::parse_str(&raw).map_err(|_err| AppError::BadRequest(format!("invalid id '{raw}'")))
}

/// ## Errors
/// Returns `BadRequest` if the `{slug}` path segment is missing.
pub fn path_slug(req: &Request) -> AppResult<String> {
    req.param::<String>("slug")
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("slug required".to_string()))
}

/// Non-blank text query value.
#[must_use]
pub fn query_text(req: &Request, key: &str) -> Option<String> {
    req.query::<String>(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// ## Errors
/// Returns `BadRequest` if the value is present but not a date.
pub fn query_date(req: &Request, key: &str) -> AppResult<Option<NaiveDate>> {
    query_text(req, key)
        .map(|raw| {
            parse_calendar_date(&raw)
                .map_err(|_err| AppError::BadRequest(format!("'{key}' must be a date (YYYY-MM-DD)")))
        })
        .transpose()
}

/// `true`/`1`/`yes` and `false`/`0`/`no`; anything else is ignored.
#[must_use]
pub fn query_flag(req: &Request, key: &str) -> Option<bool> {
    match query_text(req, key)?.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// ## Errors
/// Returns `BadRequest` if the value is present but not a UUID.
pub fn query_uuid(req: &Request, key: &str) -> AppResult<Option<Uuid>> {
    query_text(req, key)
        .map(|raw| {
            Uuid::parse_str(&raw).map_err(|_err| AppError::BadRequest(format!("'{key}' must be an id")))
        })
        .transpose()
}

/// ## Errors
/// Returns `BadRequest` if the value is present but not a whole number.
pub fn query_int(req: &Request, key: &str) -> AppResult<Option<i32>> {
    query_text(req, key)
        .map(|raw| {
            raw.parse::<i32>()
                .map_err(|_err| AppError::BadRequest(format!("'{key}' must be a whole number")))
        })
        .transpose()
}

/// ## Errors
/// Returns `BadRequest` with the parser's message if the body is not the
/// expected JSON shape.
pub async fn json_body<T: DeserializeOwned>(req: &mut Request) -> AppResult<T> {
    req.parse_json::<T>().await.map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        AppError::BadRequest(format!("invalid request body: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let page = Page {
            items: vec!["a", "b"],
            total: 45,
            request: PageRequest { page: 2, limit: 2 },
        };
        let json = serde_json::to_value(Paginated::from(page)).unwrap_or_default();
        assert_eq!(json["data"], serde_json::json!(["a", "b"]));
        assert_eq!(json["pagination"]["page"], 2);
        assert_eq!(json["pagination"]["total"], 45);
        assert_eq!(json["pagination"]["totalPages"], 23);
    }
}
