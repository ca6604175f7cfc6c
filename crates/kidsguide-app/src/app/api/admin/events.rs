use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use kidsguide_db::model::event::Event;
use kidsguide_service::event::request::{EventInput, OccurrenceRequest};
use kidsguide_service::event::service::{self as event_service, BatchOutcome};

use crate::app::api::params::{json_body, path_id};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// `201` when every occurrence was stored, `500` when none were, `207`
/// for anything in between.
#[must_use]
pub fn batch_status(outcome: &BatchOutcome) -> StatusCode {
    if outcome.failed.is_empty() {
        StatusCode::CREATED
    } else if outcome.created.is_empty() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::MULTI_STATUS
    }
}

/// ## Summary
/// POST /api/admin/events
///
/// Expands the request's repeat rule and stores every occurrence. The
/// body lists both the stored events and the ones that failed.
///
/// ## Errors
/// Returns HTTP 400 if the body or its dates are invalid (nothing is stored).
#[handler]
async fn create_events(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<BatchOutcome>> {
    let request: OccurrenceRequest = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;

    let outcome = event_service::create_series(provider.as_ref(), request).await?;

    res.status_code(batch_status(&outcome));
    Ok(Json(outcome))
}

/// ## Summary
/// PUT /api/admin/events/{id}: edits a single stored occurrence.
#[handler]
async fn update_event(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Event>> {
    let id = path_id(req)?;
    let input: EventInput = json_body(req).await?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(event_service::update(&mut conn, id, input).await?))
}

#[handler]
async fn delete_event(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let id = path_id(req)?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;
    event_service::delete(&mut conn, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("events")
        .post(create_events)
        .push(Router::with_path("{id}").put(update_event).delete(delete_event))
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;

    use salvo::test::{ResponseExt, TestClient};

    use kidsguide_db::db::DbProvider;
    use kidsguide_db::db::connection::{DbConnection, PoolRunError};
    use kidsguide_db::error::{DbError, DbResult};

    use super::*;
    use crate::db_handler::DbProviderHandler;

    /// A pool that never hands out a connection.
    #[derive(Clone)]
    struct ExhaustedPool;

    impl DbProvider for ExhaustedPool {
        fn get_connection<'a>(
            &'a self,
        ) -> Pin<Box<dyn Future<Output = DbResult<DbConnection<'a>>> + Send + 'a>> {
            Box::pin(async { Err(DbError::PoolError(PoolRunError::TimedOut)) })
        }
    }

    fn service() -> Router {
        Router::new()
            .hoop(DbProviderHandler {
                provider: ExhaustedPool,
            })
            .push(routes())
    }

    #[test]
    fn test_batch_status() {
        let mut outcome = BatchOutcome::default();
        assert_eq!(batch_status(&outcome), StatusCode::CREATED);

        outcome.failed.push(event_service::FailedOccurrence {
            slug: "swim-1".to_string(),
            date: chrono::NaiveDate::MIN,
            error: "duplicate".to_string(),
        });
        assert_eq!(batch_status(&outcome), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test_log::test(tokio::test)]
    async fn test_invalid_base_date_is_400() {
        let mut res = TestClient::post("http://127.0.0.1:5800/events")
            .json(&serde_json::json!({
                "activityId": "018f3a4e-0000-7000-8000-000000000001",
                "title": "Toddler Swim",
                "baseDate": "2024-02-30",
                "repeatPattern": "weekly",
            }))
            .send(service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        let body: serde_json::Value = res.take_json().await.unwrap_or_default();
        assert_eq!(body["details"][0]["field"], "baseDate");
    }

    #[tokio::test]
    async fn test_every_insert_failing_is_500_with_report() {
        let mut res = TestClient::post("http://127.0.0.1:5800/events")
            .json(&serde_json::json!({
                "activityId": "018f3a4e-0000-7000-8000-000000000001",
                "title": "Toddler Swim",
                "baseDate": "2024-01-01",
                "repeatPattern": "daily",
                "repeatOccurrences": 3,
            }))
            .send(service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        let body: serde_json::Value = res.take_json().await.unwrap_or_default();
        assert_eq!(body["created"].as_array().map(Vec::len), Some(0));
        assert_eq!(body["failed"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["failed"][0]["slug"], "toddler-swim-1704067200000");
    }

    #[tokio::test]
    async fn test_oversized_series_is_400() {
        let mut res = TestClient::post("http://127.0.0.1:5800/events")
            .json(&serde_json::json!({
                "activityId": "018f3a4e-0000-7000-8000-000000000001",
                "title": "Toddler Swim",
                "baseDate": "2024-01-01",
                "repeatPattern": "daily",
                "repeatEnd": "9999-12-31",
                "repeatOccurrences": 4_000_000_000_u32,
            }))
            .send(service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        let body: serde_json::Value = res.take_json().await.unwrap_or_default();
        assert_eq!(body["details"][0]["field"], "repeatOccurrences");
    }

    #[tokio::test]
    async fn test_null_pattern_stores_one_occurrence() {
        let mut res = TestClient::post("http://127.0.0.1:5800/events")
            .json(&serde_json::json!({
                "activityId": "018f3a4e-0000-7000-8000-000000000001",
                "title": "Toddler Swim",
                "baseDate": "2024-01-01",
                "repeatPattern": null,
            }))
            .send(service())
            .await;

        // Reaches persistence, where the exhausted pool fails the single insert
        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
        let body: serde_json::Value = res.take_json().await.unwrap_or_default();
        assert_eq!(body["failed"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let res = TestClient::post("http://127.0.0.1:5800/events")
            .raw_json("{ not json")
            .send(service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_delete_with_bad_id_is_400() {
        let res = TestClient::delete("http://127.0.0.1:5800/events/not-a-uuid")
            .send(service())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_delete_without_connection_is_503() {
        let res = TestClient::delete(
            "http://127.0.0.1:5800/events/018f3a4e-0000-7000-8000-000000000001",
        )
        .send(service())
        .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));
    }
}
