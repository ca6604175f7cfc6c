use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};

use kidsguide_db::model::activity::Activity;
use kidsguide_service::catalog::activity::{self, ActivityInput};

use crate::app::api::params::{json_body, path_id};
use crate::db_handler::get_db_from_depot;
use crate::error::AppResult;

/// ## Summary
/// POST /api/admin/activities
///
/// `categoryIds`, `tagIds` and `ageGroupIds` become the activity's links.
#[handler]
async fn create_activity(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<Activity>> {
    let input: ActivityInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let created = activity::create(&mut conn, input).await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(created))
}

/// ## Summary
/// PUT /api/admin/activities/{id}
///
/// Replaces every field and every link; omitted link lists clear the links.
#[handler]
async fn update_activity(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Activity>> {
    let id = path_id(req)?;
    let input: ActivityInput = json_body(req).await?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(Json(activity::update(&mut conn, id, input).await?))
}

#[handler]
async fn delete_activity(req: &mut Request, depot: &mut Depot) -> AppResult<StatusCode> {
    let id = path_id(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    activity::delete(&mut conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("activities")
        .post(create_activity)
        .push(
            Router::with_path("{id}")
                .put(update_activity)
                .delete(delete_activity),
        )
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;

    use super::*;

    #[tokio::test]
    async fn test_create_without_database_is_500() {
        let service = Router::new().push(routes());

        let res = TestClient::post("http://127.0.0.1:5800/activities")
            .json(&serde_json::json!({ "title": "Splash Pad" }))
            .send(service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_wrong_body_shape_is_400() {
        let service = Router::new().push(routes());

        let res = TestClient::post("http://127.0.0.1:5800/activities")
            .json(&serde_json::json!({ "title": "Splash Pad", "tagIds": "indoor" }))
            .send(service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
