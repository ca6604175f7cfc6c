mod admin;
mod app_specific;
pub mod params;
mod public;

use salvo::Router;

// Re-export route constants from core
pub use kidsguide_core::constants::{
    ADMIN_ROUTE_COMPONENT, ADMIN_ROUTE_PREFIX, API_ROUTE_COMPONENT, API_ROUTE_PREFIX,
};

/// ## Summary
/// Constructs the `/api` router: health check, public listings and admin CRUD.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(app_specific::routes())
        .push(admin::routes())
        .push(public::routes())
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use salvo::test::{ResponseExt, TestClient};

    use super::*;

    #[tokio::test]
    async fn test_healthcheck() {
        let mut res = TestClient::get("http://127.0.0.1:5800/api/app/healthcheck")
            .send(routes())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(res.take_string().await.unwrap_or_default(), "OK");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let res = TestClient::get("http://127.0.0.1:5800/api/playgrounds")
            .send(routes())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_admin_prefix_routes_to_admin() {
        let res = TestClient::delete(format!("http://127.0.0.1:5800{ADMIN_ROUTE_PREFIX}/tags/x"))
            .send(routes())
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
