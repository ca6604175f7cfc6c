use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Writer, async_trait};
use serde::Serialize;
use thiserror::Error;

use kidsguide_db::error::DbError;
use kidsguide_service::error::ServiceError;
use kidsguide_service::validation::ValidationErrors;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] DbError),

    #[error(transparent)]
    CoreError(#[from] kidsguide_core::error::CoreError),

    /// Malformed request: unparseable body, path or query value.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::ServiceError(ServiceError::ValidationError(errors))
    }
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ValidationErrors>,
}

fn is_pool_error(err: &DbError) -> bool {
    matches!(err, DbError::PoolError(_))
}

impl AppError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::ServiceError(ServiceError::ValidationError(_)) => {
                StatusCode::BAD_REQUEST
            }
            Self::ServiceError(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::ServiceError(ServiceError::Conflict(_)) => StatusCode::CONFLICT,
            Self::DatabaseError(err) | Self::ServiceError(ServiceError::DatabaseError(err))
                if is_pool_error(err) =>
            {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// ## Summary
    /// The JSON body sent to the client. Server-side failures get a generic
    /// message; the detail only goes to the log.
    #[must_use]
    pub fn to_response(&self) -> ErrorResponse {
        match self {
            Self::ServiceError(ServiceError::ValidationError(errors)) => ErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(errors.clone()),
            },
            Self::BadRequest(message) | Self::ServiceError(ServiceError::Conflict(message)) => {
                ErrorResponse {
                    error: message.clone(),
                    details: None,
                }
            }
            Self::ServiceError(ServiceError::NotFound(what)) => ErrorResponse {
                error: format!("Not found: {what}"),
                details: None,
            },
            _ if self.status_code() == StatusCode::SERVICE_UNAVAILABLE => ErrorResponse {
                error: "Database unavailable".to_string(),
                details: None,
            },
            _ => ErrorResponse {
                error: "Internal server error".to_string(),
                details: None,
            },
        }
    }
}

#[async_trait]
impl Writer for AppError {
    async fn write(self, _req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        res.status_code(status);
        res.render(Json(self.to_response()));
    }
}

#[cfg(test)]
mod tests {
    use kidsguide_db::db::connection::PoolRunError;

    use super::*;

    fn timed_out() -> DbError {
        DbError::PoolError(PoolRunError::TimedOut)
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::from(ValidationErrors::single("name", "is required")),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::BadRequest("invalid id".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::NotFound("city 'x'".to_string()).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                ServiceError::Conflict("slug taken".to_string()).into(),
                StatusCode::CONFLICT,
            ),
            (timed_out().into(), StatusCode::SERVICE_UNAVAILABLE),
            (
                ServiceError::from(timed_out()).into(),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                kidsguide_core::error::CoreError::MissingState("x").into(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected, "{err}");
        }
    }

    #[test]
    fn test_validation_body_has_details() {
        let err = AppError::from(ValidationErrors::single("maxAge", "must be 21 or younger"));
        let json = serde_json::to_value(err.to_response()).unwrap_or_default();
        assert_eq!(json["error"], "Validation failed");
        assert_eq!(json["details"][0]["field"], "maxAge");
    }

    #[test]
    fn test_internal_errors_are_not_leaked() {
        let err = AppError::from(kidsguide_core::error::CoreError::MissingState(
            "no database provider in depot",
        ));
        let json = serde_json::to_value(err.to_response()).unwrap_or_default();
        assert_eq!(json["error"], "Internal server error");
        assert!(json.get("details").is_none());
    }
}
