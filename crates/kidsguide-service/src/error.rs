use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors from catalog and event services. Diesel unique and foreign-key
/// violations are reclassified so handlers can answer 409 or 400.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] kidsguide_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] kidsguide_core::error::CoreError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::ValidationError(errors)
    }
}

impl From<DieselError> for ServiceError {
    fn from(err: DieselError) -> Self {
        match &err {
            DieselError::NotFound => Self::NotFound("record".to_string()),
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                let what = info.constraint_name().unwrap_or("unique key");
                Self::Conflict(format!("a record with the same value already exists ({what})"))
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                let what = info.constraint_name().unwrap_or("reference");
                Self::ValidationError(ValidationErrors::single(
                    what,
                    "references a record that does not exist",
                ))
            }
            _ => Self::DatabaseError(err.into()),
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diesel_not_found_maps_to_not_found() {
        let err = ServiceError::from(DieselError::NotFound);
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        let err = ServiceError::from(DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_string()),
        ));
        assert!(matches!(err, ServiceError::Conflict(_)));
    }

    #[test]
    fn test_foreign_key_violation_maps_to_validation() {
        let err = ServiceError::from(DieselError::DatabaseError(
            DatabaseErrorKind::ForeignKeyViolation,
            Box::new("violates foreign key".to_string()),
        ));
        assert!(matches!(err, ServiceError::ValidationError(_)));
    }

    #[test]
    fn test_other_diesel_errors_stay_database_errors() {
        let err = ServiceError::from(DieselError::RollbackTransaction);
        assert!(matches!(err, ServiceError::DatabaseError(_)));
    }
}
