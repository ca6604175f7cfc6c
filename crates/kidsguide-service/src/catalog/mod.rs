//! CRUD services for the directory's reference data.
//!
//! Each submodule pairs an admin payload (implementing
//! [`Validate`](crate::validation::Validate)) with the list/get/create/
//! update/delete calls the HTTP layer makes.

use crate::error::{ServiceError, ServiceResult};

pub mod activity;
pub mod category;
pub mod city;
pub mod location;
pub mod organization;
pub mod tag;

/// Turns a "rows removed" flag into `NotFound` when nothing was deleted.
pub(crate) fn ensure_deleted(removed: bool, what: &str, id: uuid::Uuid) -> ServiceResult<()> {
    if removed {
        Ok(())
    } else {
        Err(ServiceError::NotFound(format!("{what} {id}")))
    }
}
