//! Business rules for the kidsguide catalog: request validation,
//! recurring event expansion, age-range checks and the CRUD services the
//! HTTP layer calls.

pub mod age_group;
pub mod catalog;
pub mod error;
pub mod event;
pub mod validation;
