//! Core types shared by every kidsguide crate: configuration, errors,
//! route constants and slug helpers. Nothing here touches the database.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
pub mod util;
