//! PostgreSQL storage for the kidsguide catalog: schema, migrations,
//! models and query composition.

pub mod db;
pub mod error;
pub mod model;
