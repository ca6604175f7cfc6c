//! Scheduled events: repeat-rule expansion, admin payloads and storage.

pub mod recurrence;
pub mod request;
pub mod service;
