use thiserror::Error;

/// Failures that happen before any database work: settings, date input
/// and server wiring.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A setting is missing or unusable, such as an unknown `site.timezone`.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The value matched neither `YYYY-MM-DD` nor RFC 3339.
    #[error("'{0}' is not a valid date")]
    InvalidDate(String),

    /// Something the server injects itself (pool, settings) was absent.
    #[error("Missing server state: {0}")]
    MissingState(&'static str),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
