/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const ADMIN_ROUTE_COMPONENT: &str = "admin";
pub const ADMIN_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", ADMIN_ROUTE_COMPONENT);

/// Occurrence cap applied when a recurring event request does not give one.
pub const DEFAULT_REPEAT_OCCURRENCES: u32 = 52;

/// Largest `repeatOccurrences` one request may ask for: a daily event for a
/// full (leap) year.
pub const MAX_REPEAT_OCCURRENCES: u32 = 366;

/// Upper bound accepted for an age group's `max_age`, in years.
pub const MAX_CHILD_AGE: i32 = 21;
