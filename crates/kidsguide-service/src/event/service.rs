//! Event creation, listing and editing.

use chrono::NaiveDate;
use serde::Serialize;
use tracing_futures::Instrument;
use uuid::Uuid;

use kidsguide_db::db::DbProvider;
use kidsguide_db::db::connection::DbConnection;
use kidsguide_db::db::pagination::{Page, PageRequest};
use kidsguide_db::db::query::event::{self as event_query, EventFilter};
use kidsguide_db::model::event::{Event, EventChanges, NewEvent};

use super::recurrence::{GeneratedEvent, expand};
use super::request::{EventInput, OccurrenceRequest};
use crate::error::{ServiceError, ServiceResult};
use crate::validation::Validate;

/// An occurrence that could not be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedOccurrence {
    pub slug: String,
    pub date: NaiveDate,
    pub error: String,
}

/// What happened to each occurrence of a batch. Inserts are independent:
/// a failed row is reported here and the rest stay stored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutcome {
    pub created: Vec<Event>,
    pub failed: Vec<FailedOccurrence>,
}

impl BatchOutcome {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// ## Summary
/// Validates an admin event request, expands its repeat rule and stores
/// every occurrence.
///
/// ## Side Effects
/// - Inserts one `event` row per occurrence, each on its own connection
///
/// ## Errors
/// Returns a validation error (nothing stored) if the request is malformed.
/// Per-row insert failures do not fail the call; see [`BatchOutcome`].
#[tracing::instrument(skip(provider, request), fields(activity_id = %request.activity_id))]
pub async fn create_series(
    provider: &(dyn DbProvider + Send + Sync),
    request: OccurrenceRequest,
) -> ServiceResult<BatchOutcome> {
    let series = request.validate()?;
    let generated = expand(&series);

    let outcome = persist_generated(provider, generated).await;

    tracing::info!(
        created = outcome.created.len(),
        failed = outcome.failed.len(),
        "Stored recurring event batch"
    );

    Ok(outcome)
}

/// ## Summary
/// Inserts generated occurrences concurrently with no spanning transaction.
///
/// Results keep the order of `generated`.
pub async fn persist_generated(
    provider: &(dyn DbProvider + Send + Sync),
    generated: Vec<GeneratedEvent>,
) -> BatchOutcome {
    let inserts = generated.into_iter().map(|occurrence| {
        let span = tracing::debug_span!("insert_occurrence", slug = %occurrence.slug);
        async move {
            let result = insert_occurrence(provider, &occurrence).await;
            (occurrence, result)
        }
        .instrument(span)
    });

    let mut outcome = BatchOutcome::default();
    for (occurrence, result) in futures::future::join_all(inserts).await {
        match result {
            Ok(event) => outcome.created.push(event),
            Err(e) => {
                tracing::warn!(slug = %occurrence.slug, error = %e, "Failed to store occurrence");
                outcome.failed.push(FailedOccurrence {
                    slug: occurrence.slug,
                    date: occurrence.date,
                    error: e.to_string(),
                });
            }
        }
    }
    outcome
}

async fn insert_occurrence(
    provider: &(dyn DbProvider + Send + Sync),
    occurrence: &GeneratedEvent,
) -> ServiceResult<Event> {
    let new_event = NewEvent {
        id: Uuid::now_v7(),
        activity_id: occurrence.activity_id,
        title: occurrence.title.clone(),
        date: occurrence.date,
        time: occurrence.time,
        cancelled: occurrence.cancelled,
        notes: occurrence.notes.clone(),
        slug: occurrence.slug.clone(),
    };

    let mut conn = provider.get_connection().await?;
    Ok(event_query::create(&mut conn, &new_event).await?)
}

/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    filter: EventFilter,
    page: PageRequest,
) -> ServiceResult<Page<Event>> {
    Ok(event_query::list(conn, filter, page).await?)
}

/// ## Errors
/// Returns `NotFound` if no event has this slug.
pub async fn get_by_slug(conn: &mut DbConnection<'_>, slug: &str) -> ServiceResult<Event> {
    event_query::find_by_slug(conn, slug)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("event '{slug}'")))
}

/// ## Summary
/// Replaces one stored occurrence. Other occurrences of the same batch are
/// untouched; there is no series record linking them.
///
/// ## Errors
/// Returns a validation error, `NotFound`, or `Conflict` on a duplicate slug.
#[tracing::instrument(skip(conn, input))]
pub async fn update(conn: &mut DbConnection<'_>, id: Uuid, input: EventInput) -> ServiceResult<Event> {
    let fields = input.validate()?;

    let changes = EventChanges {
        activity_id: fields.activity_id,
        title: fields.title,
        date: fields.date,
        time: fields.time,
        cancelled: fields.cancelled,
        notes: fields.notes,
        slug: fields.slug,
        updated_at: chrono::Utc::now(),
    };

    event_query::update(conn, id, &changes)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("event {id}")))
}

/// ## Errors
/// Returns `NotFound` if no event has this ID.
#[tracing::instrument(skip(conn))]
pub async fn delete(conn: &mut DbConnection<'_>, id: Uuid) -> ServiceResult<()> {
    if event_query::delete(conn, id).await? {
        Ok(())
    } else {
        Err(ServiceError::NotFound(format!("event {id}")))
    }
}

#[cfg(test)]
mod tests {
    use std::future::Future;
    use std::pin::Pin;

    use kidsguide_core::error::CoreError;
    use kidsguide_core::types::RepeatPattern;
    use kidsguide_db::error::DbResult;

    use super::super::recurrence::Series;
    use super::*;

    /// Provider whose every checkout fails, standing in for a dead database.
    struct UnavailableDb;

    impl DbProvider for UnavailableDb {
        fn get_connection<'a>(
            &'a self,
        ) -> Pin<Box<dyn Future<Output = DbResult<DbConnection<'a>>> + Send + 'a>> {
            Box::pin(async { Err(CoreError::MissingState("database unavailable").into()) })
        }
    }

    fn weekly(count: u32) -> Vec<GeneratedEvent> {
        expand(&Series {
            activity_id: Uuid::nil(),
            title: "Nature Walk".to_string(),
            base_date: NaiveDate::from_ymd_opt(2024, 4, 6).unwrap_or(NaiveDate::MIN),
            time: None,
            cancelled: false,
            notes: None,
            pattern: RepeatPattern::Weekly,
            repeat_end: None,
            max_occurrences: count,
        })
    }

    #[test_log::test(tokio::test)]
    async fn test_failed_inserts_are_reported_in_order() {
        let generated = weekly(3);
        let expected: Vec<String> = generated.iter().map(|g| g.slug.clone()).collect();

        let outcome = persist_generated(&UnavailableDb, generated).await;

        assert!(outcome.created.is_empty());
        assert!(!outcome.is_complete());
        let slugs: Vec<String> = outcome.failed.iter().map(|f| f.slug.clone()).collect();
        assert_eq!(slugs, expected);
        assert!(outcome.failed[0].error.contains("database unavailable"));
    }

    #[tokio::test]
    async fn test_invalid_request_stores_nothing() {
        let request: OccurrenceRequest = serde_json::from_value(serde_json::json!({
            "activityId": Uuid::nil(),
            "title": "Nature Walk",
            "baseDate": "not-a-date",
            "repeatPattern": "weekly",
        }))
        .unwrap_or_else(|e| panic!("bad fixture: {e}"));

        let result = create_series(&UnavailableDb, request).await;
        assert!(matches!(result, Err(ServiceError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_empty_batch_is_complete() {
        let outcome = persist_generated(&UnavailableDb, Vec::new()).await;
        assert!(outcome.is_complete());
        assert!(outcome.created.is_empty());
    }
}
