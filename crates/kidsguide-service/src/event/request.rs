//! Admin payloads for events.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use uuid::Uuid;

use kidsguide_core::constants::{DEFAULT_REPEAT_OCCURRENCES, MAX_REPEAT_OCCURRENCES};
use kidsguide_core::types::RepeatPattern;
use kidsguide_core::util::date::parse_calendar_date;
use kidsguide_core::util::slug::occurrence_slug;

use super::recurrence::{Series, occurrence_timestamp};
use crate::validation::{ValidationErrors, Validate, optional_text, required_text};

/// Body of `POST /admin/events`: one event, optionally repeating.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceRequest {
    pub activity_id: Uuid,
    pub title: String,
    pub base_date: String,
    pub time: Option<String>,
    pub cancelled: Option<bool>,
    pub notes: Option<String>,
    #[serde(default)]
    pub repeat_pattern: RepeatPattern,
    pub repeat_end: Option<String>,
    pub repeat_occurrences: Option<u32>,
}

/// Body of `PUT /admin/events/{id}`: edits one stored occurrence.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub activity_id: Uuid,
    pub title: String,
    pub date: String,
    pub time: Option<String>,
    #[serde(default)]
    pub cancelled: bool,
    pub notes: Option<String>,
    pub slug: Option<String>,
}

/// A validated single-event edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFields {
    pub activity_id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub cancelled: bool,
    pub notes: Option<String>,
    pub slug: String,
}

/// Parses a time of day: `14:30`, `14:30:00` or `2:30 PM`.
#[must_use]
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    ["%H:%M", "%H:%M:%S", "%I:%M %p", "%I:%M%p"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(value, fmt).ok())
}

fn optional_time(errors: &mut ValidationErrors, value: Option<String>) -> Option<NaiveTime> {
    let value = optional_text(value)?;
    if let Some(time) = parse_time_of_day(&value) {
        Some(time)
    } else {
        errors.push("time", "must be a time of day like 14:30 or 2:30 PM");
        None
    }
}

impl Validate for OccurrenceRequest {
    type Valid = Series;

    fn validate(self) -> Result<Series, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = required_text(&mut errors, "title", &self.title);

        let base_date = match parse_calendar_date(&self.base_date) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push("baseDate", "must be a valid date");
                None
            }
        };

        let repeat_end = optional_text(self.repeat_end).and_then(|value| {
            if let Ok(date) = parse_calendar_date(&value) {
                Some(date)
            } else {
                errors.push("repeatEnd", "must be a valid date");
                None
            }
        });

        let time = optional_time(&mut errors, self.time);

        let max_occurrences = self
            .repeat_occurrences
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_REPEAT_OCCURRENCES);
        if max_occurrences > MAX_REPEAT_OCCURRENCES {
            errors.push("repeatOccurrences", "must be 366 or fewer");
        }

        let Some(base_date) = base_date else {
            return Err(errors);
        };

        errors.finish(Series {
            activity_id: self.activity_id,
            title,
            base_date,
            time,
            cancelled: self.cancelled.unwrap_or(false),
            notes: optional_text(self.notes),
            pattern: self.repeat_pattern,
            repeat_end,
            max_occurrences,
        })
    }
}

impl Validate for EventInput {
    type Valid = EventFields;

    fn validate(self) -> Result<EventFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = required_text(&mut errors, "title", &self.title);
        let date = parse_calendar_date(&self.date).ok();
        if date.is_none() {
            errors.push("date", "must be a valid date");
        }
        let time = optional_time(&mut errors, self.time);

        let slug = optional_text(self.slug);
        let slug_ok = slug.as_deref().is_none_or(|slug| {
            slug.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        });
        if !slug_ok {
            errors.push("slug", "must contain only lowercase letters, digits, '_' and '-'");
        }

        let Some(date) = date else {
            return Err(errors);
        };

        // Same derivation as generated occurrences when no slug is sent
        let slug = slug
            .unwrap_or_else(|| occurrence_slug(&title, occurrence_timestamp(date, time)));

        errors.finish(EventFields {
            activity_id: self.activity_id,
            title,
            date,
            time,
            cancelled: self.cancelled,
            notes: optional_text(self.notes),
            slug,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: serde_json::Value) -> OccurrenceRequest {
        serde_json::from_value(json).unwrap_or_else(|e| panic!("bad fixture: {e}"))
    }

    fn base_json() -> serde_json::Value {
        serde_json::json!({
            "activityId": "018f3a4e-0000-7000-8000-000000000001",
            "title": "Toddler Swim",
            "baseDate": "2024-01-01",
        })
    }

    #[test]
    fn test_minimal_request_defaults() {
        let series = request(base_json()).validate();
        let Ok(series) = series else {
            panic!("expected valid request");
        };
        assert_eq!(series.pattern, RepeatPattern::None);
        assert_eq!(series.max_occurrences, DEFAULT_REPEAT_OCCURRENCES);
        assert!(!series.cancelled);
        assert_eq!(series.repeat_end, None);
    }

    #[test]
    fn test_unknown_pattern_is_single_occurrence() {
        let mut json = base_json();
        json["repeatPattern"] = "yearly".into();
        let series = request(json).validate();
        assert_eq!(series.map(|s| s.pattern).ok(), Some(RepeatPattern::None));
    }

    #[test]
    fn test_invalid_base_date_is_rejected() {
        let mut json = base_json();
        json["baseDate"] = "someday".into();
        let err = request(json).validate().err();
        assert_eq!(err.map(|e| e.fields().join(",")), Some("baseDate".to_string()));
    }

    #[test]
    fn test_zero_occurrences_falls_back_to_default() {
        let mut json = base_json();
        json["repeatOccurrences"] = 0.into();
        let series = request(json).validate();
        assert_eq!(
            series.map(|s| s.max_occurrences).ok(),
            Some(DEFAULT_REPEAT_OCCURRENCES)
        );
    }

    #[test]
    fn test_null_pattern_is_single_occurrence() {
        let mut json = base_json();
        json["repeatPattern"] = serde_json::Value::Null;
        let series = request(json).validate();
        assert_eq!(series.map(|s| s.pattern).ok(), Some(RepeatPattern::None));
    }

    #[test]
    fn test_numeric_pattern_is_single_occurrence() {
        let mut json = base_json();
        json["repeatPattern"] = 7.into();
        let series = request(json).validate();
        assert_eq!(series.map(|s| s.pattern).ok(), Some(RepeatPattern::None));
    }

    #[test]
    fn test_pattern_case_is_ignored() {
        let mut json = base_json();
        json["repeatPattern"] = "Weekly".into();
        let series = request(json).validate();
        assert_eq!(series.map(|s| s.pattern).ok(), Some(RepeatPattern::Weekly));
    }

    #[test]
    fn test_occurrence_cap_is_enforced() {
        let mut json = base_json();
        json["repeatPattern"] = "daily".into();
        json["repeatEnd"] = "9999-12-31".into();
        json["repeatOccurrences"] = 4_000_000_000_u32.into();
        let err = request(json).validate().err();
        assert_eq!(
            err.map(|e| e.fields().join(",")),
            Some("repeatOccurrences".to_string())
        );
    }

    #[test]
    fn test_occurrence_cap_is_inclusive() {
        let mut json = base_json();
        json["repeatPattern"] = "daily".into();
        json["repeatOccurrences"] = MAX_REPEAT_OCCURRENCES.into();
        let Ok(series) = request(json).validate() else {
            panic!("expected valid request");
        };
        assert_eq!(series.max_occurrences, MAX_REPEAT_OCCURRENCES);
        // Default end is one year out: 2024 is a leap year, so 367 days fit
        // and the cap is what stops the walk
        assert_eq!(
            super::super::recurrence::expand(&series).len(),
            MAX_REPEAT_OCCURRENCES as usize
        );
    }

    #[test]
    fn test_time_and_end_parse() {
        let mut json = base_json();
        json["time"] = "9:15 AM".into();
        json["repeatEnd"] = "2024-02-01".into();
        json["repeatPattern"] = "weekly".into();
        let Ok(series) = request(json).validate() else {
            panic!("expected valid request");
        };
        assert_eq!(series.time, NaiveTime::from_hms_opt(9, 15, 0));
        assert_eq!(series.repeat_end, NaiveDate::from_ymd_opt(2024, 2, 1));
        assert_eq!(series.pattern, RepeatPattern::Weekly);
    }

    #[test]
    fn test_collects_every_error() {
        let mut json = base_json();
        json["title"] = " ".into();
        json["time"] = "teatime".into();
        json["repeatEnd"] = "never".into();
        let Err(errors) = request(json).validate() else {
            panic!("expected validation errors");
        };
        let mut fields = errors.fields();
        fields.sort_unstable();
        assert_eq!(fields, vec!["repeatEnd", "time", "title"]);
    }

    #[test]
    fn test_event_input_derives_slug_when_missing() {
        let input: EventInput = serde_json::from_value(serde_json::json!({
            "activityId": "018f3a4e-0000-7000-8000-000000000001",
            "title": "Toddler Swim",
            "date": "2024-01-01",
        }))
        .unwrap_or_else(|e| panic!("bad fixture: {e}"));
        assert_eq!(
            input.validate().map(|f| f.slug).ok(),
            Some("toddler-swim-1704067200000".to_string())
        );
    }

    #[test]
    fn test_event_input_rejects_uppercase_slug() {
        let input: EventInput = serde_json::from_value(serde_json::json!({
            "activityId": "018f3a4e-0000-7000-8000-000000000001",
            "title": "Toddler Swim",
            "date": "2024-01-01",
            "slug": "Toddler-Swim",
        }))
        .unwrap_or_else(|e| panic!("bad fixture: {e}"));
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_parse_time_of_day_formats() {
        let expected = NaiveTime::from_hms_opt(14, 30, 0);
        assert_eq!(parse_time_of_day("14:30"), expected);
        assert_eq!(parse_time_of_day("14:30:00"), expected);
        assert_eq!(parse_time_of_day("2:30 PM"), expected);
        assert!(parse_time_of_day("half past two").is_none());
    }

    #[test]
    fn test_event_input_keeps_generated_slug() {
        let input: EventInput = serde_json::from_value(serde_json::json!({
            "activityId": "018f3a4e-0000-7000-8000-000000000001",
            "title": "Toddler Swim",
            "date": "2024-01-08",
            "slug": "toddler-swim-1704672000000",
        }))
        .unwrap_or_else(|e| panic!("bad fixture: {e}"));
        let fields = input.validate();
        assert_eq!(
            fields.map(|f| f.slug).ok(),
            Some("toddler-swim-1704672000000".to_string())
        );
    }
}
