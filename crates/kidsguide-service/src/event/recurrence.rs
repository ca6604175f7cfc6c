//! Expansion of a repeat rule into concrete event occurrences.
//!
//! ## Summary
//! An admin creates an event once with a cadence (`daily`, `weekdays`,
//! `weekly`, `biweekly`, `monthly` or `none`). [`expand`] turns that into
//! the ordered list of dated rows to insert. The base occurrence is always
//! emitted; later ones stop at the effective end date or the occurrence
//! cap, whichever comes first.

use chrono::{Datelike, Days, Months, NaiveDate, NaiveTime, Weekday};
use uuid::Uuid;

use kidsguide_core::types::RepeatPattern;
use kidsguide_core::util::slug::occurrence_slug;

/// A parsed recurring-event request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Series {
    pub activity_id: Uuid,
    pub title: String,
    pub base_date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub cancelled: bool,
    pub notes: Option<String>,
    pub pattern: RepeatPattern,
    pub repeat_end: Option<NaiveDate>,
    pub max_occurrences: u32,
}

/// One occurrence ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedEvent {
    pub activity_id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub cancelled: bool,
    pub notes: Option<String>,
    pub slug: String,
}

impl Series {
    /// The explicit end date, or the same month/day one year after the base
    /// date (Feb 29 maps to Feb 28).
    #[must_use]
    pub fn effective_end(&self) -> NaiveDate {
        self.repeat_end.unwrap_or_else(|| {
            self.base_date
                .checked_add_months(Months::new(12))
                .unwrap_or(NaiveDate::MAX)
        })
    }

    fn occurrence(&self, date: NaiveDate) -> GeneratedEvent {
        let stamp = occurrence_timestamp(date, self.time);

        GeneratedEvent {
            activity_id: self.activity_id,
            title: self.title.clone(),
            date,
            time: self.time,
            cancelled: self.cancelled,
            notes: self.notes.clone(),
            slug: occurrence_slug(&self.title, stamp),
        }
    }
}

/// Milliseconds since the epoch for an occurrence, reading the date and
/// time as UTC (midnight when there is no time).
#[must_use]
pub fn occurrence_timestamp(date: NaiveDate, time: Option<NaiveTime>) -> i64 {
    date.and_time(time.unwrap_or(NaiveTime::MIN))
        .and_utc()
        .timestamp_millis()
}

/// ## Summary
/// The date after `current` for `pattern`.
///
/// `emitted` is how many occurrences exist so far; monthly steps are taken
/// from `base` (`base + emitted months`) so the day-of-month never drifts
/// after a clamp. Days past the end of a short month clamp to its last
/// day: Jan 31 -> Feb 29 -> Mar 31.
///
/// Returns `None` for `RepeatPattern::None` or when the calendar runs out.
#[must_use]
pub fn next_date(
    pattern: RepeatPattern,
    base: NaiveDate,
    current: NaiveDate,
    emitted: u32,
) -> Option<NaiveDate> {
    match pattern {
        RepeatPattern::None => None,
        RepeatPattern::Daily => current.checked_add_days(Days::new(1)),
        RepeatPattern::Weekdays => {
            let mut next = current.checked_add_days(Days::new(1))?;
            while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
                next = next.checked_add_days(Days::new(1))?;
            }
            Some(next)
        }
        RepeatPattern::Weekly => current.checked_add_days(Days::new(7)),
        RepeatPattern::Biweekly => current.checked_add_days(Days::new(14)),
        RepeatPattern::Monthly => base.checked_add_months(Months::new(emitted)),
    }
}

/// ## Summary
/// Expands `series` into its ordered occurrences.
///
/// The base date is always emitted, even when it is already past the end
/// date. After that the walk continues while the next date is on or before
/// the effective end and fewer than `max_occurrences` have been produced.
#[must_use]
pub fn expand(series: &Series) -> Vec<GeneratedEvent> {
    let end = series.effective_end();
    let max = series.max_occurrences.max(1);

    let mut events = vec![series.occurrence(series.base_date)];
    let mut current = series.base_date;
    let mut emitted: u32 = 1;

    while emitted < max {
        let Some(next) = next_date(series.pattern, series.base_date, current, emitted) else {
            break;
        };
        if next > end {
            break;
        }
        events.push(series.occurrence(next));
        current = next;
        emitted += 1;
    }

    tracing::debug!(
        pattern = %series.pattern,
        base_date = %series.base_date,
        end = %end,
        count = events.len(),
        "Expanded recurring event"
    );

    events
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use kidsguide_core::constants::DEFAULT_REPEAT_OCCURRENCES;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
    }

    fn series(pattern: RepeatPattern, base: NaiveDate) -> Series {
        Series {
            activity_id: Uuid::nil(),
            title: "Story Time".to_string(),
            base_date: base,
            time: None,
            cancelled: false,
            notes: None,
            pattern,
            repeat_end: None,
            max_occurrences: DEFAULT_REPEAT_OCCURRENCES,
        }
    }

    fn dates(events: &[GeneratedEvent]) -> Vec<NaiveDate> {
        events.iter().map(|e| e.date).collect()
    }

    #[test_log::test]
    fn test_none_emits_only_base() {
        let events = expand(&series(RepeatPattern::None, date(2024, 1, 1)));
        assert_eq!(dates(&events), vec![date(2024, 1, 1)]);
    }

    #[test]
    fn test_daily_with_occurrence_cap() {
        let mut s = series(RepeatPattern::Daily, date(2024, 1, 1));
        s.max_occurrences = 5;
        let events = expand(&s);
        assert_eq!(
            dates(&events),
            (1..=5).map(|d| date(2024, 1, d)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_weekdays_skip_weekend() {
        // 2024-01-05 is a Friday
        let mut s = series(RepeatPattern::Weekdays, date(2024, 1, 5));
        s.max_occurrences = 3;
        let events = expand(&s);
        assert_eq!(
            dates(&events),
            vec![date(2024, 1, 5), date(2024, 1, 8), date(2024, 1, 9)]
        );
    }

    #[test]
    fn test_weekdays_from_saturday_still_emits_base() {
        let mut s = series(RepeatPattern::Weekdays, date(2024, 1, 6));
        s.max_occurrences = 2;
        let events = expand(&s);
        assert_eq!(dates(&events), vec![date(2024, 1, 6), date(2024, 1, 8)]);
    }

    #[test]
    fn test_weekly_with_end_before_base_emits_once() {
        let mut s = series(RepeatPattern::Weekly, date(2024, 3, 1));
        s.repeat_end = Some(date(2024, 2, 1));
        assert_eq!(dates(&expand(&s)), vec![date(2024, 3, 1)]);
    }

    #[test]
    fn test_weekly_with_end_equal_to_base_emits_once() {
        let mut s = series(RepeatPattern::Weekly, date(2024, 3, 1));
        s.repeat_end = Some(date(2024, 3, 1));
        assert_eq!(dates(&expand(&s)), vec![date(2024, 3, 1)]);
    }

    #[test]
    fn test_end_date_is_inclusive() {
        let mut s = series(RepeatPattern::Weekly, date(2024, 3, 1));
        s.repeat_end = Some(date(2024, 3, 15));
        assert_eq!(
            dates(&expand(&s)),
            vec![date(2024, 3, 1), date(2024, 3, 8), date(2024, 3, 15)]
        );
    }

    #[test]
    fn test_biweekly_steps_fourteen_days() {
        let mut s = series(RepeatPattern::Biweekly, date(2024, 1, 1));
        s.max_occurrences = 3;
        assert_eq!(
            dates(&expand(&s)),
            vec![date(2024, 1, 1), date(2024, 1, 15), date(2024, 1, 29)]
        );
    }

    #[test]
    fn test_monthly_clamps_without_drifting() {
        let mut s = series(RepeatPattern::Monthly, date(2024, 1, 31));
        s.max_occurrences = 4;
        assert_eq!(
            dates(&expand(&s)),
            vec![
                date(2024, 1, 31),
                date(2024, 2, 29),
                date(2024, 3, 31),
                date(2024, 4, 30)
            ]
        );
    }

    #[test]
    fn test_default_end_is_one_year_out() {
        let s = series(RepeatPattern::Monthly, date(2024, 1, 15));
        assert_eq!(s.effective_end(), date(2025, 1, 15));
        // Base plus twelve monthly steps lands exactly on the end date
        assert_eq!(expand(&s).len(), 13);
    }

    #[test]
    fn test_default_end_from_leap_day() {
        let s = series(RepeatPattern::Daily, date(2024, 2, 29));
        assert_eq!(s.effective_end(), date(2025, 2, 28));
    }

    #[test]
    fn test_weekly_default_cap_is_52() {
        let events = expand(&series(RepeatPattern::Weekly, date(2024, 1, 1)));
        assert_eq!(events.len(), 52);
    }

    #[test]
    fn test_daily_without_limits_stops_at_cap() {
        let events = expand(&series(RepeatPattern::Daily, date(2024, 1, 1)));
        assert_eq!(events.len(), DEFAULT_REPEAT_OCCURRENCES as usize);
    }

    #[test]
    fn test_no_date_past_end_and_strictly_increasing() {
        for pattern in [
            RepeatPattern::Daily,
            RepeatPattern::Weekdays,
            RepeatPattern::Weekly,
            RepeatPattern::Biweekly,
            RepeatPattern::Monthly,
        ] {
            let mut s = series(pattern, date(2024, 5, 17));
            s.repeat_end = Some(date(2024, 8, 1));
            s.max_occurrences = 500;
            let events = expand(&s);
            assert!(events.iter().all(|e| e.date <= date(2024, 8, 1)), "{pattern}");
            assert!(events.windows(2).all(|w| w[0].date < w[1].date), "{pattern}");
        }
    }

    #[test]
    fn test_slugs_unique_within_batch() {
        let mut s = series(RepeatPattern::Daily, date(2024, 1, 1));
        s.max_occurrences = 30;
        let events = expand(&s);
        let slugs: HashSet<_> = events.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs.len(), events.len());
        assert_eq!(events[0].slug, "story-time-1704067200000");
    }

    #[test]
    fn test_slug_includes_time_of_day() {
        let mut s = series(RepeatPattern::None, date(2024, 1, 1));
        s.time = NaiveTime::from_hms_opt(10, 30, 0);
        assert_eq!(expand(&s)[0].slug, "story-time-1704105000000");
    }

    #[test]
    fn test_occurrences_copy_series_fields() {
        let mut s = series(RepeatPattern::Weekly, date(2024, 1, 1));
        s.max_occurrences = 2;
        s.cancelled = true;
        s.notes = Some("Bring a towel".to_string());
        let events = expand(&s);
        assert!(events.iter().all(|e| e.cancelled));
        assert!(events.iter().all(|e| e.notes.as_deref() == Some("Bring a towel")));
    }
}
