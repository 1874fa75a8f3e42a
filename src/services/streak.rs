use std::collections::HashSet;

use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Anything the streak can be computed over: a day number plus its display form.
pub trait DayEntry {
    /// Days since the Unix epoch.
    fn day_index(&self) -> i64;
    /// The calendar day, e.g. `2024-03-05`.
    fn calendar_day(&self) -> String;
}

/// The current run of days with at least one note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Streak {
    /// Distinct calendar days of the run, most recent first.
    pub gaps: Vec<String>,
    /// Set when the run is broken before reaching the baseline day.
    pub has_gap: bool,
}

impl Streak {
    /// Number of days in the run.
    pub fn len(&self) -> usize {
        self.gaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }
}

/// Today's day index for the given instant.
pub fn day_index_at(now: DateTime<Utc>) -> i64 {
    now.timestamp().div_euclid(SECONDS_PER_DAY)
}

/// Computes the streak as of now.
pub fn analyze_now<E: DayEntry>(entries: &[E]) -> Streak {
    analyze(entries, day_index_at(Utc::now()))
}

/// Walks `entries` (ordered by day index, newest first) and collects the unbroken
/// run of days ending no earlier than the day before `today`.
///
/// Entries sharing a calendar day count once and never move the cursor. The walk
/// stops at the first entry more than one day older than the cursor.
pub fn analyze<E: DayEntry>(entries: &[E], today: i64) -> Streak {
    let mut cursor = today;
    let mut counted: HashSet<String> = HashSet::new();
    let mut streak = Streak::default();

    for entry in entries {
        let day = entry.calendar_day();
        if counted.contains(&day) {
            continue;
        }

        if entry.day_index() < cursor - 1 {
            streak.has_gap = true;
            tracing::debug!(
                "Streak broken at day {} after {} days",
                entry.day_index(),
                streak.gaps.len()
            );
            return streak;
        }

        cursor = entry.day_index();
        streak.gaps.push(day.clone());
        counted.insert(day);
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, TimeZone};

    const TODAY: i64 = 20_000;

    struct Entry(i64);

    impl DayEntry for Entry {
        fn day_index(&self) -> i64 {
            self.0
        }

        fn calendar_day(&self) -> String {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
            (epoch + Duration::days(self.0)).format("%Y-%m-%d").to_string()
        }
    }

    fn entries(offsets: &[i64]) -> Vec<Entry> {
        offsets.iter().map(|offset| Entry(TODAY - offset)).collect()
    }

    fn days(offsets: &[i64]) -> Vec<String> {
        offsets
            .iter()
            .map(|offset| Entry(TODAY - offset).calendar_day())
            .collect()
    }

    #[test]
    fn empty_history_has_no_streak_and_no_gap() {
        let streak = analyze::<Entry>(&[], TODAY);
        assert_eq!(streak, Streak::default());
        assert!(streak.is_empty());
    }

    #[test]
    fn three_consecutive_days_ending_today() {
        let streak = analyze(&entries(&[0, 1, 2]), TODAY);
        assert_eq!(streak.gaps, days(&[0, 1, 2]));
        assert!(!streak.has_gap);
        assert_eq!(streak.len(), 3);
    }

    #[test]
    fn streak_may_end_yesterday() {
        let streak = analyze(&entries(&[1, 2, 3, 4]), TODAY);
        assert_eq!(streak.gaps, days(&[1, 2, 3, 4]));
        assert!(!streak.has_gap);
    }

    #[test]
    fn gap_after_today_stops_the_walk() {
        let streak = analyze(&entries(&[0, 3]), TODAY);
        assert_eq!(streak.gaps, days(&[0]));
        assert!(streak.has_gap);
    }

    #[test]
    fn stale_history_is_a_gap_with_no_days() {
        for offset in [2, 3, 10, 400] {
            let streak = analyze(&entries(&[offset, offset + 1]), TODAY);
            assert!(streak.gaps.is_empty(), "offset {offset}");
            assert!(streak.has_gap, "offset {offset}");
        }
    }

    #[test]
    fn same_day_notes_count_once() {
        let streak = analyze(&entries(&[0, 0, 1, 1, 1, 2]), TODAY);
        assert_eq!(streak.gaps, days(&[0, 1, 2]));
        assert!(!streak.has_gap);
    }

    #[test]
    fn duplicate_day_does_not_move_cursor() {
        let streak = analyze(&entries(&[1, 1, 3]), TODAY);
        assert_eq!(streak.gaps, days(&[1]));
        assert!(streak.has_gap);
    }

    #[test]
    fn unbroken_runs_of_any_length_have_no_gap() {
        for len in 1..=30 {
            let offsets: Vec<i64> = (0..len).collect();
            let streak = analyze(&entries(&offsets), TODAY);
            assert_eq!(streak.gaps, days(&offsets));
            assert!(!streak.has_gap);
        }
    }

    #[test]
    fn day_index_floors_to_utc_midnight() {
        let late = Utc.with_ymd_and_hms(1970, 1, 2, 23, 59, 59).unwrap();
        let early = Utc.with_ymd_and_hms(1970, 1, 3, 0, 0, 0).unwrap();
        assert_eq!(day_index_at(late), 1);
        assert_eq!(day_index_at(early), 2);
    }
}
