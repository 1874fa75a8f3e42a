use chrono::{Datelike, NaiveDate};
use tokio_postgres::Row;

use crate::{
    error::{AppError, Result},
    services::streak::DayEntry,
};

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Returns the number of whole days between the Unix epoch and `date`.
///
/// Equals `floor(date_as_unix_seconds / 86400)` for a date at UTC midnight.
pub fn day_index_of(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Represents a food journal entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// The unique identifier for the note.
    pub id: i32,
    /// The ID of the user who wrote the note.
    pub user_id: i32,
    /// The title of the note.
    pub title: String,
    /// The body text of the note.
    pub body: String,
    /// The calendar day the note was written.
    pub created_at: NaiveDate,
    /// Days since the Unix epoch, fixed at insert time.
    pub day_index: i32,
}

impl Note {
    /// The creation day as `YYYY-MM-DD`.
    pub fn calendar_day(&self) -> String {
        self.created_at.format("%Y-%m-%d").to_string()
    }
}

impl DayEntry for Note {
    fn day_index(&self) -> i64 {
        i64::from(self.day_index)
    }

    fn calendar_day(&self) -> String {
        Note::calendar_day(self)
    }
}

impl Note {
    /// Assembles a note from nullable columns.
    ///
    /// A missing day index is recomputed from `created_at`; a missing `created_at`
    /// leaves the note without a day and is an error.
    pub fn from_columns(
        id: i32,
        user_id: i32,
        title: String,
        body: String,
        created_at: Option<NaiveDate>,
        day_index: Option<i32>,
    ) -> Result<Self> {
        let created_at = created_at
            .ok_or_else(|| AppError::MissingData(format!("created_at of note {}", id)))?;
        Ok(Self {
            id,
            user_id,
            title,
            body,
            created_at,
            day_index: day_index.unwrap_or_else(|| day_index_of(created_at)),
        })
    }
}

impl TryFrom<&Row> for Note {
    type Error = AppError;

    fn try_from(row: &Row) -> Result<Self> {
        let column = |name: &str| AppError::MissingData(name.to_string());
        Note::from_columns(
            row.try_get("id").map_err(|_| column("id"))?,
            row.try_get("user_id").map_err(|_| column("user_id"))?,
            row.try_get("title").map_err(|_| column("title"))?,
            row.try_get("note").map_err(|_| column("note"))?,
            row.try_get("created_at").map_err(|_| column("created_at"))?,
            row.try_get("day_diff_from_epoch").map_err(|_| column("day_diff_from_epoch"))?,
        )
    }
}

/// The fields needed to insert a note.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub user_id: i32,
    pub title: String,
    pub body: String,
    pub created_at: NaiveDate,
}

impl NewNote {
    /// Day index derived from `created_at`; written once alongside the note.
    pub fn day_index(&self) -> i32 {
        day_index_of(self.created_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn epoch_is_day_zero() {
        assert_eq!(day_index_of(date(1970, 1, 1)), 0);
        assert_eq!(day_index_of(date(1970, 1, 2)), 1);
        assert_eq!(day_index_of(date(1969, 12, 31)), -1);
    }

    #[test]
    fn day_index_matches_unix_seconds() {
        let day = date(2026, 10, 17);
        let midnight = Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(
            i64::from(day_index_of(day)),
            midnight.timestamp().div_euclid(86400)
        );
    }

    #[test]
    fn calendar_day_is_iso_formatted() {
        let note = Note {
            id: 1,
            user_id: 1,
            title: "Breakfast".into(),
            body: "Oats".into(),
            created_at: date(2024, 3, 5),
            day_index: day_index_of(date(2024, 3, 5)),
        };
        assert_eq!(note.calendar_day(), "2024-03-05");
    }

    #[test]
    fn missing_day_index_is_recomputed_from_date() {
        let day = date(2024, 3, 5);
        let note = Note::from_columns(3, 1, "Tea".into(), "Green".into(), Some(day), None).unwrap();
        assert_eq!(note.day_index, day_index_of(day));
    }

    #[test]
    fn missing_date_is_an_error_not_a_panic() {
        let result = Note::from_columns(4, 1, "Tea".into(), "Green".into(), None, Some(19_000));
        assert!(matches!(result, Err(AppError::MissingData(_))));
    }
}
