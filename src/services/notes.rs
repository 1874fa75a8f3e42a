use chrono::{NaiveDate, Utc};

use crate::{
    error::Result,
    models::note::{NewNote, Note},
    state::AppState,
    validation::forms::NoteForm,
};

/// Today's calendar day in UTC, the day new notes are filed under.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Records a note for `user_id` on `day`.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `user_id` - The ID of the note's author.
/// * `form` - The validated note form.
/// * `day` - The calendar day the note belongs to.
///
/// # Returns
///
/// A `Result` containing the stored `Note`.
pub async fn record_note(
    state: &AppState,
    user_id: i32,
    form: NoteForm,
    day: NaiveDate,
) -> Result<Note> {
    let note = state
        .notes
        .create(NewNote {
            user_id,
            title: form.title,
            body: form.body,
            created_at: day,
        })
        .await?;

    tracing::info!("📝 Note {} saved for user {} on {}", note.id, user_id, note.calendar_day());
    Ok(note)
}
