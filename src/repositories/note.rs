use deadpool_postgres::Pool;
use futures::future::BoxFuture;

use crate::{
    error::Result,
    models::note::{NewNote, Note},
};

/// Persists food notes.
pub trait NoteStore: Send + Sync {
    /// Lists a user's notes, newest day first.
    fn list_for_user(&self, user_id: i32) -> BoxFuture<'_, Result<Vec<Note>>>;

    /// Inserts a note with its day index.
    fn create(&self, note: NewNote) -> BoxFuture<'_, Result<Note>>;
}

/// `NoteStore` backed by the `notes` table.
#[derive(Clone)]
pub struct PgNoteStore {
    pool: Pool,
}

impl PgNoteStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

impl NoteStore for PgNoteStore {
    fn list_for_user(&self, user_id: i32) -> BoxFuture<'_, Result<Vec<Note>>> {
        Box::pin(async move {
            let client = self.pool.get().await?;
            let statement = client
                .prepare_cached(
                    r#"
                    SELECT id, user_id, title, note, created_at, day_diff_from_epoch
                    FROM notes
                    WHERE user_id = $1 AND created_at IS NOT NULL
                    ORDER BY
                        COALESCE(day_diff_from_epoch, created_at - DATE '1970-01-01') DESC,
                        id DESC
                    "#,
                )
                .await?;
            let rows = client.query(&statement, &[&user_id]).await?;
            rows.iter().map(Note::try_from).collect()
        })
    }

    fn create(&self, note: NewNote) -> BoxFuture<'_, Result<Note>> {
        Box::pin(async move {
            let client = self.pool.get().await?;
            let statement = client
                .prepare_cached(
                    r#"
                    INSERT INTO notes (user_id, title, note, created_at, day_diff_from_epoch)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id, user_id, title, note, created_at, day_diff_from_epoch
                    "#,
                )
                .await?;
            let day_index = note.day_index();
            let row = client
                .query_one(
                    &statement,
                    &[&note.user_id, &note.title, &note.body, &note.created_at, &day_index],
                )
                .await?;
            Note::try_from(&row)
        })
    }
}
