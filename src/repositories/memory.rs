//! In-memory stores for handler tests.

use std::sync::Arc;

use futures::future::BoxFuture;
use tokio::sync::Mutex;

use crate::{
    error::{AppError, Result},
    models::{
        note::{NewNote, Note},
        user::{NewUser, User},
    },
    repositories::{note::NoteStore, user::UserStore},
};

#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl MemoryUserStore {
    pub async fn count(&self) -> usize {
        self.users.lock().await.len()
    }
}

impl UserStore for MemoryUserStore {
    fn find_by_username<'a>(&'a self, username: &'a str) -> BoxFuture<'a, Result<Option<User>>> {
        Box::pin(async move {
            let users = self.users.lock().await;
            Ok(users.iter().find(|u| u.username == username).cloned())
        })
    }

    fn find_by_id(&self, user_id: i32) -> BoxFuture<'_, Result<Option<User>>> {
        Box::pin(async move {
            let users = self.users.lock().await;
            Ok(users.iter().find(|u| u.id == user_id).cloned())
        })
    }

    fn create(&self, user: NewUser) -> BoxFuture<'_, Result<User>> {
        Box::pin(async move {
            let mut users = self.users.lock().await;
            if users.iter().any(|u| u.username == user.username) {
                return Err(AppError::DuplicateUsername);
            }
            let created = User {
                id: users.len() as i32 + 1,
                username: user.username,
                password: user.password_hash,
                first_name: user.first_name,
                last_name: user.last_name,
            };
            users.push(created.clone());
            Ok(created)
        })
    }
}

#[derive(Clone, Default)]
pub struct MemoryNoteStore {
    notes: Arc<Mutex<Vec<Note>>>,
}

impl MemoryNoteStore {
    pub async fn count(&self) -> usize {
        self.notes.lock().await.len()
    }

    /// Inserts a note as if it had been written on an earlier day.
    pub async fn seed(&self, note: NewNote) -> Note {
        self.create(note).await.unwrap()
    }
}

impl NoteStore for MemoryNoteStore {
    fn list_for_user(&self, user_id: i32) -> BoxFuture<'_, Result<Vec<Note>>> {
        Box::pin(async move {
            let notes = self.notes.lock().await;
            let mut owned: Vec<Note> = notes.iter().filter(|n| n.user_id == user_id).cloned().collect();
            owned.sort_by(|a, b| b.day_index.cmp(&a.day_index).then(b.id.cmp(&a.id)));
            Ok(owned)
        })
    }

    fn create(&self, note: NewNote) -> BoxFuture<'_, Result<Note>> {
        Box::pin(async move {
            let mut notes = self.notes.lock().await;
            let day_index = note.day_index();
            let created = Note {
                id: notes.len() as i32 + 1,
                user_id: note.user_id,
                title: note.title,
                body: note.body,
                created_at: note.created_at,
                day_index,
            };
            notes.push(created.clone());
            Ok(created)
        })
    }
}
