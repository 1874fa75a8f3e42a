use crate::{
    models::{note::Note, session::Session, user::User},
    services::streak::Streak,
};

/// Request-scoped data every page is rendered from.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    /// The verified session, if the request carried one.
    pub session: Option<Session>,
    /// The logged-in user.
    pub user: Option<User>,
    /// The user's notes, newest day first.
    pub notes: Vec<Note>,
    /// The streak computed from `notes`.
    pub streak: Streak,
}

impl PageContext {
    /// Context for a request with a session but nothing else loaded.
    pub fn for_session(session: Option<Session>) -> Self {
        Self {
            session,
            ..Self::default()
        }
    }
}
