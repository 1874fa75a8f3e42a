use deadpool_postgres::Pool;
use std::sync::Arc;
use crate::config::Config;
use crate::crypto::session_token::SessionKey;
use crate::error::Result;
use crate::repositories::{
    note::{NoteStore, PgNoteStore},
    session::{MemorySessionStore, RedisSessionStore, SessionStore},
    user::{PgUserStore, UserStore},
};

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The application's configuration.
    pub config: Config,
    /// The key session cookies are signed with.
    pub session_key: SessionKey,
    /// The credential store.
    pub users: Arc<dyn UserStore>,
    /// The note store.
    pub notes: Arc<dyn NoteStore>,
    /// The session store.
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    /// Creates a new `AppState` backed by PostgreSQL and, when configured, Redis.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    /// * `db` - The database connection pool.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config, db: Pool) -> Result<Self> {
        let users = Arc::new(PgUserStore::new(db.clone()));
        let notes = Arc::new(PgNoteStore::new(db));
        tracing::info!("✅ PostgreSQL stores initialized with deadpool-postgres");

        let sessions: Arc<dyn SessionStore> = match config.redis_url.as_deref() {
            Some(redis_url) => {
                let store = RedisSessionStore::connect(redis_url).await?;
                tracing::info!("✅ Redis session store initialized");
                Arc::new(store)
            }
            None => {
                tracing::warn!("REDIS_URL not set; sessions are kept in memory");
                Arc::new(MemorySessionStore::new())
            }
        };

        Ok(Self::from_parts(config, users, notes, sessions))
    }

    /// Assembles an `AppState` from already-built stores.
    pub fn from_parts(
        config: &Config,
        users: Arc<dyn UserStore>,
        notes: Arc<dyn NoteStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        AppState {
            config: config.clone(),
            session_key: SessionKey::derive(&config.session_secret),
            users,
            notes,
            sessions,
        }
    }
}
