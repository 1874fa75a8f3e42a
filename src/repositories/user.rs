use deadpool_postgres::Pool;
use futures::future::BoxFuture;
use tokio_postgres::error::SqlState;

use crate::{
    error::{AppError, Result},
    models::user::{NewUser, User},
};

/// Persists user identities and password hashes.
pub trait UserStore: Send + Sync {
    /// Finds a user by their username.
    fn find_by_username<'a>(&'a self, username: &'a str) -> BoxFuture<'a, Result<Option<User>>>;

    /// Finds a user by their ID.
    fn find_by_id(&self, user_id: i32) -> BoxFuture<'_, Result<Option<User>>>;

    /// Inserts a user, failing with `DuplicateUsername` when the name is taken.
    fn create(&self, user: NewUser) -> BoxFuture<'_, Result<User>>;
}

/// `UserStore` backed by the `users` table.
#[derive(Clone)]
pub struct PgUserStore {
    pool: Pool,
}

impl PgUserStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

impl UserStore for PgUserStore {
    fn find_by_username<'a>(&'a self, username: &'a str) -> BoxFuture<'a, Result<Option<User>>> {
        Box::pin(async move {
            let client = self.pool.get().await?;
            let statement = client
                .prepare_cached(
                    r#"
                    SELECT id, username, password, firstname, lastname
                    FROM users
                    WHERE username = $1
                    "#,
                )
                .await?;
            let row = client.query_opt(&statement, &[&username]).await?;
            Ok(row.as_ref().map(User::from))
        })
    }

    fn find_by_id(&self, user_id: i32) -> BoxFuture<'_, Result<Option<User>>> {
        Box::pin(async move {
            let client = self.pool.get().await?;
            let statement = client
                .prepare_cached(
                    r#"
                    SELECT id, username, password, firstname, lastname
                    FROM users
                    WHERE id = $1
                    "#,
                )
                .await?;
            let row = client.query_opt(&statement, &[&user_id]).await?;
            Ok(row.as_ref().map(User::from))
        })
    }

    fn create(&self, user: NewUser) -> BoxFuture<'_, Result<User>> {
        Box::pin(async move {
            let client = self.pool.get().await?;
            let statement = client
                .prepare_cached(
                    r#"
                    INSERT INTO users (username, password, firstname, lastname)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, username, password, firstname, lastname
                    "#,
                )
                .await?;
            let row = client
                .query_one(
                    &statement,
                    &[&user.username, &user.password_hash, &user.first_name, &user.last_name],
                )
                .await
                .map_err(|e| {
                    if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                        AppError::DuplicateUsername
                    } else {
                        AppError::Database(e)
                    }
                })?;
            Ok(User::from(&row))
        })
    }
}
