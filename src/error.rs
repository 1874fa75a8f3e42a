use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

/// The application's error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A database error.
    #[error("Database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    /// A connection pool error.
    #[error("Pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    /// A Redis error.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// A required field was missing from a form.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The username is already taken.
    #[error("Username already exists")]
    DuplicateUsername,

    /// No user has the submitted username.
    #[error("Username not found")]
    UnknownUsername,

    /// The password does not match the stored hash.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The request needs a logged-in session.
    #[error("Authorization failed")]
    Unauthorized,

    /// A row lacked a column value the model needs.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// A password hashing error.
    #[error("Hashing error: {0}")]
    Hashing(String),

    /// An internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

/// A `Result` type that uses `AppError` as the error type.
pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }

            AppError::Pool(ref e) => {
                tracing::error!("Pool error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }

            AppError::Redis(ref e) => {
                tracing::error!("Redis error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }

            AppError::Validation(ref msg) => {
                tracing::debug!("Validation error: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }

            AppError::DuplicateUsername => {
                tracing::debug!("Signup rejected: username taken");
                (StatusCode::BAD_REQUEST, "Username already exists.".to_string())
            }

            AppError::UnknownUsername => {
                tracing::warn!("Login failed: unknown username");
                (
                    StatusCode::BAD_REQUEST,
                    r#"username not found! <a href="/login">Retry</a>."#.to_string(),
                )
            }

            AppError::InvalidCredentials => {
                tracing::warn!("Login failed: invalid credentials");
                (
                    StatusCode::BAD_REQUEST,
                    r#"Invalid username or password! <a href="/login">Retry</a>."#.to_string(),
                )
            }

            AppError::Unauthorized => {
                tracing::warn!("Authorization failed");
                (
                    StatusCode::UNAUTHORIZED,
                    r#"Unauthorized: Please log in <a href="/login">here</a>."#.to_string(),
                )
            }

            AppError::MissingData(ref column) => {
                tracing::error!("Missing data: {}", column);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }

            AppError::Hashing(ref msg) => {
                tracing::error!("Hashing error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }

            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Html(message)).into_response()
    }
}
