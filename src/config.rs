use std::env;
use anyhow::{Context, Result};
use zeroize::Zeroizing;

/// Longest accepted session lifetime, ten years.
const MAX_SESSION_DAYS: i64 = 3650;

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The URL of the PostgreSQL database.
    pub database_url: String,
    /// The URL of the Redis server. Sessions stay in-process when unset.
    pub redis_url: Option<String>,
    /// The secret used to sign session cookies.
    pub session_secret: Zeroizing<String>,
    /// The duration of a session in days.
    pub session_duration_days: i64,
    /// The port the HTTP server listens on.
    pub port: u16,
    /// Whether cookies are marked `Secure`.
    pub secure_cookies: bool,
    /// The directory static assets are served from.
    pub static_dir: String,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let session_secret = env::var("SESSION_SECRET")
            .context("SESSION_SECRET must be set (generate with: openssl rand -hex 32)")?;

        if session_secret.trim().is_empty() {
            anyhow::bail!("SESSION_SECRET must not be empty");
        }

        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.is_empty()),
            session_secret: Zeroizing::new(session_secret),
            session_duration_days: parse_session_days(
                &env::var("SESSION_DURATION_DAYS").unwrap_or_else(|_| "7".to_string()),
            )?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("Invalid PORT")?,
            secure_cookies: env::var("APP_ENV")
                .unwrap_or_else(|_| "development".to_string()) == "production",
            static_dir: env::var("STATIC_DIR")
                .unwrap_or_else(|_| "public".to_string()),
        })
    }

    /// Session lifetime in seconds, used for both the store TTL and the cookie.
    pub fn session_ttl_secs(&self) -> u64 {
        self.session_duration_days.unsigned_abs() * 86400
    }
}

/// Parses `SESSION_DURATION_DAYS`, which must be between 1 and `MAX_SESSION_DAYS`.
///
/// Redis refuses a zero `SET EX`, and a negative value would make every
/// session expire on creation.
fn parse_session_days(raw: &str) -> Result<i64> {
    let days: i64 = raw
        .trim()
        .parse()
        .context("Invalid SESSION_DURATION_DAYS")?;
    if !(1..=MAX_SESSION_DAYS).contains(&days) {
        anyhow::bail!("SESSION_DURATION_DAYS must be between 1 and {MAX_SESSION_DAYS}, got {days}");
    }
    Ok(days)
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            database_url: "postgres://postgres@localhost/food_streak_test".to_string(),
            redis_url: None,
            session_secret: Zeroizing::new("test-session-secret".to_string()),
            session_duration_days: 7,
            port: 3000,
            secure_cookies: false,
            static_dir: "public".to_string(),
        }
    }
}
