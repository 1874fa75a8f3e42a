use uuid::Uuid;

use crate::{
    crypto::{
        password::{hash_password, verify_password},
        session_token::new_session_id,
    },
    error::{AppError, Result},
    models::{
        session::Session,
        user::{NewUser, User},
    },
    state::AppState,
    validation::forms::{non_blank, SignupForm},
};

/// Creates a new user.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `form` - The submitted signup form.
///
/// # Returns
///
/// A `Result` containing the created `User`.
pub async fn register(state: &AppState, form: SignupForm) -> Result<User> {
    tracing::debug!("🔐 Creating user: {}", form.username);

    if state.users.find_by_username(&form.username).await?.is_some() {
        return Err(AppError::DuplicateUsername);
    }

    let password_hash = hash_password(&form.password)?;

    let user = state
        .users
        .create(NewUser {
            username: form.username,
            password_hash,
            first_name: non_blank(form.first_name),
            last_name: non_blank(form.last_name),
        })
        .await?;

    tracing::info!("✅ User created with ID: {}", user.id);
    Ok(user)
}

/// Authenticates a user.
///
/// # Returns
///
/// `UnknownUsername` when no such user exists, `InvalidCredentials` when the
/// password does not match.
pub async fn authenticate(state: &AppState, username: &str, password: &str) -> Result<User> {
    tracing::debug!("🔐 Authenticating user: {}", username);

    let user = state
        .users
        .find_by_username(username)
        .await?
        .ok_or(AppError::UnknownUsername)?;

    if !verify_password(password, &user.password)? {
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!("✅ User authenticated: {}", user.id);
    Ok(user)
}

/// Stores a new session for `user` and returns its id.
pub async fn start_session(state: &AppState, user: &User) -> Result<Uuid> {
    let session_id = new_session_id();
    let session = Session::start(
        user.id,
        user.username.clone(),
        state.config.session_duration_days,
    );

    state
        .sessions
        .create(session_id, session, state.config.session_ttl_secs())
        .await?;

    tracing::info!("✅ Session started for user: {}", user.id);
    Ok(session_id)
}

/// Resolves a session cookie value to a live session.
///
/// Unsigned, unknown and expired sessions resolve to `None`; expired ones are
/// removed from the store.
pub async fn resolve_session(state: &AppState, cookie_value: &str) -> Result<Option<Session>> {
    let Some(session_id) = state.session_key.verify(cookie_value) else {
        tracing::warn!("❌ Session cookie failed signature check");
        return Ok(None);
    };

    let Some(session) = state.sessions.get(session_id).await? else {
        tracing::debug!("Session not found: {}", session_id);
        return Ok(None);
    };

    if session.is_expired() {
        tracing::warn!("❌ Session expired for user: {}", session.user_id);
        state.sessions.destroy(session_id).await?;
        return Ok(None);
    }

    Ok(Some(session))
}

/// Destroys the session behind a cookie value, if it is validly signed.
pub async fn end_session(state: &AppState, cookie_value: &str) -> Result<()> {
    if let Some(session_id) = state.session_key.verify(cookie_value) {
        state.sessions.destroy(session_id).await?;
        tracing::info!("✅ Session destroyed: {}", session_id);
    }
    Ok(())
}
