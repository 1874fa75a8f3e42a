use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use tower_cookies::{Cookie, Cookies};
use tower_cookies::cookie::time::Duration;
use uuid::Uuid;

use crate::{
    error::Result,
    middleware_layer::auth::SESSION_COOKIE,
    services::auth as auth_service,
    state::AppState,
    validation::forms::{require_fields, LoginForm, SignupForm},
    views,
};

/// Creates the signed session cookie for `session_id`.
fn create_session_cookie(state: &AppState, session_id: &Uuid) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, state.session_key.sign(session_id));

    cookie.set_http_only(true);
    if state.config.secure_cookies {
        cookie.set_secure(true);
    }

    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookie.set_max_age(Duration::seconds(state.config.session_ttl_secs() as i64));
    cookie.set_path("/");

    cookie
}

/// Handles user registration.
#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Response> {
    tracing::info!("📝 Signup attempt for: {}", form.username);
    require_fields(&form, "Username and password are required.")?;

    let user = auth_service::register(&state, form).await?;
    tracing::info!("✅ User registered: {}", user.id);

    Ok(views::registration_complete().into_response())
}

/// Handles user login.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    tracing::info!("🔐 Login attempt for: {}", form.username);

    let user = auth_service::authenticate(&state, &form.username, &form.password).await?;
    let session_id = auth_service::start_session(&state, &user).await?;

    cookies.add(create_session_cookie(&state, &session_id));
    tracing::info!("✅ User logged in: {}", user.id);

    Ok(Redirect::to("/").into_response())
}

/// Handles user logout.
#[axum::debug_handler]
pub async fn logout(
    State(state): State<AppState>,
    cookies: Cookies,
) -> Result<Redirect> {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        auth_service::end_session(&state, cookie.value()).await?;
    }

    let mut session_cookie = Cookie::new(SESSION_COOKIE, "");
    session_cookie.set_max_age(Duration::seconds(0));
    session_cookie.set_path("/");
    cookies.remove(session_cookie);

    Ok(Redirect::to("/"))
}
