use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use crate::{
    models::page::PageContext,
    services::{auth as auth_service, page as page_service},
    state::AppState,
};

/// The name of the session cookie.
pub const SESSION_COOKIE: &str = "session_id";

/// A middleware that resolves the session and loads the page context.
///
/// Never rejects a request: lookup failures are logged and the request continues
/// with whatever could be resolved, down to an anonymous context.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `cookies` - The request cookies.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
pub async fn load_page_context(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let session = match cookies.get(SESSION_COOKIE) {
        Some(cookie) => match auth_service::resolve_session(&state, cookie.value()).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!("❌ Error resolving session: {}", e);
                None
            }
        },
        None => None,
    };

    let context = match page_service::load_context(&state, session.clone()).await {
        Ok(context) => context,
        Err(e) => {
            tracing::error!("❌ Error fetching user data or notes: {}", e);
            PageContext::for_session(session)
        }
    };

    request.extensions_mut().insert(context);
    next.run(request).await
}
