use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_cookies::CookieManagerLayer;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{handlers, middleware_layer, state::AppState};

/// Builds the application router.
///
/// Every route runs behind the page-context middleware; unmatched paths fall back
/// to static assets.
pub fn router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route("/", get(handlers::pages::index))
        .route("/about", get(handlers::pages::about))
        .route("/notes", get(handlers::pages::notes))
        .route(
            "/login",
            get(handlers::pages::login_form).post(handlers::auth::login),
        )
        .route(
            "/signup",
            get(handlers::pages::signup_form).post(handlers::auth::signup),
        )
        .route("/forgot-password", get(handlers::pages::forgot_password))
        .route("/logout", get(handlers::auth::logout))
        .route("/foodNoteForm", post(handlers::notes::submit_note))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::load_page_context,
        ))
        .with_state(state)
        .fallback_service(static_dir)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
}
