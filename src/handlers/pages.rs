use axum::{
    http::StatusCode,
    response::Html,
    Extension,
};

use crate::{
    models::page::PageContext,
    views::{self, Page},
};

pub async fn index(Extension(ctx): Extension<PageContext>) -> Html<String> {
    views::render(Page::Home, &ctx)
}

pub async fn about(Extension(ctx): Extension<PageContext>) -> Html<String> {
    views::render(Page::About, &ctx)
}

pub async fn notes(Extension(ctx): Extension<PageContext>) -> Html<String> {
    views::render(Page::Notes, &ctx)
}

pub async fn login_form(Extension(ctx): Extension<PageContext>) -> Html<String> {
    views::render(Page::Login, &ctx)
}

pub async fn signup_form(Extension(ctx): Extension<PageContext>) -> Html<String> {
    views::render(Page::Signup, &ctx)
}

/// Password reset is not offered.
pub async fn forgot_password() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_IMPLEMENTED, views::forgot_password())
}
