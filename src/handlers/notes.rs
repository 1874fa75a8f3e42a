use axum::{
    extract::State,
    response::Redirect,
    Extension, Form,
};

use crate::{
    error::{AppError, Result},
    models::page::PageContext,
    services::notes as note_service,
    state::AppState,
    validation::forms::{require_fields, NoteForm},
};

/// Saves a food note for the logged-in user.
#[axum::debug_handler]
pub async fn submit_note(
    State(state): State<AppState>,
    Extension(ctx): Extension<PageContext>,
    Form(form): Form<NoteForm>,
) -> Result<Redirect> {
    let session = ctx.session.ok_or(AppError::Unauthorized)?;
    require_fields(&form, "foodTitle and FoodNote are required.")?;

    note_service::record_note(&state, session.user_id, form, note_service::today()).await?;

    Ok(Redirect::to("/"))
}
