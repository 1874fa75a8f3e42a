use crate::{
    error::Result,
    models::{page::PageContext, session::Session},
    services::streak,
    state::AppState,
};

/// Loads the user, their notes and their streak for a request.
///
/// A session whose user no longer exists yields an anonymous page that still
/// carries the session.
pub async fn load_context(state: &AppState, session: Option<Session>) -> Result<PageContext> {
    let Some(user_id) = session.as_ref().map(|s| s.user_id) else {
        return Ok(PageContext::default());
    };

    let Some(user) = state.users.find_by_id(user_id).await? else {
        tracing::warn!("Session refers to missing user: {}", user_id);
        return Ok(PageContext::for_session(session));
    };

    let notes = state.notes.list_for_user(user.id).await?;
    let streak = streak::analyze_now(&notes);
    tracing::debug!(
        "Streak for user {}: {} days, gap: {}",
        user.id,
        streak.len(),
        streak.has_gap
    );

    Ok(PageContext {
        session,
        user: Some(user),
        notes,
        streak,
    })
}
