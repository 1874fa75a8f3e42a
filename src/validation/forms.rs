use garde::Validate;
use serde::Deserialize;

use crate::error::{AppError, Result};

/// The signup form.
///
/// Missing fields deserialize as empty so that absence is reported as a 400.
#[derive(Deserialize, Validate)]
pub struct SignupForm {
    #[serde(default)]
    #[garde(length(min = 1))]
    pub username: String,
    #[serde(default)]
    #[garde(length(min = 1))]
    pub password: String,
    #[serde(default, rename = "firstName")]
    #[garde(skip)]
    pub first_name: Option<String>,
    #[serde(default, rename = "lastName")]
    #[garde(skip)]
    pub last_name: Option<String>,
}

/// The login form. Not validated; an empty username simply matches nobody.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// The food note form posted from the home page.
#[derive(Debug, Deserialize, Validate)]
pub struct NoteForm {
    #[serde(default, rename = "FoodTitle")]
    #[garde(length(min = 1))]
    pub title: String,
    #[serde(default, rename = "FoodNote")]
    #[garde(length(min = 1))]
    pub body: String,
}

/// Validates `form`, replacing garde's report with `message` for the caller.
pub fn require_fields<T>(form: &T, message: &str) -> Result<()>
where
    T: Validate,
    T::Context: Default,
{
    form.validate().map_err(|report| {
        tracing::debug!("Form rejected: {}", report);
        AppError::Validation(message.to_string())
    })
}

/// Treats blank optional fields as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
