use serde::Serialize;
use tera::Context;
use tracing::{error, warn};

use crate::db::genres::GENRE_CHOICES;
use crate::web::error::AppError;
use crate::web::models::US_STATES;

pub mod artist_routes;
pub mod show_routes;
pub mod venue_routes;

/// Context shared by the venue and artist forms.
pub(crate) fn form_context<F: Serialize>(form: &F) -> Context {
    let mut ctx = Context::new();
    ctx.insert("form", form);
    ctx.insert("genre_choices", GENRE_CHOICES);
    ctx.insert("state_choices", US_STATES);
    ctx
}

/// Parses an `{id}` path segment. Only plain decimal digits that fit an
/// `i32` name a record; anything else is a missing page.
pub(crate) fn parse_path_id(kind: &str, raw: &str) -> Result<i32, AppError> {
    let not_found = || AppError::NotFound(format!("{kind} {raw} not found"));
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_found());
    }
    raw.parse::<i32>().map_err(|_| not_found())
}

/// Logs a failed write with its typed cause. The user only ever sees the
/// generic flash notice.
pub(crate) fn log_write_failure(action: &'static str, err: &AppError) {
    match err {
        AppError::Validation(_) | AppError::NotFound(_) => {
            warn!(action, error = %err, "Write rejected.");
        }
        AppError::Database(_) | AppError::Template(_) => {
            error!(action, error = ?err, "Write failed and was rolled back.");
        }
    }
}
