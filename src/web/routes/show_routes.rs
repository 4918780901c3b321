use axum::{Router, extract::State, response::Redirect, routing::get};
use axum_extra::extract::{Form, cookie::CookieJar};
use chrono::Utc;
use std::sync::Arc;
use tera::Context;
use tracing::info;

use super::log_write_failure;
use crate::db::services;
use crate::web::flash::{self, FlashMessage};
use crate::web::models::ShowForm;
use crate::web::{AppError, AppState, Page};

async fn list_shows_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let shows = services::list_shows(&app_state.db_pool).await?;
    let mut ctx = Context::new();
    ctx.insert("shows", &shows);
    app_state.render_page(jar, "pages/shows.html", ctx)
}

async fn create_show_form_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let mut ctx = Context::new();
    ctx.insert("form", &ShowForm::with_default_start(Utc::now()));
    app_state.render_page(jar, "forms/new_show.html", ctx)
}

/// A show naming an unknown artist or venue is refused by the foreign keys
/// and reported like any other failed write.
async fn create_show_submission_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ShowForm>,
) -> (CookieJar, Redirect) {
    let outcome = match form.validate() {
        Ok(input) => services::create_show(&app_state.db_pool, input).await,
        Err(errors) => Err(errors.into()),
    };

    let jar = match outcome {
        Ok(show) => {
            info!(show_id = show.id, venue_id = show.venue_id, artist_id = show.artist_id, "Show created.");
            flash::push(jar, FlashMessage::success("Show was successfully listed!"))
        }
        Err(e) => {
            log_write_failure("create_show", &e);
            flash::push(jar, FlashMessage::error("An error occurred. Show could not be listed."))
        }
    };
    (jar, Redirect::to("/"))
}

pub fn create_show_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shows", get(list_shows_handler))
        .route("/shows/create", get(create_show_form_handler).post(create_show_submission_handler))
}
