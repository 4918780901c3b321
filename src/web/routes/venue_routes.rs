use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Redirect,
    routing::{get, post},
};
use axum_extra::extract::{Form, cookie::CookieJar};
use chrono::Utc;
use std::sync::Arc;
use tera::Context;
use tracing::{info, warn};

use super::{form_context, log_write_failure, parse_path_id};
use crate::db::services;
use crate::web::flash::{self, FlashMessage};
use crate::web::models::{SearchForm, VenueForm};
use crate::web::{AppError, AppState, Page};

// --- Route Handlers ---

async fn list_venues_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let areas = services::get_venue_areas(&app_state.db_pool, Utc::now()).await?;
    let mut ctx = Context::new();
    ctx.insert("areas", &areas);
    app_state.render_page(jar, "pages/venues.html", ctx)
}

async fn search_venues_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(search): Form<SearchForm>,
) -> Result<Page, AppError> {
    let results = services::search_venues(&app_state.db_pool, search.term(), Utc::now()).await?;
    let mut ctx = Context::new();
    ctx.insert("results", &results);
    ctx.insert("search_term", search.term());
    app_state.render_page(jar, "pages/search_venues.html", ctx)
}

async fn show_venue_handler(
    State(app_state): State<Arc<AppState>>,
    Path(venue_id): Path<String>,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let venue_id = parse_path_id("Venue", &venue_id)?;
    let venue = services::get_venue_detail(&app_state.db_pool, venue_id, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {venue_id} not found")))?;
    let mut ctx = Context::new();
    ctx.insert("venue", &venue);
    app_state.render_page(jar, "pages/show_venue.html", ctx)
}

async fn create_venue_form_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Page, AppError> {
    app_state.render_page(jar, "forms/new_venue.html", form_context(&VenueForm::default()))
}

async fn create_venue_submission_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> (CookieJar, Redirect) {
    let outcome = match form.validate() {
        Ok(input) => services::create_venue(&app_state.db_pool, input).await,
        Err(errors) => Err(errors.into()),
    };

    let jar = match outcome {
        Ok(venue) => {
            info!(venue_id = venue.id, name = %venue.name, "Venue created.");
            flash::push(jar, FlashMessage::success(format!("Venue {} was successfully listed!", venue.name)))
        }
        Err(e) => {
            log_write_failure("create_venue", &e);
            flash::push(
                jar,
                FlashMessage::error(format!("An error occurred. Venue {} could not be listed.", form.name.trim())),
            )
        }
    };
    (jar, Redirect::to("/"))
}

async fn edit_venue_form_handler(
    State(app_state): State<Arc<AppState>>,
    Path(venue_id): Path<String>,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let venue_id = parse_path_id("Venue", &venue_id)?;
    let venue = services::get_venue(&app_state.db_pool, venue_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Venue {venue_id} not found")))?;
    let mut ctx = form_context(&VenueForm::from(&venue));
    ctx.insert("venue", &venue);
    app_state.render_page(jar, "forms/edit_venue.html", ctx)
}

async fn edit_venue_submission_handler(
    State(app_state): State<Arc<AppState>>,
    Path(venue_id): Path<String>,
    jar: CookieJar,
    Form(form): Form<VenueForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let venue_id = parse_path_id("Venue", &venue_id)?;
    let outcome = match form.validate() {
        Ok(input) => services::update_venue(&app_state.db_pool, venue_id, input).await,
        Err(errors) => Err(errors.into()),
    };

    let jar = match outcome {
        Ok(venue) => {
            info!(venue_id, "Venue updated.");
            flash::push(jar, FlashMessage::success(format!("Venue {} was successfully updated!", venue.name)))
        }
        Err(AppError::NotFound(msg)) => return Err(AppError::NotFound(msg)),
        Err(e) => {
            log_write_failure("update_venue", &e);
            flash::push(
                jar,
                FlashMessage::error(format!("An error occurred. Venue {} could not be updated.", form.name.trim())),
            )
        }
    };
    Ok((jar, Redirect::to(&format!("/venues/{venue_id}"))))
}

/// Deletion semantics (cascade vs. restrict on shows) are undecided, so the
/// endpoint refuses without touching any data.
async fn delete_venue_handler(Path(venue_id): Path<String>) -> Result<StatusCode, AppError> {
    let venue_id = parse_path_id("Venue", &venue_id)?;
    warn!(venue_id, "Venue deletion requested but not implemented.");
    Ok(StatusCode::NOT_IMPLEMENTED)
}

// --- Router ---

pub fn create_venue_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_venues_handler))
        .route("/venues/search", post(search_venues_handler))
        .route("/venues/create", get(create_venue_form_handler).post(create_venue_submission_handler))
        .route("/venues/{venue_id}", get(show_venue_handler).delete(delete_venue_handler))
        .route("/venues/{venue_id}/edit", get(edit_venue_form_handler).post(edit_venue_submission_handler))
}
