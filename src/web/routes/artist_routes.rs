use axum::{
    Router,
    extract::{Path, State},
    response::Redirect,
    routing::{get, post},
};
use axum_extra::extract::{Form, cookie::CookieJar};
use chrono::Utc;
use std::sync::Arc;
use tera::Context;
use tracing::info;

use super::{form_context, log_write_failure, parse_path_id};
use crate::db::services;
use crate::web::flash::{self, FlashMessage};
use crate::web::models::{ArtistForm, SearchForm};
use crate::web::{AppError, AppState, Page};

// --- Route Handlers ---

async fn list_artists_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let artists = services::list_artists(&app_state.db_pool).await?;
    let mut ctx = Context::new();
    ctx.insert("artists", &artists);
    app_state.render_page(jar, "pages/artists.html", ctx)
}

async fn search_artists_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(search): Form<SearchForm>,
) -> Result<Page, AppError> {
    let results = services::search_artists(&app_state.db_pool, search.term(), Utc::now()).await?;
    let mut ctx = Context::new();
    ctx.insert("results", &results);
    ctx.insert("search_term", search.term());
    app_state.render_page(jar, "pages/search_artists.html", ctx)
}

async fn show_artist_handler(
    State(app_state): State<Arc<AppState>>,
    Path(artist_id): Path<String>,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let artist_id = parse_path_id("Artist", &artist_id)?;
    let artist = services::get_artist_detail(&app_state.db_pool, artist_id, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {artist_id} not found")))?;
    let mut ctx = Context::new();
    ctx.insert("artist", &artist);
    app_state.render_page(jar, "pages/show_artist.html", ctx)
}

async fn create_artist_form_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
) -> Result<Page, AppError> {
    app_state.render_page(jar, "forms/new_artist.html", form_context(&ArtistForm::default()))
}

async fn create_artist_submission_handler(
    State(app_state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<ArtistForm>,
) -> (CookieJar, Redirect) {
    let outcome = match form.validate() {
        Ok(input) => services::create_artist(&app_state.db_pool, input).await,
        Err(errors) => Err(errors.into()),
    };

    let jar = match outcome {
        Ok(artist) => {
            info!(artist_id = artist.id, name = %artist.name, "Artist created.");
            flash::push(jar, FlashMessage::success(format!("Artist {} was successfully listed!", artist.name)))
        }
        Err(e) => {
            log_write_failure("create_artist", &e);
            flash::push(
                jar,
                FlashMessage::error(format!("An error occurred. Artist {} could not be listed.", form.name.trim())),
            )
        }
    };
    (jar, Redirect::to("/"))
}

async fn edit_artist_form_handler(
    State(app_state): State<Arc<AppState>>,
    Path(artist_id): Path<String>,
    jar: CookieJar,
) -> Result<Page, AppError> {
    let artist_id = parse_path_id("Artist", &artist_id)?;
    let artist = services::get_artist(&app_state.db_pool, artist_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Artist {artist_id} not found")))?;
    let mut ctx = form_context(&ArtistForm::from(&artist));
    ctx.insert("artist", &artist);
    app_state.render_page(jar, "forms/edit_artist.html", ctx)
}

async fn edit_artist_submission_handler(
    State(app_state): State<Arc<AppState>>,
    Path(artist_id): Path<String>,
    jar: CookieJar,
    Form(form): Form<ArtistForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let artist_id = parse_path_id("Artist", &artist_id)?;
    let outcome = match form.validate() {
        Ok(input) => services::update_artist(&app_state.db_pool, artist_id, input).await,
        Err(errors) => Err(errors.into()),
    };

    let jar = match outcome {
        Ok(artist) => {
            info!(artist_id, "Artist updated.");
            flash::push(jar, FlashMessage::success(format!("Artist {} was successfully updated!", artist.name)))
        }
        Err(AppError::NotFound(msg)) => return Err(AppError::NotFound(msg)),
        Err(e) => {
            log_write_failure("update_artist", &e);
            flash::push(
                jar,
                FlashMessage::error(format!("An error occurred. Artist {} could not be updated.", form.name.trim())),
            )
        }
    };
    Ok((jar, Redirect::to(&format!("/artists/{artist_id}"))))
}

// --- Router ---

pub fn create_artist_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/artists", get(list_artists_handler))
        .route("/artists/search", post(search_artists_handler))
        .route("/artists/create", get(create_artist_form_handler).post(create_artist_submission_handler))
        .route("/artists/{artist_id}", get(show_artist_handler))
        .route("/artists/{artist_id}/edit", get(edit_artist_form_handler).post(edit_artist_submission_handler))
}
