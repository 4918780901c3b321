use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self as axum_middleware, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tera::{Context, Tera};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::web::error::{AppError, ErrorPage};

pub mod error;
pub mod flash;
pub mod models;
pub mod routes;
pub mod templates;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: DatabaseConnection,
    pub templates: Arc<Tera>,
}

/// A rendered page plus the jar that clears the flash messages it showed.
pub type Page = (CookieJar, Html<String>);

impl AppState {
    pub fn render(&self, template: &str, ctx: &Context) -> Result<Html<String>, AppError> {
        Ok(Html(self.templates.render(template, ctx)?))
    }

    /// Renders a full page, consuming any pending flash messages.
    pub fn render_page(&self, jar: CookieJar, template: &str, mut ctx: Context) -> Result<Page, AppError> {
        let (jar, messages) = flash::take(jar);
        ctx.insert("messages", &messages);
        Ok((jar, self.render(template, &ctx)?))
    }
}

async fn home_handler(State(app_state): State<Arc<AppState>>, jar: CookieJar) -> Result<Page, AppError> {
    app_state.render_page(jar, "pages/home.html", Context::new())
}

async fn not_found_handler() -> AppError {
    AppError::NotFound("No such page".to_string())
}

/// Replaces the body of responses produced from an `AppError` with the
/// matching error page, keeping the status code.
async fn render_error_pages(
    State(app_state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let response = next.run(req).await;
    if response.extensions().get::<ErrorPage>().is_none() {
        return response;
    }

    let status = response.status();
    let template = if status == StatusCode::NOT_FOUND {
        "errors/404.html"
    } else {
        "errors/500.html"
    };
    let mut ctx = Context::new();
    ctx.insert("messages", &Vec::<flash::FlashMessage>::new());
    match app_state.templates.render(template, &ctx) {
        Ok(body) => (status, Html(body)).into_response(),
        Err(e) => {
            error!(error = ?e, template, "Failed to render error page.");
            response
        }
    }
}

pub fn create_axum_router(db_pool: DatabaseConnection, templates: Arc<Tera>) -> Router {
    let app_state = Arc::new(AppState { db_pool, templates });

    Router::new()
        .route("/", get(home_handler))
        .merge(routes::venue_routes::create_venue_router())
        .merge(routes::artist_routes::create_artist_router())
        .merge(routes::show_routes::create_show_router())
        .fallback(not_found_handler)
        .layer(axum_middleware::from_fn_with_state(app_state.clone(), render_error_pages))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
