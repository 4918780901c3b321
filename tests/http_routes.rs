//! End-to-end tests for the HTML routes, run against a seeded in-memory
//! SQLite database.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tower::util::ServiceExt; // for `oneshot`

use stagebook::db::{self, seed::SeededIds, services};
use stagebook::web::{create_axum_router, templates::load_templates};

/// Test helper: seeded database plus the router serving it
async fn setup_app() -> (Router, DatabaseConnection, SeededIds) {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_owned());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.unwrap();
    db::ensure_schema(&db).await.unwrap();
    let ids = db::seed::seed_sample_data(&db).await.unwrap();

    let templates = Arc::new(load_templates().unwrap());
    (create_axum_router(db.clone(), templates), db, ids)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The `name=value` part of the flash cookie set by `response`.
fn flash_cookie(response: &axum::response::Response) -> String {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("flash="))
        .and_then(|v| v.split(';').next())
        .expect("response should set the flash cookie")
        .to_string()
}

/// Follows the redirect home with `cookie` and returns the rendered page.
async fn home_with_cookie(app: &Router, cookie: &str) -> String {
    let request = Request::builder()
        .method("GET")
        .uri("/")
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_text(response).await
}

// =============================================================================
// Listings and search
// =============================================================================

#[tokio::test]
async fn test_home_page_has_no_alerts_without_flash() {
    let (app, _db, _) = setup_app().await;
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("Stagebook"));
    assert!(!html.contains("class=\"alert"));
}

#[tokio::test]
async fn test_venues_page_groups_by_location() {
    let (app, _db, _) = setup_app().await;
    let response = app.oneshot(get("/venues")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("San Francisco, CA"));
    assert!(html.contains("New York, NY"));
    assert!(html.contains("The Musical Hop"));
    assert!(html.contains("The Dueling Pianos Bar"));
    // Ampersand in the venue name is escaped
    assert!(html.contains("Park Square Live Music &amp; Coffee"));
    assert_eq!(html.matches("San Francisco, CA").count(), 1);
}

#[tokio::test]
async fn test_search_venues_is_partial_and_case_insensitive() {
    let (app, _db, _) = setup_app().await;
    let response = app.oneshot(post_form("/venues/search", "search_term=hop")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Number of search results for \"hop\": 1"));
    assert!(html.contains("The Musical Hop"));
    assert!(!html.contains("Park Square"));
}

#[tokio::test]
async fn test_search_artists_counts_upcoming_shows() {
    let (app, _db, _) = setup_app().await;
    let response = app.oneshot(post_form("/artists/search", "search_term=band")).await.unwrap();
    let html = body_text(response).await;
    assert!(html.contains("Number of search results for \"band\": 1"));
    assert!(html.contains("The Wild Sax Band"));
    assert!(html.contains("3 upcoming shows"));
}

#[tokio::test]
async fn test_artists_and_shows_pages() {
    let (app, _db, _) = setup_app().await;

    let html = body_text(app.clone().oneshot(get("/artists")).await.unwrap()).await;
    assert!(html.contains("Guns N Petals"));
    assert!(html.contains("Matt Quevado"));

    let html = body_text(app.oneshot(get("/shows")).await.unwrap()).await;
    assert!(html.contains("Tuesday May, 21, 2019 at 9:30PM"));
    assert!(html.contains("Sunday April, 1, 2035 at 8:00PM"));
}

// =============================================================================
// Detail pages
// =============================================================================

#[tokio::test]
async fn test_venue_detail_splits_past_and_upcoming() {
    let (app, _db, ids) = setup_app().await;
    let response = app.oneshot(get(&format!("/venues/{}", ids.venues[2]))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("3 Upcoming Shows"));
    assert!(html.contains("1 Past Show"));
    assert!(html.contains("Matt Quevado"));
    assert!(html.contains("The Wild Sax Band"));
}

#[tokio::test]
async fn test_missing_detail_pages_are_404() {
    let (app, _db, _) = setup_app().await;
    let uris = [
        "/venues/9999",
        "/artists/9999",
        "/venues/9999/edit",
        "/artists/9999/edit",
        // Ids that are not a plain i32 get the same page
        "/venues/abc",
        "/artists/abc",
        "/venues/99999999999",
        "/artists/-1/edit",
    ];
    for uri in uris {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let html = body_text(response).await;
        assert!(html.contains("404"), "{uri}");
    }
}

#[tokio::test]
async fn test_unknown_route_renders_404_page() {
    let (app, _db, _) = setup_app().await;
    let response = app.oneshot(get("/no/such/page")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("couldn't find the page"));
}

// =============================================================================
// Writes
// =============================================================================

#[tokio::test]
async fn test_create_venue_redirects_with_success_flash() {
    let (app, db, _) = setup_app().await;
    let before = services::count_venues(&db).await.unwrap();

    let body = "name=The+Cellar&city=Austin&state=TX&address=1+Main+St&phone=512-555-0100\
                &genres=Jazz&genres=Blues&seeking_talent=y&seeking_description=Trios+welcome";
    let response = app.clone().oneshot(post_form("/venues/create", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    assert_eq!(services::count_venues(&db).await.unwrap(), before + 1);
    let html = home_with_cookie(&app, &flash_cookie(&response)).await;
    assert!(html.contains("Venue The Cellar was successfully listed!"));

    let results = services::search_venues(&db, "cellar", chrono::Utc::now()).await.unwrap();
    assert_eq!(results.count, 1);
    let created = services::get_venue(&db, results.data[0].id).await.unwrap().unwrap();
    assert_eq!(created.genres, "Jazz,Blues");
    assert!(created.seeking_talent);
}

#[tokio::test]
async fn test_repeated_genre_is_stored_once() {
    let (app, db, _) = setup_app().await;
    let body = "name=Blue+Room&city=Austin&state=TX&address=2+Main+St&genres=Jazz&genres=Jazz&genres=Soul";
    let response = app.oneshot(post_form("/venues/create", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let results = services::search_venues(&db, "Blue Room", chrono::Utc::now()).await.unwrap();
    assert_eq!(results.count, 1);
    let created = services::get_venue(&db, results.data[0].id).await.unwrap().unwrap();
    assert_eq!(created.genres, "Jazz,Soul");
}

#[tokio::test]
async fn test_invalid_venue_is_not_stored() {
    let (app, db, _) = setup_app().await;
    let before = services::count_venues(&db).await.unwrap();

    // Missing address, bad state, unknown genre
    let body = "name=Nowhere&city=Austin&state=ZZ&genres=Polka";
    let response = app.clone().oneshot(post_form("/venues/create", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(services::count_venues(&db).await.unwrap(), before);

    let html = home_with_cookie(&app, &flash_cookie(&response)).await;
    assert_eq!(html.matches("class=\"alert alert-error\"").count(), 1);
    assert!(html.contains("An error occurred. Venue Nowhere could not be listed."));
    assert!(!html.contains("alert-success"));
}

#[tokio::test]
async fn test_delete_venue_is_not_implemented() {
    let (app, db, ids) = setup_app().await;
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/venues/{}", ids.venues[0]))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    assert!(services::get_venue(&db, ids.venues[0]).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_with_malformed_id_is_404() {
    let (app, _db, _) = setup_app().await;
    let request = Request::builder()
        .method("DELETE")
        .uri("/venues/abc")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_artist_updates_only_that_artist() {
    let (app, db, ids) = setup_app().await;
    let target = ids.artists[0];

    let edit_form = body_text(app.clone().oneshot(get(&format!("/artists/{target}/edit"))).await.unwrap()).await;
    assert!(edit_form.contains("value=\"Guns N Petals\""));

    let body = "name=Guns+N+Roses&city=Los+Angeles&state=CA&phone=326-123-5000&genres=Rock+n+Roll";
    let response = app
        .clone()
        .oneshot(post_form(&format!("/artists/{target}/edit"), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], format!("/artists/{target}"));

    let updated = services::get_artist(&db, target).await.unwrap().unwrap();
    assert_eq!(updated.name, "Guns N Roses");
    assert_eq!(updated.city, "Los Angeles");
    assert!(!updated.seeking_venue);

    let untouched = services::get_artist(&db, ids.artists[1]).await.unwrap().unwrap();
    assert_eq!(untouched.name, "Matt Quevado");
}

#[tokio::test]
async fn test_edit_missing_venue_is_404() {
    let (app, _db, _) = setup_app().await;
    let body = "name=Ghost&city=Austin&state=TX&address=1+Main+St&genres=Jazz";
    let response = app.oneshot(post_form("/venues/9999/edit", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_show_with_unknown_venue_is_rejected() {
    let (app, db, ids) = setup_app().await;
    let before = services::count_shows(&db).await.unwrap();

    let body = format!("artist_id={}&venue_id=9999&start_time=2036-01-01+20%3A00%3A00", ids.artists[0]);
    let response = app.clone().oneshot(post_form("/shows/create", &body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(services::count_shows(&db).await.unwrap(), before);

    let html = home_with_cookie(&app, &flash_cookie(&response)).await;
    assert!(html.contains("An error occurred. Show could not be listed."));
}

#[tokio::test]
async fn test_create_show_lists_it() {
    let (app, db, ids) = setup_app().await;
    let before = services::count_shows(&db).await.unwrap();

    let body = format!(
        "artist_id={}&venue_id={}&start_time=2036-01-01+20%3A00%3A00",
        ids.artists[0], ids.venues[1]
    );
    let response = app.clone().oneshot(post_form("/shows/create", &body)).await.unwrap();
    assert_eq!(services::count_shows(&db).await.unwrap(), before + 1);

    let html = home_with_cookie(&app, &flash_cookie(&response)).await;
    assert!(html.contains("Show was successfully listed!"));
}
