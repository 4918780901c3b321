use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, QuerySelect};

use super::show_service::{ShowOwner, count_upcoming_shows};
use crate::db::entities::prelude::{Artist, Venue};
use crate::db::entities::{artist, venue};
use crate::db::models::{EntitySummary, SearchResults};

/// Keeps the `(id, name)` rows whose name contains `term`, ignoring case.
///
/// Folding happens here with Unicode lowercasing on both sides. SQLite's
/// `LOWER` only folds ASCII, so an SQL-side filter would miss names such
/// as "Électrique". The term is matched literally.
fn filter_by_name(rows: Vec<(i32, String)>, term: &str) -> Vec<(i32, String)> {
    let needle = term.to_lowercase();
    rows.into_iter()
        .filter(|(_, name)| name.to_lowercase().contains(&needle))
        .collect()
}

async fn summarize(
    db: &DatabaseConnection,
    hits: Vec<(i32, String)>,
    owner: fn(i32) -> ShowOwner,
    now: DateTime<Utc>,
) -> Result<SearchResults, DbErr> {
    let mut data = Vec::with_capacity(hits.len());
    for (id, name) in hits {
        let num_upcoming_shows = count_upcoming_shows(db, owner(id), now).await?;
        data.push(EntitySummary { id, name, num_upcoming_shows });
    }
    Ok(SearchResults { count: data.len(), data })
}

/// Case-insensitive substring search over venue names. An empty term
/// matches every venue.
pub async fn search_venues(
    db: &DatabaseConnection,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults, DbErr> {
    let rows: Vec<(i32, String)> = Venue::find()
        .select_only()
        .column(venue::Column::Id)
        .column(venue::Column::Name)
        .order_by_asc(venue::Column::Name)
        .into_tuple()
        .all(db)
        .await?;
    let hits = filter_by_name(rows, term);
    summarize(db, hits, ShowOwner::Venue, now).await
}

/// Case-insensitive substring search over artist names.
pub async fn search_artists(
    db: &DatabaseConnection,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchResults, DbErr> {
    let rows: Vec<(i32, String)> = Artist::find()
        .select_only()
        .column(artist::Column::Id)
        .column(artist::Column::Name)
        .order_by_asc(artist::Column::Name)
        .into_tuple()
        .all(db)
        .await?;
    let hits = filter_by_name(rows, term);
    summarize(db, hits, ShowOwner::Artist, now).await
}
