use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, sea_query::SimpleExpr,
};
use tracing::warn;

use super::guarded_write;
use crate::db::entities::prelude::{Artist, Show, Venue};
use crate::db::entities::{artist, show};
use crate::db::models::{ArtistShow, ShowListing, VenueShow, start_time_text};
use crate::web::error::AppError;
use crate::web::models::ShowInput;

/// Which side of "now" a show falls on.
///
/// The boundary is asymmetric: a show starting exactly at the evaluation
/// instant is upcoming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowWindow {
    Past,
    Upcoming,
}

impl ShowWindow {
    pub fn classify(start_time: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if start_time < now {
            ShowWindow::Past
        } else {
            ShowWindow::Upcoming
        }
    }

    fn condition(self, now: DateTime<Utc>) -> SimpleExpr {
        match self {
            ShowWindow::Past => show::Column::StartTime.lt(now),
            ShowWindow::Upcoming => show::Column::StartTime.gte(now),
        }
    }
}

/// The entity a set of shows hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOwner {
    Venue(i32),
    Artist(i32),
}

impl ShowOwner {
    fn condition(self) -> SimpleExpr {
        match self {
            ShowOwner::Venue(id) => show::Column::VenueId.eq(id),
            ShowOwner::Artist(id) => show::Column::ArtistId.eq(id),
        }
    }
}

/// Counts shows of `owner` starting strictly after `now`.
pub async fn count_upcoming_shows<C: ConnectionTrait>(
    db: &C,
    owner: ShowOwner,
    now: DateTime<Utc>,
) -> Result<u64, DbErr> {
    Show::find()
        .filter(owner.condition())
        .filter(show::Column::StartTime.gt(now))
        .count(db)
        .await
}

/// Shows played at a venue in the given window, each resolved to its artist.
pub async fn get_venue_shows(
    db: &DatabaseConnection,
    venue_id: i32,
    window: ShowWindow,
    now: DateTime<Utc>,
) -> Result<Vec<VenueShow>, DbErr> {
    let rows = Show::find()
        .filter(ShowOwner::Venue(venue_id).condition())
        .filter(window.condition(now))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(Artist)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(show, artist)| match artist {
            Some(artist) => Some(VenueShow {
                artist_id: artist.id,
                artist_name: artist.name,
                artist_image_link: artist.image_link,
                start_time: start_time_text(&show.start_time),
            }),
            None => {
                warn!(show_id = show.id, artist_id = show.artist_id, "Show references a missing artist.");
                None
            }
        })
        .collect())
}

/// Shows an artist plays in the given window, each resolved to its venue.
pub async fn get_artist_shows(
    db: &DatabaseConnection,
    artist_id: i32,
    window: ShowWindow,
    now: DateTime<Utc>,
) -> Result<Vec<ArtistShow>, DbErr> {
    let rows = Show::find()
        .filter(ShowOwner::Artist(artist_id).condition())
        .filter(window.condition(now))
        .order_by_asc(show::Column::StartTime)
        .find_also_related(Venue)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(show, venue)| match venue {
            Some(venue) => Some(ArtistShow {
                venue_id: venue.id,
                venue_name: venue.name,
                venue_image_link: venue.image_link,
                start_time: start_time_text(&show.start_time),
            }),
            None => {
                warn!(show_id = show.id, venue_id = show.venue_id, "Show references a missing venue.");
                None
            }
        })
        .collect())
}

/// Every show with its venue and artist names resolved, earliest first.
pub async fn list_shows(db: &DatabaseConnection) -> Result<Vec<ShowListing>, DbErr> {
    let rows = Show::find()
        .order_by_asc(show::Column::StartTime)
        .find_also_related(Venue)
        .all(db)
        .await?;

    let artist_ids: Vec<i32> = rows.iter().map(|(show, _)| show.artist_id).collect();
    let artists: HashMap<i32, artist::Model> = Artist::find()
        .filter(artist::Column::Id.is_in(artist_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a))
        .collect();

    let mut listings = Vec::with_capacity(rows.len());
    for (show, venue) in rows {
        let (Some(venue), Some(artist)) = (venue, artists.get(&show.artist_id)) else {
            warn!(show_id = show.id, "Skipping show with a dangling venue or artist.");
            continue;
        };
        listings.push(ShowListing {
            venue_id: venue.id,
            venue_name: venue.name,
            artist_id: artist.id,
            artist_name: artist.name.clone(),
            artist_image_link: artist.image_link.clone(),
            start_time: start_time_text(&show.start_time),
        });
    }
    Ok(listings)
}

pub async fn create_show(db: &DatabaseConnection, input: ShowInput) -> Result<show::Model, AppError> {
    guarded_write(db, move |txn| {
        Box::pin(async move { Ok(input.into_active_model().insert(txn).await?) })
    })
    .await
}

pub async fn count_shows(db: &DatabaseConnection) -> Result<u64, DbErr> {
    Show::find().count(db).await
}
