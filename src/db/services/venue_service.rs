use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

use super::guarded_write;
use super::show_service::{ShowOwner, ShowWindow, count_upcoming_shows, get_venue_shows};
use crate::db::entities::prelude::Venue;
use crate::db::entities::venue;
use crate::db::genres;
use crate::db::models::{EntitySummary, VenueArea, VenueDetail};
use crate::web::error::AppError;
use crate::web::models::VenueInput;

// --- Writes ---

/// Inserts a new venue and returns the stored row.
pub async fn create_venue(db: &DatabaseConnection, input: VenueInput) -> Result<venue::Model, AppError> {
    guarded_write(db, move |txn| {
        Box::pin(async move { Ok(input.into_active_model().insert(txn).await?) })
    })
    .await
}

/// Overwrites every mutable field of an existing venue.
pub async fn update_venue(
    db: &DatabaseConnection,
    venue_id: i32,
    input: VenueInput,
) -> Result<venue::Model, AppError> {
    guarded_write(db, move |txn| {
        Box::pin(async move {
            let existing = Venue::find_by_id(venue_id)
                .one(txn)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Venue {venue_id} not found")))?;
            let mut active: venue::ActiveModel = existing.into();
            input.apply(&mut active);
            Ok(active.update(txn).await?)
        })
    })
    .await
}

// --- Reads ---

pub async fn get_venue(db: &DatabaseConnection, venue_id: i32) -> Result<Option<venue::Model>, DbErr> {
    Venue::find_by_id(venue_id).one(db).await
}

pub async fn count_venues(db: &DatabaseConnection) -> Result<u64, DbErr> {
    Venue::find().count(db).await
}

/// Groups all venues by their (city, state) location.
///
/// Every venue appears under exactly one area; each carries the number of
/// its shows starting after `now`.
pub async fn get_venue_areas(db: &DatabaseConnection, now: DateTime<Utc>) -> Result<Vec<VenueArea>, DbErr> {
    let locations: Vec<(String, String)> = Venue::find()
        .select_only()
        .column(venue::Column::City)
        .column(venue::Column::State)
        .distinct()
        .order_by_asc(venue::Column::State)
        .order_by_asc(venue::Column::City)
        .into_tuple()
        .all(db)
        .await?;

    let mut areas = Vec::with_capacity(locations.len());
    for (city, state) in locations {
        let venues = Venue::find()
            .filter(venue::Column::City.eq(city.as_str()))
            .filter(venue::Column::State.eq(state.as_str()))
            .order_by_asc(venue::Column::Name)
            .all(db)
            .await?;

        let mut summaries = Vec::with_capacity(venues.len());
        for venue in venues {
            let num_upcoming_shows = count_upcoming_shows(db, ShowOwner::Venue(venue.id), now).await?;
            summaries.push(EntitySummary { id: venue.id, name: venue.name, num_upcoming_shows });
        }
        areas.push(VenueArea { city, state, venues: summaries });
    }
    Ok(areas)
}

/// Venue page data: the venue itself plus its shows split around `now`.
pub async fn get_venue_detail(
    db: &DatabaseConnection,
    venue_id: i32,
    now: DateTime<Utc>,
) -> Result<Option<VenueDetail>, DbErr> {
    let Some(venue) = get_venue(db, venue_id).await? else {
        return Ok(None);
    };

    let past_shows = get_venue_shows(db, venue_id, ShowWindow::Past, now).await?;
    let upcoming_shows = get_venue_shows(db, venue_id, ShowWindow::Upcoming, now).await?;

    Ok(Some(VenueDetail {
        id: venue.id,
        name: venue.name,
        genres: genres::split(&venue.genres),
        address: venue.address,
        city: venue.city,
        state: venue.state,
        phone: venue.phone,
        website: venue.website_link,
        facebook_link: venue.facebook_link,
        seeking_talent: venue.seeking_talent,
        seeking_description: venue.seeking_description,
        image_link: venue.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}
