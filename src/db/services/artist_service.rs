use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder,
};

use super::guarded_write;
use super::show_service::{ShowWindow, get_artist_shows};
use crate::db::entities::artist;
use crate::db::entities::prelude::Artist;
use crate::db::genres;
use crate::db::models::{ArtistDetail, ArtistListing};
use crate::web::error::AppError;
use crate::web::models::ArtistInput;

pub async fn create_artist(db: &DatabaseConnection, input: ArtistInput) -> Result<artist::Model, AppError> {
    guarded_write(db, move |txn| {
        Box::pin(async move { Ok(input.into_active_model().insert(txn).await?) })
    })
    .await
}

/// Overwrites every mutable field of an existing artist. Other rows are
/// left untouched.
pub async fn update_artist(
    db: &DatabaseConnection,
    artist_id: i32,
    input: ArtistInput,
) -> Result<artist::Model, AppError> {
    guarded_write(db, move |txn| {
        Box::pin(async move {
            let existing = Artist::find_by_id(artist_id)
                .one(txn)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Artist {artist_id} not found")))?;
            let mut active: artist::ActiveModel = existing.into();
            input.apply(&mut active);
            Ok(active.update(txn).await?)
        })
    })
    .await
}

pub async fn get_artist(db: &DatabaseConnection, artist_id: i32) -> Result<Option<artist::Model>, DbErr> {
    Artist::find_by_id(artist_id).one(db).await
}

pub async fn count_artists(db: &DatabaseConnection) -> Result<u64, DbErr> {
    Artist::find().count(db).await
}

pub async fn list_artists(db: &DatabaseConnection) -> Result<Vec<ArtistListing>, DbErr> {
    let artists = Artist::find()
        .order_by_asc(artist::Column::Name)
        .all(db)
        .await?;
    Ok(artists
        .into_iter()
        .map(|a| ArtistListing { id: a.id, name: a.name })
        .collect())
}

/// Artist page data: the artist plus its shows split around `now`, each
/// resolved to the venue it plays at.
pub async fn get_artist_detail(
    db: &DatabaseConnection,
    artist_id: i32,
    now: DateTime<Utc>,
) -> Result<Option<ArtistDetail>, DbErr> {
    let Some(artist) = get_artist(db, artist_id).await? else {
        return Ok(None);
    };

    let past_shows = get_artist_shows(db, artist_id, ShowWindow::Past, now).await?;
    let upcoming_shows = get_artist_shows(db, artist_id, ShowWindow::Upcoming, now).await?;

    Ok(Some(ArtistDetail {
        id: artist.id,
        name: artist.name,
        genres: genres::split(&artist.genres),
        city: artist.city,
        state: artist.state,
        phone: artist.phone,
        website: artist.website_link,
        facebook_link: artist.facebook_link,
        seeking_venue: artist.seeking_venue,
        seeking_description: artist.seeking_description,
        image_link: artist.image_link,
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }))
}
