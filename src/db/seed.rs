//! Sample directory used by `--seed` and by the tests.

use sea_orm::{ActiveModelTrait, DatabaseConnection};
use tracing::info;

use super::services::{count_venues, guarded_write};
use crate::web::error::AppError;
use crate::web::models::show_models::parse_start_time;
use crate::web::models::{ArtistInput, ShowInput, ValidationErrors, VenueInput};

/// Ids of the seeded rows, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct SeededIds {
    pub venues: Vec<i32>,
    pub artists: Vec<i32>,
    pub shows: Vec<i32>,
}

fn sample_venues() -> Vec<VenueInput> {
    vec![
        VenueInput {
            name: "The Musical Hop".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "1015 Folsom Street".into(),
            phone: Some("123-123-1234".into()),
            image_link: Some("https://images.unsplash.com/photo-1543900694-133f37abaaa5?w=400".into()),
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".into()),
            website_link: Some("https://www.themusicalhop.com".into()),
            genres: vec!["Jazz".into(), "Reggae".into(), "Swing".into(), "Classical".into(), "Folk".into()],
            seeking_talent: true,
            seeking_description: Some(
                "We are on the lookout for a local artist to play every two weeks. Please call us.".into(),
            ),
        },
        VenueInput {
            name: "The Dueling Pianos Bar".into(),
            city: "New York".into(),
            state: "NY".into(),
            address: "335 Delancey Street".into(),
            phone: Some("914-003-1132".into()),
            image_link: Some("https://images.unsplash.com/photo-1497032205916-ac775f0649ae?w=750".into()),
            facebook_link: Some("https://www.facebook.com/theduelingpianos".into()),
            website_link: Some("https://www.theduelingpianos.com".into()),
            genres: vec!["Classical".into(), "R&B".into(), "Hip-Hop".into()],
            seeking_talent: false,
            seeking_description: None,
        },
        VenueInput {
            name: "Park Square Live Music & Coffee".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            address: "34 Whiskey Moore Ave".into(),
            phone: Some("415-000-1234".into()),
            image_link: Some("https://images.unsplash.com/photo-1485686531765-ba63b07845a7?w=747".into()),
            facebook_link: Some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee".into()),
            website_link: Some("https://www.parksquarelivemusicandcoffee.com".into()),
            genres: vec!["Rock n Roll".into(), "Jazz".into(), "Classical".into(), "Folk".into()],
            seeking_talent: false,
            seeking_description: None,
        },
    ]
}

fn sample_artists() -> Vec<ArtistInput> {
    vec![
        ArtistInput {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: Some("326-123-5000".into()),
            image_link: Some("https://images.unsplash.com/photo-1549213783-8284d0336c4f?w=300".into()),
            facebook_link: Some("https://www.facebook.com/GunsNPetals".into()),
            website_link: Some("https://www.gunsnpetalsband.com".into()),
            genres: vec!["Rock n Roll".into()],
            seeking_venue: true,
            seeking_description: Some(
                "Looking for shows to perform at in the San Francisco Bay Area!".into(),
            ),
        },
        ArtistInput {
            name: "Matt Quevado".into(),
            city: "New York".into(),
            state: "NY".into(),
            phone: Some("300-400-5000".into()),
            image_link: Some("https://images.unsplash.com/photo-1495223153807-b916f75de8c5?w=334".into()),
            facebook_link: Some("https://www.facebook.com/mattquevedo923251523".into()),
            website_link: None,
            genres: vec!["Jazz".into()],
            seeking_venue: false,
            seeking_description: None,
        },
        ArtistInput {
            name: "The Wild Sax Band".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: Some("432-325-5432".into()),
            image_link: Some("https://images.unsplash.com/photo-1558369981-f9ca78462e61?w=794".into()),
            facebook_link: None,
            website_link: None,
            genres: vec!["Jazz".into(), "Classical".into()],
            seeking_venue: false,
            seeking_description: None,
        },
    ]
}

/// (venue index, artist index, start time) for the sample shows.
const SAMPLE_SHOWS: &[(usize, usize, &str)] = &[
    (0, 0, "2019-05-21 21:30:00"),
    (2, 1, "2019-06-15 23:00:00"),
    (2, 2, "2035-04-01 20:00:00"),
    (2, 2, "2035-04-08 20:00:00"),
    (2, 2, "2035-04-15 20:00:00"),
];

/// Inserts the sample venues, artists and shows in one transaction.
pub async fn seed_sample_data(db: &DatabaseConnection) -> Result<SeededIds, AppError> {
    guarded_write(db, |txn| {
        Box::pin(async move {
            let mut ids = SeededIds::default();
            for venue in sample_venues() {
                ids.venues.push(venue.into_active_model().insert(txn).await?.id);
            }
            for artist in sample_artists() {
                ids.artists.push(artist.into_active_model().insert(txn).await?.id);
            }
            for &(venue_idx, artist_idx, raw) in SAMPLE_SHOWS {
                let start_time = parse_start_time(raw).ok_or_else(|| {
                    let mut errors = ValidationErrors::default();
                    errors.push("start_time", format!("bad sample start time {raw}"));
                    AppError::Validation(errors)
                })?;
                let show = ShowInput {
                    venue_id: ids.venues[venue_idx],
                    artist_id: ids.artists[artist_idx],
                    start_time,
                };
                ids.shows.push(show.into_active_model().insert(txn).await?.id);
            }
            Ok(ids)
        })
    })
    .await
}

/// Seeds the sample directory unless venues already exist.
pub async fn seed_if_empty(db: &DatabaseConnection) -> Result<Option<SeededIds>, AppError> {
    if count_venues(db).await? > 0 {
        info!("Venues already present, skipping sample data.");
        return Ok(None);
    }
    let ids = seed_sample_data(db).await?;
    info!(
        venues = ids.venues.len(),
        artists = ids.artists.len(),
        shows = ids.shows.len(),
        "Seeded sample data."
    );
    Ok(Some(ids))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_db;
    use crate::web::models::{ArtistForm, VenueForm};

    #[test]
    fn test_sample_rows_pass_form_validation() {
        for venue in sample_venues() {
            let form = VenueForm {
                name: venue.name,
                city: venue.city,
                state: venue.state,
                address: venue.address,
                phone: venue.phone,
                image_link: venue.image_link,
                facebook_link: venue.facebook_link,
                website_link: venue.website_link,
                genres: venue.genres,
                seeking_talent: None,
                seeking_description: None,
            };
            assert!(form.validate().is_ok(), "{}", form.name);
        }
        for artist in sample_artists() {
            let form = ArtistForm {
                name: artist.name,
                city: artist.city,
                state: artist.state,
                phone: artist.phone,
                genres: artist.genres,
                ..Default::default()
            };
            assert!(form.validate().is_ok(), "{}", form.name);
        }
    }

    #[tokio::test]
    async fn test_seed_if_empty_runs_once() {
        let db = memory_db().await;
        let first = seed_if_empty(&db).await.unwrap().unwrap();
        assert_eq!(first.venues.len(), 3);
        assert_eq!(first.shows.len(), 5);
        assert!(seed_if_empty(&db).await.unwrap().is_none());
        assert_eq!(count_venues(&db).await.unwrap(), 3);
    }
}
