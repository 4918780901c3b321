use sea_orm::Set;
use serde::{Deserialize, Serialize};

use super::{
    ValidationErrors, check_genres, check_link, check_phone, check_state, checkbox, optional,
    required,
};
use crate::db::{entities::artist, genres};

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: Option<String>,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    pub fn validate(&self) -> Result<ArtistInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = required(&mut errors, "name", &self.name);
        let city = required(&mut errors, "city", &self.city);
        let state = required(&mut errors, "state", &self.state).to_ascii_uppercase();
        check_state(&mut errors, &state);

        let phone = optional(self.phone.as_deref());
        check_phone(&mut errors, phone.as_deref());
        let image_link = optional(self.image_link.as_deref());
        check_link(&mut errors, "image_link", image_link.as_deref());
        let facebook_link = optional(self.facebook_link.as_deref());
        check_link(&mut errors, "facebook_link", facebook_link.as_deref());
        let website_link = optional(self.website_link.as_deref());
        check_link(&mut errors, "website_link", website_link.as_deref());

        let genres = check_genres(&mut errors, &self.genres);

        errors.into_result(ArtistInput {
            name,
            city,
            state,
            phone,
            image_link,
            facebook_link,
            website_link,
            genres,
            seeking_venue: checkbox(self.seeking_venue.as_deref()),
            seeking_description: optional(self.seeking_description.as_deref()),
        })
    }
}

impl From<&artist::Model> for ArtistForm {
    fn from(artist: &artist::Model) -> Self {
        ArtistForm {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            image_link: artist.image_link.clone(),
            facebook_link: artist.facebook_link.clone(),
            website_link: artist.website_link.clone(),
            genres: genres::split(&artist.genres),
            seeking_venue: artist.seeking_venue.then(|| "y".to_string()),
            seeking_description: artist.seeking_description.clone(),
        }
    }
}

impl ArtistInput {
    pub fn apply(self, active: &mut artist::ActiveModel) {
        active.name = Set(self.name);
        active.city = Set(self.city);
        active.state = Set(self.state);
        active.phone = Set(self.phone);
        active.image_link = Set(self.image_link);
        active.facebook_link = Set(self.facebook_link);
        active.website_link = Set(self.website_link);
        active.genres = Set(genres::join(&self.genres));
        active.seeking_venue = Set(self.seeking_venue);
        active.seeking_description = Set(self.seeking_description);
    }

    pub fn into_active_model(self) -> artist::ActiveModel {
        let mut active = artist::ActiveModel::default();
        self.apply(&mut active);
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artist_form_validation() {
        let form = ArtistForm {
            name: "The Wild Sax Band".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: Some("432-325-5432".into()),
            genres: vec!["Jazz".into(), "Classical".into()],
            seeking_venue: Some("false".into()),
            ..Default::default()
        };
        let input = form.validate().unwrap();
        assert!(!input.seeking_venue);
        assert_eq!(input.phone.as_deref(), Some("432-325-5432"));
    }

    #[test]
    fn test_bad_state_and_missing_genres() {
        let form = ArtistForm {
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "ZZ".into(),
            ..Default::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["state", "genres"]);
    }
}
