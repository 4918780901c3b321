use sea_orm::Set;
use serde::{Deserialize, Serialize};

use super::{
    ValidationErrors, check_genres, check_link, check_phone, check_state, checkbox, optional,
    required,
};
use crate::db::{entities::venue, genres};

/// Raw venue form as submitted (and as re-rendered on the edit page).
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: Option<String>,
    pub seeking_description: Option<String>,
}

/// Validated venue fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    pub fn validate(&self) -> Result<VenueInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = required(&mut errors, "name", &self.name);
        let city = required(&mut errors, "city", &self.city);
        let state = required(&mut errors, "state", &self.state).to_ascii_uppercase();
        check_state(&mut errors, &state);
        let address = required(&mut errors, "address", &self.address);

        let phone = optional(self.phone.as_deref());
        check_phone(&mut errors, phone.as_deref());
        let image_link = optional(self.image_link.as_deref());
        check_link(&mut errors, "image_link", image_link.as_deref());
        let facebook_link = optional(self.facebook_link.as_deref());
        check_link(&mut errors, "facebook_link", facebook_link.as_deref());
        let website_link = optional(self.website_link.as_deref());
        check_link(&mut errors, "website_link", website_link.as_deref());

        let genres = check_genres(&mut errors, &self.genres);

        errors.into_result(VenueInput {
            name,
            city,
            state,
            address,
            phone,
            image_link,
            facebook_link,
            website_link,
            genres,
            seeking_talent: checkbox(self.seeking_talent.as_deref()),
            seeking_description: optional(self.seeking_description.as_deref()),
        })
    }
}

impl From<&venue::Model> for VenueForm {
    fn from(venue: &venue::Model) -> Self {
        VenueForm {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone(),
            image_link: venue.image_link.clone(),
            facebook_link: venue.facebook_link.clone(),
            website_link: venue.website_link.clone(),
            genres: genres::split(&venue.genres),
            seeking_talent: venue.seeking_talent.then(|| "y".to_string()),
            seeking_description: venue.seeking_description.clone(),
        }
    }
}

impl VenueInput {
    /// Overwrites every mutable column of `active` with this input.
    pub fn apply(self, active: &mut venue::ActiveModel) {
        active.name = Set(self.name);
        active.city = Set(self.city);
        active.state = Set(self.state);
        active.address = Set(self.address);
        active.phone = Set(self.phone);
        active.image_link = Set(self.image_link);
        active.facebook_link = Set(self.facebook_link);
        active.website_link = Set(self.website_link);
        active.genres = Set(genres::join(&self.genres));
        active.seeking_talent = Set(self.seeking_talent);
        active.seeking_description = Set(self.seeking_description);
    }

    pub fn into_active_model(self) -> venue::ActiveModel {
        let mut active = venue::ActiveModel::default();
        self.apply(&mut active);
        active
    }
}
