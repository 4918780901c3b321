use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub mod artist_models;
pub mod show_models;
pub mod venue_models;

pub use artist_models::{ArtistForm, ArtistInput};
pub use show_models::{ShowForm, ShowInput};
pub use venue_models::{VenueForm, VenueInput};

pub const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{3}-?\d{3}-?\d{4}$").expect("phone pattern is valid"));
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every problem found while validating one submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError { field, message: message.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.field)
    }

    /// `Ok(value)` when nothing was recorded, otherwise the collected errors.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Search box submission shared by the venue and artist search pages.
#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: Option<String>,
}

impl SearchForm {
    pub fn term(&self) -> &str {
        self.search_term.as_deref().unwrap_or("")
    }
}

pub(crate) fn required(errors: &mut ValidationErrors, field: &'static str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.push(field, "This field is required.");
    }
    value.to_string()
}

/// Blank text becomes `None`.
pub(crate) fn optional(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

pub(crate) fn check_state(errors: &mut ValidationErrors, state: &str) {
    if !state.is_empty() && !US_STATES.contains(&state) {
        errors.push("state", format!("'{state}' is not a valid state."));
    }
}

pub(crate) fn check_phone(errors: &mut ValidationErrors, phone: Option<&str>) {
    if let Some(phone) = phone {
        if !PHONE_RE.is_match(phone) {
            errors.push("phone", "Phone number must look like xxx-xxx-xxxx.");
        }
    }
}

pub(crate) fn check_link(errors: &mut ValidationErrors, field: &'static str, link: Option<&str>) {
    if let Some(link) = link {
        if !URL_RE.is_match(link) {
            errors.push(field, "Invalid URL.");
        }
    }
}

/// Trimmed, de-duplicated tags in submission order.
pub(crate) fn check_genres(errors: &mut ValidationErrors, genres: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(genres.len());
    for tag in genres.iter().map(|g| g.trim()).filter(|g| !g.is_empty()) {
        if !tags.iter().any(|seen| seen == tag) {
            tags.push(tag.to_string());
        }
    }
    if tags.is_empty() {
        errors.push("genres", "Select at least one genre.");
    }
    for tag in &tags {
        if !crate::db::genres::is_known(tag) {
            errors.push("genres", format!("'{tag}' is not a valid genre."));
        }
    }
    tags
}

/// HTML checkboxes are either absent or carry a value; `false`-like values
/// still count as unchecked.
pub(crate) fn checkbox(value: Option<&str>) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => false,
        Some(v) => !matches!(v.as_str(), "" | "false" | "off" | "n" | "no" | "0"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkbox_values() {
        assert!(checkbox(Some("y")));
        assert!(checkbox(Some("on")));
        assert!(!checkbox(Some("false")));
        assert!(!checkbox(None));
    }

    #[test]
    fn test_phone_and_link_checks() {
        let mut errors = ValidationErrors::default();
        check_phone(&mut errors, Some("415-000-1234"));
        check_phone(&mut errors, Some("4150001234"));
        check_link(&mut errors, "website_link", Some("https://example.com/venue"));
        assert!(errors.is_empty());

        check_phone(&mut errors, Some("call me"));
        check_link(&mut errors, "facebook_link", Some("facebook.com/x"));
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["phone", "facebook_link"]);
    }

    #[test]
    fn test_unknown_genre_rejected() {
        let mut errors = ValidationErrors::default();
        let tags = check_genres(&mut errors, &["Jazz".into(), "Polka, Ska".into()]);
        assert_eq!(tags.len(), 2);
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["genres"]);
    }

    #[test]
    fn test_duplicate_genres_collapse_in_order() {
        let mut errors = ValidationErrors::default();
        let submitted: Vec<String> = vec!["Jazz".into(), "Blues".into(), " Jazz ".into(), "Blues".into()];
        let tags = check_genres(&mut errors, &submitted);
        assert!(errors.is_empty());
        assert_eq!(tags, vec!["Jazz", "Blues"]);
    }

    #[test]
    fn test_search_term_defaults_to_empty() {
        assert_eq!(SearchForm::default().term(), "");
    }
}
