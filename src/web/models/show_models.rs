use chrono::{DateTime, NaiveDateTime, Utc};
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use super::ValidationErrors;
use crate::db::{entities::show, models::START_TIME_FORMAT};

const ACCEPTED_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowInput {
    pub artist_id: i32,
    pub venue_id: i32,
    pub start_time: DateTime<Utc>,
}

impl ShowForm {
    pub fn with_default_start(now: DateTime<Utc>) -> Self {
        ShowForm {
            start_time: now.format(START_TIME_FORMAT).to_string(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<ShowInput, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let artist_id = parse_id(&mut errors, "artist_id", &self.artist_id);
        let venue_id = parse_id(&mut errors, "venue_id", &self.venue_id);
        let start_time = parse_start_time(&self.start_time);
        if start_time.is_none() {
            errors.push("start_time", "Expected a date and time like 2035-04-01 20:00:00.");
        }

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => {
                Ok(ShowInput { artist_id, venue_id, start_time })
            }
            _ => Err(errors),
        }
    }
}

impl ShowInput {
    pub fn into_active_model(self) -> show::ActiveModel {
        show::ActiveModel {
            artist_id: Set(self.artist_id),
            venue_id: Set(self.venue_id),
            start_time: Set(self.start_time),
            ..Default::default()
        }
    }
}

fn parse_id(errors: &mut ValidationErrors, field: &'static str, raw: &str) -> Option<i32> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.push(field, "Expected a positive numeric id.");
            None
        }
    }
}

/// Naive timestamps are taken as UTC.
pub fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ACCEPTED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}
