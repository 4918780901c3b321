use std::collections::HashMap;

use chrono::NaiveDateTime;
use rust_embed::RustEmbed;
use tera::{Tera, Value};

use crate::db::models::START_TIME_FORMAT;
use crate::web::models::show_models::parse_start_time;

#[derive(RustEmbed)]
#[folder = "templates"]
struct TemplateAssets;

const MEDIUM_FORMAT: &str = "%a %m, %d, %Y %-I:%M%p";
const FULL_FORMAT: &str = "%A %B, %-d, %Y at %-I:%M%p";

/// Builds the template engine from the templates compiled into the binary.
pub fn load_templates() -> tera::Result<Tera> {
    let mut sources = Vec::new();
    for path in TemplateAssets::iter() {
        if let Some(file) = TemplateAssets::get(&path) {
            let body = String::from_utf8_lossy(&file.data).into_owned();
            sources.push((path.to_string(), body));
        }
    }

    let mut tera = Tera::default();
    tera.add_raw_templates(sources)?;
    tera.register_filter("datetime", datetime_filter);
    Ok(tera)
}

/// `{{ show.start_time | datetime(format="full") }}`; `medium` is the default.
fn datetime_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let raw = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("datetime filter expects a string"))?;
    let format = match args.get("format").and_then(Value::as_str) {
        None | Some("medium") => MEDIUM_FORMAT,
        Some("full") => FULL_FORMAT,
        Some(other) => return Err(tera::Error::msg(format!("unknown datetime format '{other}'"))),
    };

    let naive = NaiveDateTime::parse_from_str(raw, START_TIME_FORMAT)
        .ok()
        .or_else(|| parse_start_time(raw).map(|dt| dt.naive_utc()))
        .ok_or_else(|| tera::Error::msg(format!("cannot parse '{raw}' as a date")))?;
    Ok(Value::String(naive.format(format).to_string()))
}
