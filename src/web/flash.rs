//! One-shot notices carried across a redirect in a cookie and consumed by
//! the next rendered page.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: FlashLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: FlashLevel::Error, message: message.into() }
    }
}

fn read(jar: &CookieJar) -> Vec<FlashMessage> {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return Vec::new();
    };
    let decoded = match urlencoding::decode(cookie.value()) {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(error = %e, "Dropping undecodable flash cookie.");
            return Vec::new();
        }
    };
    serde_json::from_str(&decoded).unwrap_or_else(|e| {
        warn!(error = %e, "Dropping malformed flash cookie.");
        Vec::new()
    })
}

/// Queues `message` for the next rendered page.
pub fn push(jar: CookieJar, message: FlashMessage) -> CookieJar {
    let mut pending = read(&jar);
    pending.push(message);
    let value = match serde_json::to_string(&pending) {
        Ok(json) => urlencoding::encode(&json).into_owned(),
        Err(e) => {
            warn!(error = %e, "Could not serialize flash messages.");
            return jar;
        }
    };
    let cookie = Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Returns the pending messages and a jar that clears them.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<FlashMessage>) {
    let messages = read(&jar);
    if messages.is_empty() && jar.get(FLASH_COOKIE).is_none() {
        return (jar, messages);
    }
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_then_take() {
        let jar = push(CookieJar::new(), FlashMessage::success("Venue The Musical Hop was successfully listed!"));
        let jar = push(jar, FlashMessage::error("second"));

        let (jar, messages) = take(jar);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].level, FlashLevel::Success);
        assert_eq!(messages[1].message, "second");

        let (_, again) = take(jar);
        assert!(again.is_empty());
    }

    #[test]
    fn test_malformed_cookie_is_ignored() {
        let jar = CookieJar::new().add(Cookie::new(FLASH_COOKIE, "%7Bnot-json"));
        let (_, messages) = take(jar);
        assert!(messages.is_empty());
    }
}
