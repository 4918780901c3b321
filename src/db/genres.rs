//! Genre tags are persisted as one comma-joined column.

pub const SEPARATOR: char = ',';

/// Genres offered on the venue and artist forms.
pub const GENRE_CHOICES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Swing",
    "Other",
];

pub fn is_known(tag: &str) -> bool {
    GENRE_CHOICES.contains(&tag)
}

pub fn join<S: AsRef<str>>(tags: &[S]) -> String {
    tags.iter()
        .map(|t| t.as_ref().trim())
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}

/// Splits a stored genre column back into tags. Surrounding whitespace is
/// dropped so rows written as `"Jazz, Blues"` read the same as `"Jazz,Blues"`.
pub fn split(stored: &str) -> Vec<String> {
    stored
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_then_split_keeps_tags() {
        let tags = vec!["Jazz".to_string(), "Blues".to_string()];
        let stored = join(&tags);
        assert_eq!(stored, "Jazz,Blues");
        assert_eq!(split(&stored), tags);
    }

    #[test]
    fn test_split_tolerates_spaced_separator() {
        assert_eq!(split("Rock n Roll, Jazz"), vec!["Rock n Roll", "Jazz"]);
    }

    #[test]
    fn test_split_empty_column() {
        assert!(split("").is_empty());
    }

    #[test]
    fn test_no_choice_contains_separator() {
        assert!(GENRE_CHOICES.iter().all(|g| !g.contains(SEPARATOR)));
    }
}
