//! Mood label vocabulary.
//!
//! # Responsibility
//! - Define the closed set of mood labels attached to notes.
//! - Provide stable string forms for storage, FFI and logs.
//!
//! # Invariants
//! - String form is always lower-case and round-trips through `FromStr`.
//! - `Mood::default()` is `Neutral`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Mood label detected from note text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Happy,
    Sad,
    Angry,
    Love,
    Fear,
    Surprise,
    /// Fallback label when nothing else matches.
    #[default]
    Neutral,
}

impl Mood {
    /// Every label, in keyword-priority order followed by `Neutral`.
    pub const ALL: [Mood; 7] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Angry,
        Mood::Love,
        Mood::Fear,
        Mood::Surprise,
        Mood::Neutral,
    ];

    /// Returns the stable lower-case label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Love => "love",
            Self::Fear => "fear",
            Self::Surprise => "surprise",
            Self::Neutral => "neutral",
        }
    }
}

impl Display for Mood {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a string is not one of the known mood labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMoodError(pub String);

impl Display for UnknownMoodError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown mood label `{}`", self.0)
    }
}

impl Error for UnknownMoodError {}

impl FromStr for Mood {
    type Err = UnknownMoodError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str() == normalized)
            .ok_or_else(|| UnknownMoodError(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Mood;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("HAPPY".parse::<Mood>().unwrap(), Mood::Happy);
        assert_eq!(" surprise ".parse::<Mood>().unwrap(), Mood::Surprise);
    }

    #[test]
    fn parse_rejects_unknown_label() {
        let err = "positive".parse::<Mood>().unwrap_err();
        assert!(err.to_string().contains("positive"));
    }

    #[test]
    fn every_label_round_trips_through_its_string_form() {
        for mood in Mood::ALL {
            assert_eq!(mood.as_str().parse::<Mood>().unwrap(), mood);
        }
    }

    #[test]
    fn serializes_as_lowercase_string() {
        let json = serde_json::to_string(&Mood::Love).unwrap();
        assert_eq!(json, "\"love\"");
    }
}
