//! Keyword-based mood classifier.
//!
//! # Responsibility
//! - Provide a deterministic, offline fallback for mood detection.
//!
//! # Invariants
//! - Rules are evaluated in table order; the first matching label wins.
//! - No match resolves to `Mood::Neutral`.

use crate::model::mood::Mood;

const MOOD_KEYWORDS: &[(Mood, &[&str])] = &[
    (
        Mood::Happy,
        &["happy", "joy", "excited", "great", "wonderful", "amazing"],
    ),
    (Mood::Sad, &["sad", "depressed", "unhappy", "terrible", "awful"]),
    (Mood::Angry, &["angry", "mad", "furious", "hate", "annoyed"]),
    (Mood::Love, &["love", "adore", "passion"]),
    (Mood::Fear, &["fear", "scared", "afraid"]),
    (Mood::Surprise, &["surprise", "shocked", "wow"]),
];

/// Pure keyword classifier. Case-insensitive substring matching.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMoodClassifier;

impl LocalMoodClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classifies `text`; total and deterministic.
    pub fn classify(&self, text: &str) -> Mood {
        let lowered = text.to_lowercase();
        MOOD_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(*kw)))
            .map_or(Mood::Neutral, |(mood, _)| *mood)
    }
}
