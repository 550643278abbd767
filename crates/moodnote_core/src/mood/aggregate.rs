//! Mood statistics over note collections.
//!
//! # Invariants
//! - Counts sum to the number of input notes.
//! - At most one entry per mood, in first-discovery order.

use crate::model::mood::Mood;
use crate::model::note::Note;
use serde::Serialize;

/// Number of notes carrying one mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: usize,
}

/// Dashboard read-model derived from the full note list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoodSummary {
    pub total: usize,
    pub counts: Vec<MoodCount>,
    /// Most frequent mood; ties resolve to the first discovered.
    pub dominant: Option<Mood>,
}

/// Counts notes per mood.
pub fn aggregate(notes: &[Note]) -> Vec<MoodCount> {
    let mut counts: Vec<MoodCount> = Vec::new();
    for note in notes {
        match counts.iter_mut().find(|entry| entry.mood == note.mood) {
            Some(entry) => entry.count += 1,
            None => counts.push(MoodCount {
                mood: note.mood,
                count: 1,
            }),
        }
    }
    counts
}

/// Builds the dashboard summary for `notes`.
pub fn summarize(notes: &[Note]) -> MoodSummary {
    let counts = aggregate(notes);
    let dominant = counts
        .iter()
        .fold(None::<MoodCount>, |best, entry| match best {
            Some(current) if current.count >= entry.count => Some(current),
            _ => Some(*entry),
        })
        .map(|entry| entry.mood);

    MoodSummary {
        total: notes.len(),
        counts,
        dominant,
    }
}
