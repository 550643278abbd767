//! Flutter bridge for MoodNote core.

pub mod api;
