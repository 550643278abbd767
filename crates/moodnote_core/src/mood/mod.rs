//! Mood detection pipeline.
//!
//! # Responsibility
//! - Turn free-form text into a `Mood` label.
//! - Prefer the remote classifier, degrade to the keyword classifier.
//! - Avoid repeated remote calls for text already classified remotely.
//! - Derive per-mood statistics from note collections.
//!
//! # Invariants
//! - Resolution never fails; it always yields a closed-set label.
//! - Only remote answers are cached.

pub mod aggregate;
pub mod cache;
pub mod local;
pub mod remote;
pub mod resolver;
