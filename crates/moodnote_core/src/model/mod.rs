//! Domain model for notes and mood labels.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the mood vocabulary closed so every persisted note carries a
//!   known label.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - `Mood` is the only representation of a mood label inside core.

pub mod mood;
pub mod note;
