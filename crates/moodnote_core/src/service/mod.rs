//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate mood resolution and repository calls into use-case APIs.
//! - Keep UI/FFI layers decoupled from storage and network details.

pub mod note_feed;
pub mod note_service;
