//! Reactive note list feed.
//!
//! # Invariants
//! - Receivers always observe the latest full collection.
//! - Publishing never fails, with or without live receivers.

use crate::model::note::Note;
use std::sync::Arc;
use tokio::sync::watch;

/// Broadcasts the current note collection after every change.
#[derive(Clone)]
pub struct NoteFeed {
    sender: Arc<watch::Sender<Vec<Note>>>,
}

impl NoteFeed {
    pub fn new(initial: Vec<Note>) -> Self {
        let (sender, _receiver) = watch::channel(initial);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Returns a receiver primed with the current collection.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Note>> {
        self.sender.subscribe()
    }

    pub fn publish(&self, notes: Vec<Note>) {
        self.sender.send_replace(notes);
    }

    pub fn current(&self) -> Vec<Note> {
        self.sender.borrow().clone()
    }
}

impl Default for NoteFeed {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}
