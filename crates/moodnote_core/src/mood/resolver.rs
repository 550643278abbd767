//! Mood resolution protocol: cache → remote → local.
//!
//! # Responsibility
//! - Answer every mood request with a closed-set label.
//! - Reuse remote answers for identical text within a session.
//!
//! # Invariants
//! - Only remote answers are written into the cache.
//! - An unavailable remote never surfaces as an error to the caller.
//! - The cache is re-checked once before falling back, so a concurrent
//!   remote answer for the same text wins over the keyword fallback.

use crate::config::{ConfigError, MoodConfig};
use crate::model::mood::Mood;
use crate::mood::cache::MoodCache;
use crate::mood::local::LocalMoodClassifier;
use crate::mood::remote::{HttpMoodClassifier, MoodClassifier, OfflineClassifier};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Where a resolved mood came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodSource {
    Cache,
    Remote,
    Fallback,
}

impl MoodSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::Remote => "remote",
            Self::Fallback => "fallback",
        }
    }
}

/// Resolves text to moods using a shared cache and two classifiers.
pub struct MoodResolver {
    cache: MoodCache,
    remote: Arc<dyn MoodClassifier>,
    local: LocalMoodClassifier,
}

impl MoodResolver {
    /// Creates a resolver with an unbounded cache.
    pub fn new(remote: Arc<dyn MoodClassifier>) -> Self {
        Self::with_cache(remote, MoodCache::unbounded())
    }

    pub fn with_cache(remote: Arc<dyn MoodClassifier>, cache: MoodCache) -> Self {
        Self {
            cache,
            remote,
            local: LocalMoodClassifier::new(),
        }
    }

    /// Builds a resolver from configuration.
    ///
    /// Without a credential the remote path is an `OfflineClassifier`, so
    /// every request is answered by the keyword classifier.
    pub fn from_config(config: &MoodConfig) -> Result<Self, ConfigError> {
        let remote: Arc<dyn MoodClassifier> = match config.api_token.as_deref() {
            Some(token) => {
                let classifier =
                    HttpMoodClassifier::try_new(&config.endpoint, token, config.timeout)?;
                info!(
                    "event=mood_resolver_init module=mood status=ok remote=http timeout_ms={}",
                    config.timeout.as_millis()
                );
                Arc::new(classifier)
            }
            None => {
                info!("event=mood_resolver_init module=mood status=ok remote=offline");
                Arc::new(OfflineClassifier)
            }
        };
        let cache = match config.cache_capacity {
            Some(capacity) => MoodCache::with_capacity(capacity),
            None => MoodCache::unbounded(),
        };
        Ok(Self::with_cache(remote, cache))
    }

    /// Resolves `text` to a mood. Never fails.
    pub async fn resolve(&self, text: &str) -> Mood {
        self.resolve_with_source(text).await.0
    }

    /// Resolves `text` and reports which stage produced the answer.
    pub async fn resolve_with_source(&self, text: &str) -> (Mood, MoodSource) {
        if let Some(mood) = self.cache.get(text) {
            debug!(
                "event=mood_resolve module=mood status=ok source=cache text_len={}",
                text.len()
            );
            return (mood, MoodSource::Cache);
        }

        match self.remote.classify(text).await {
            Ok(mood) => {
                self.cache.put(text, mood);
                debug!(
                    "event=mood_resolve module=mood status=ok source=remote mood={} text_len={}",
                    mood,
                    text.len()
                );
                (mood, MoodSource::Remote)
            }
            Err(reason) => {
                warn!(
                    "event=mood_resolve module=mood status=degraded reason={} detail=\"{}\" text_len={}",
                    reason.code(),
                    reason,
                    text.len()
                );
                if let Some(mood) = self.cache.get(text) {
                    return (mood, MoodSource::Cache);
                }
                (self.local.classify(text), MoodSource::Fallback)
            }
        }
    }

    /// Runs `resolve` on a Tokio task.
    ///
    /// Dropping the handle does not cancel the task; a late remote answer
    /// still lands in the cache.
    pub fn resolve_in_background(self: &Arc<Self>, text: impl Into<String>) -> JoinHandle<Mood> {
        let resolver = Arc::clone(self);
        let text = text.into();
        tokio::spawn(async move { resolver.resolve(&text).await })
    }

    /// Number of cached remote answers.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
