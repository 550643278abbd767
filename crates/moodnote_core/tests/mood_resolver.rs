mod common;

use common::{wait_until, ScriptedClassifier};
use moodnote_core::{Mood, MoodConfig, MoodResolver, MoodSource, Unavailable};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn successful_remote_answer_is_cached() {
    let remote = Arc::new(ScriptedClassifier::always(Ok(Mood::Sad)));
    let resolver = MoodResolver::new(remote.clone());

    let first = resolver.resolve_with_source("rainy monday").await;
    let second = resolver.resolve_with_source("rainy monday").await;

    assert_eq!(first, (Mood::Sad, MoodSource::Remote));
    assert_eq!(second, (Mood::Sad, MoodSource::Cache));
    assert_eq!(remote.calls(), 1);
    assert_eq!(resolver.cached_entries(), 1);
}

#[tokio::test]
async fn cache_keys_are_exact_text() {
    let remote = Arc::new(ScriptedClassifier::always(Ok(Mood::Neutral)));
    let resolver = MoodResolver::new(remote.clone());

    resolver.resolve("Hello").await;
    resolver.resolve("hello").await;
    resolver.resolve("Hello ").await;

    assert_eq!(remote.calls(), 3);
}

#[tokio::test]
async fn unavailable_remote_falls_back_without_caching() {
    let remote = Arc::new(ScriptedClassifier::unavailable());
    let resolver = MoodResolver::new(remote.clone());
    let text = "I am so happy and excited today!";

    let first = resolver.resolve_with_source(text).await;
    let second = resolver.resolve_with_source(text).await;

    assert_eq!(first, (Mood::Happy, MoodSource::Fallback));
    assert_eq!(second, (Mood::Happy, MoodSource::Fallback));
    assert_eq!(remote.calls(), 2);
    assert_eq!(resolver.cached_entries(), 0);
}

#[tokio::test]
async fn remote_recovery_replaces_fallback_answer() {
    let remote = Arc::new(
        ScriptedClassifier::always(Ok(Mood::Love))
            .then(Duration::ZERO, Err(Unavailable::Timeout)),
    );
    let resolver = MoodResolver::new(remote.clone());
    let text = "dinner with an old friend";

    assert_eq!(resolver.resolve(text).await, Mood::Neutral);
    assert_eq!(resolver.resolve(text).await, Mood::Love);
    assert_eq!(resolver.resolve(text).await, Mood::Love);
    assert_eq!(remote.calls(), 2);
}

#[tokio::test]
async fn failed_call_prefers_answer_cached_by_concurrent_resolution() {
    let remote = Arc::new(
        ScriptedClassifier::unavailable()
            .then(Duration::from_millis(100), Ok(Mood::Sad))
            .then(Duration::from_millis(300), Err(Unavailable::Status(500))),
    );
    let resolver = Arc::new(MoodResolver::new(remote.clone()));
    let text = "happy words, sad model";

    let first = resolver.resolve_in_background(text);
    assert!(wait_until(|| remote.calls() == 1).await);
    let second = {
        let resolver = Arc::clone(&resolver);
        tokio::spawn(async move { resolver.resolve_with_source(text).await })
    };

    assert_eq!(first.await.unwrap(), Mood::Sad);
    assert_eq!(second.await.unwrap(), (Mood::Sad, MoodSource::Cache));
    assert_eq!(remote.calls(), 2);
}

#[tokio::test]
async fn abandoned_background_resolution_still_populates_cache() {
    let remote = Arc::new(
        ScriptedClassifier::unavailable().then(Duration::from_millis(30), Ok(Mood::Surprise)),
    );
    let resolver = Arc::new(MoodResolver::new(remote.clone()));

    drop(resolver.resolve_in_background("plot twist"));

    assert!(wait_until(|| resolver.cached_entries() == 1).await);
    assert_eq!(
        resolver.resolve_with_source("plot twist").await,
        (Mood::Surprise, MoodSource::Cache)
    );
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn resolver_without_token_uses_keyword_classifier() {
    let config = MoodConfig::default();
    assert!(!config.remote_enabled());
    let resolver = MoodResolver::from_config(&config).unwrap();

    let (mood, source) = resolver.resolve_with_source("I hate traffic").await;

    assert_eq!(mood, Mood::Angry);
    assert_eq!(source, MoodSource::Fallback);
    assert_eq!(resolver.cached_entries(), 0);
}
