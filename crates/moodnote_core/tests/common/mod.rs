#![allow(dead_code)]

use async_trait::async_trait;
use moodnote_core::{Mood, MoodClassifier, Unavailable};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Classifier answering from a script; repeats `fallback` once the script
/// is exhausted.
pub struct ScriptedClassifier {
    script: Mutex<VecDeque<(Duration, Result<Mood, Unavailable>)>>,
    fallback: Result<Mood, Unavailable>,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    pub fn always(result: Result<Mood, Unavailable>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: result,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self::always(Err(Unavailable::Status(503)))
    }

    pub fn then(self, delay: Duration, result: Result<Mood, Unavailable>) -> Self {
        self.script.lock().unwrap().push_back((delay, result));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MoodClassifier for ScriptedClassifier {
    async fn classify(&self, _text: &str) -> Result<Mood, Unavailable> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some((delay, result)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                result
            }
            None => self.fallback.clone(),
        }
    }
}

/// Polls `condition` until it holds or two seconds pass.
pub async fn wait_until(condition: impl Fn() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
