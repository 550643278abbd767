//! Remote sentiment classifier.
//!
//! # Responsibility
//! - Call the hosted sentiment endpoint with a bearer credential.
//! - Map the provider's label vocabulary onto `Mood`.
//! - Report every failure as an `Unavailable` value instead of an error.
//!
//! # Invariants
//! - One attempt per call; no retries.
//! - Timeouts are reported as `Unavailable::Timeout`.
//! - Request text and credential are never logged.

use crate::config::{normalize_endpoint, ConfigError};
use crate::model::mood::Mood;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Reason a remote classification produced no answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    /// No credential configured; remote calls are skipped.
    Disabled,
    Timeout,
    Transport(String),
    /// Non-success HTTP status.
    Status(u16),
    Malformed(String),
    EmptyResult,
    /// Provider label has no counterpart in `Mood`.
    UnmappedLabel(String),
}

impl Unavailable {
    /// Short stable code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Timeout => "timeout",
            Self::Transport(_) => "transport",
            Self::Status(_) => "status",
            Self::Malformed(_) => "malformed",
            Self::EmptyResult => "empty_result",
            Self::UnmappedLabel(_) => "unmapped_label",
        }
    }
}

impl Display for Unavailable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disabled => write!(f, "remote classifier is disabled"),
            Self::Timeout => write!(f, "remote classifier timed out"),
            Self::Transport(message) => write!(f, "remote classifier transport error: {message}"),
            Self::Status(code) => write!(f, "remote classifier returned status {code}"),
            Self::Malformed(message) => {
                write!(f, "remote classifier returned malformed payload: {message}")
            }
            Self::EmptyResult => write!(f, "remote classifier returned no labels"),
            Self::UnmappedLabel(label) => {
                write!(f, "remote classifier label `{label}` has no mood mapping")
            }
        }
    }
}

impl Error for Unavailable {}

/// Asynchronous text → mood classifier.
#[async_trait]
pub trait MoodClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Mood, Unavailable>;
}

/// Classifier used when no credential is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineClassifier;

#[async_trait]
impl MoodClassifier for OfflineClassifier {
    async fn classify(&self, _text: &str) -> Result<Mood, Unavailable> {
        Err(Unavailable::Disabled)
    }
}

#[derive(Debug, Serialize)]
struct SentimentRequest<'a> {
    inputs: &'a str,
}

/// One ranked provider label.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SentimentScore {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SentimentPayload {
    Flat(Vec<SentimentScore>),
    Nested(Vec<Vec<SentimentScore>>),
}

impl SentimentPayload {
    fn into_scores(self) -> Vec<SentimentScore> {
        match self {
            Self::Flat(scores) => scores,
            Self::Nested(batches) => batches.into_iter().next().unwrap_or_default(),
        }
    }
}

/// HTTP classifier for hosted sentiment models.
pub struct HttpMoodClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_token: String,
}

impl HttpMoodClassifier {
    /// Builds a classifier with a per-request `timeout`.
    pub fn try_new(
        endpoint: &str,
        api_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let endpoint = normalize_endpoint(endpoint)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ConfigError::HttpClient(err.to_string()))?;
        Ok(Self {
            client,
            endpoint,
            api_token: api_token.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MoodClassifier for HttpMoodClassifier {
    async fn classify(&self, text: &str) -> Result<Mood, Unavailable> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_token)
            .json(&SentimentRequest { inputs: text })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Unavailable::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        let payload: SentimentPayload = serde_json::from_slice(&body)
            .map_err(|err| Unavailable::Malformed(err.to_string()))?;
        let top = pick_top_label(payload.into_scores()).ok_or(Unavailable::EmptyResult)?;
        let label = top.label.to_lowercase();
        debug!(
            "event=remote_classify module=mood status=ok label={} score={:.3}",
            label, top.score
        );

        map_provider_label(&label).ok_or(Unavailable::UnmappedLabel(label))
    }
}

/// Returns the highest-score entry; ties keep the earliest entry.
pub fn pick_top_label(scores: Vec<SentimentScore>) -> Option<SentimentScore> {
    scores.into_iter().reduce(|best, candidate| {
        if candidate.score.total_cmp(&best.score).is_gt() {
            candidate
        } else {
            best
        }
    })
}

/// Maps a provider label onto the closed mood vocabulary.
///
/// Covers polarity models (`positive`/`negative`/`neutral`), emotion models
/// (`joy`, `sadness`, `anger`, ...) and the mood names themselves.
pub fn map_provider_label(label: &str) -> Option<Mood> {
    match label.trim().to_lowercase().as_str() {
        "positive" | "joy" | "happy" | "happiness" => Some(Mood::Happy),
        "negative" | "sadness" | "sad" => Some(Mood::Sad),
        "anger" | "angry" => Some(Mood::Angry),
        "love" => Some(Mood::Love),
        "fear" => Some(Mood::Fear),
        "surprise" => Some(Mood::Surprise),
        "neutral" => Some(Mood::Neutral),
        _ => None,
    }
}

fn map_transport_error(err: reqwest::Error) -> Unavailable {
    if err.is_timeout() {
        Unavailable::Timeout
    } else {
        Unavailable::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{map_provider_label, pick_top_label, SentimentPayload, SentimentScore};
    use crate::model::mood::Mood;

    fn score(label: &str, score: f64) -> SentimentScore {
        SentimentScore {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn top_label_is_highest_score_regardless_of_order() {
        let top = pick_top_label(vec![
            score("neutral", 0.2),
            score("positive", 0.7),
            score("negative", 0.1),
        ])
        .unwrap();
        assert_eq!(top.label, "positive");
    }

    #[test]
    fn top_label_of_empty_list_is_none() {
        assert!(pick_top_label(Vec::new()).is_none());
    }

    #[test]
    fn provider_labels_map_onto_moods() {
        assert_eq!(map_provider_label("POSITIVE"), Some(Mood::Happy));
        assert_eq!(map_provider_label("negative"), Some(Mood::Sad));
        assert_eq!(map_provider_label("anger"), Some(Mood::Angry));
        assert_eq!(map_provider_label("neutral"), Some(Mood::Neutral));
        assert_eq!(map_provider_label("LABEL_1"), None);
    }

    #[test]
    fn nested_payload_uses_first_batch() {
        let payload: SentimentPayload =
            serde_json::from_str(r#"[[{"label":"negative","score":0.9}]]"#).unwrap();
        let scores = payload.into_scores();
        assert_eq!(scores, vec![score("negative", 0.9)]);
    }
}
