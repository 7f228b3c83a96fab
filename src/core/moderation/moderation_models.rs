// Moderation domain models - request, classifier output and verdict.
//
// These are pure domain types with no HTTP dependencies.
// The http layer converts them to and from its wire format.

use serde::{Deserialize, Serialize};

/// Where the text being moderated is going to be published.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Post,
    Comment,
    Message,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Post => write!(f, "post"),
            ContentType::Comment => write!(f, "comment"),
            ContentType::Message => write!(f, "message"),
        }
    }
}

/// A piece of user text submitted for moderation.
#[derive(Debug, Clone, Deserialize)]
pub struct ModerationRequest {
    pub text: String,
    #[serde(default)]
    pub content_type: ContentType,
}

impl ModerationRequest {
    #[allow(dead_code)]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            content_type: ContentType::default(),
        }
    }
}

/// Which decision branch the process has been pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStrategy {
    /// Keyword denylist, used when no classifier could be installed
    Fallback,
    /// Thresholded multi-label scores from an external classifier
    Classifier,
}

impl std::fmt::Display for ModerationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModerationStrategy::Fallback => write!(f, "fallback"),
            ModerationStrategy::Classifier => write!(f, "classifier"),
        }
    }
}

/// Why a classifier response was refused at the boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidClassification {
    #[error("classifier returned no labels")]
    Empty,
    #[error("classifier returned {labels} labels but {scores} scores")]
    LengthMismatch { labels: usize, scores: usize },
    #[error("score for label '{label}' is not a finite number")]
    NonFiniteScore { label: String },
    #[error("score {score} for label '{label}' is outside 0..=1")]
    ScoreOutOfRange { label: String, score: f64 },
}

/// Index-aligned labels and scores returned by a multi-label classifier.
///
/// Scores are independent probabilities and are not required to sum to 1.
/// The only way to build one is [`ClassificationResult::new`], so every value
/// that reaches the policy has matching lengths and scores within `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    labels: Vec<String>,
    scores: Vec<f64>,
}

impl ClassificationResult {
    pub fn new(labels: Vec<String>, scores: Vec<f64>) -> Result<Self, InvalidClassification> {
        if labels.len() != scores.len() {
            return Err(InvalidClassification::LengthMismatch {
                labels: labels.len(),
                scores: scores.len(),
            });
        }
        if labels.is_empty() {
            return Err(InvalidClassification::Empty);
        }
        if let Some((label, _)) = labels.iter().zip(&scores).find(|(_, s)| !s.is_finite()) {
            return Err(InvalidClassification::NonFiniteScore {
                label: label.clone(),
            });
        }
        if let Some((label, score)) = labels
            .iter()
            .zip(&scores)
            .find(|(_, s)| !(0.0..=1.0).contains(*s))
        {
            return Err(InvalidClassification::ScoreOutOfRange {
                label: label.clone(),
                score: *score,
            });
        }

        Ok(Self { labels, scores })
    }

    #[allow(dead_code)]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[allow(dead_code)]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// `(label, score)` pairs in the order the classifier returned them.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }

    /// Highest score across every label, including "safe".
    pub fn max_score(&self) -> f64 {
        self.scores.iter().copied().fold(f64::MIN, f64::max)
    }
}

/// Outcome of moderating a piece of text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModerationVerdict {
    pub is_approved: bool,
    /// Raised flags, in the order they were raised
    pub flags: Vec<String>,
    pub confidence: f64,
    pub suggestion: Option<String>,
}
