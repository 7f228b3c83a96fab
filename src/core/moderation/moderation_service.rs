// Moderation service - owns the strategy and drives the classifier.
//
// The strategy is chosen once, in `initialize`, and never changes afterwards:
// - No classifier configured -> keyword fallback
// - Classifier configured but its warm-up call fails -> keyword fallback
// - Classifier answers the warm-up call -> classifier branch
//
// NO HTTP types here - the classifier is reached through the `ContentClassifier` port.

use super::moderation_models::{
    ClassificationResult, InvalidClassification, ModerationRequest, ModerationStrategy,
    ModerationVerdict,
};
use super::moderation_policy::{classifier_verdict, keyword_verdict, CANDIDATE_LABELS};
use async_trait::async_trait;
use thiserror::Error;

const WARM_UP_TEXT: &str = "warm-up";

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Request error: {0}")]
    Request(String),

    #[error("Classifier API error: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("Invalid classifier response: {0}")]
    InvalidResponse(#[from] InvalidClassification),

    #[error("Could not decode classifier response: {0}")]
    Decode(String),
}

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Classifier failed: {0}")]
    Classifier(#[from] ClassifierError),
}

// ============================================================================
// CLASSIFIER TRAIT (PORT)
// ============================================================================

/// A multi-label text classifier the policy can consult.
#[async_trait]
pub trait ContentClassifier: Send + Sync {
    /// Score `text` against each of `candidate_labels`.
    ///
    /// With `multi_label` set, every label gets an independent probability.
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
        multi_label: bool,
    ) -> Result<ClassificationResult, ClassifierError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

// Lets the composition root pick an implementation at runtime.
#[async_trait]
impl ContentClassifier for Box<dyn ContentClassifier> {
    async fn classify(
        &self,
        text: &str,
        candidate_labels: &[&str],
        multi_label: bool,
    ) -> Result<ClassificationResult, ClassifierError> {
        (**self).classify(text, candidate_labels, multi_label).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Moderation service pinned to a single strategy for its whole lifetime.
pub struct ModerationService<C: ContentClassifier> {
    /// `Some` only when the classifier passed its warm-up call
    classifier: Option<C>,
}

impl<C: ContentClassifier> ModerationService<C> {
    /// Build a service that never consults a classifier.
    pub fn fallback() -> Self {
        Self { classifier: None }
    }

    /// Run one warm-up call against the classifier and pin the strategy.
    ///
    /// A failed warm-up call is logged and leaves the service on the keyword fallback
    /// for good; there is no retry.
    pub async fn initialize(classifier: Option<C>) -> Self {
        let Some(classifier) = classifier else {
            tracing::info!("No classifier configured, using keyword fallback");
            return Self::fallback();
        };

        match classifier
            .classify(WARM_UP_TEXT, &CANDIDATE_LABELS, true)
            .await
        {
            Ok(_) => {
                tracing::info!(classifier = classifier.name(), "Classifier loaded");
                Self {
                    classifier: Some(classifier),
                }
            }
            Err(e) => {
                tracing::warn!(
                    classifier = classifier.name(),
                    error = %e,
                    "Could not load classifier, running keyword fallback"
                );
                Self::fallback()
            }
        }
    }

    pub fn strategy(&self) -> ModerationStrategy {
        if self.classifier.is_some() {
            ModerationStrategy::Classifier
        } else {
            ModerationStrategy::Fallback
        }
    }

    /// Moderate one request with the pinned strategy.
    ///
    /// `content_type` is logged but does not influence the decision.
    pub async fn moderate(
        &self,
        request: &ModerationRequest,
    ) -> Result<ModerationVerdict, ModerationError> {
        let verdict = match &self.classifier {
            None => keyword_verdict(&request.text),
            Some(classifier) => {
                let result = classifier
                    .classify(&request.text, &CANDIDATE_LABELS, true)
                    .await?;
                classifier_verdict(&result)
            }
        };

        tracing::debug!(
            strategy = %self.strategy(),
            content_type = %request.content_type,
            approved = verdict.is_approved,
            flags = ?verdict.flags,
            "Moderated content"
        );

        Ok(verdict)
    }
}

// ============================================================================
// TESTS
// ============================================================================
