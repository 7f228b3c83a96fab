// Moderation policy - the two pure decision functions.
//
// - Keyword fallback: denylist containment, used when no classifier is installed
// - Classifier branch: per-label thresholding of multi-label scores
//
// Both return the same verdict shape so callers never care which one ran.
// The suggestion polarity differs between the branches and must stay that way.

use super::moderation_models::{ClassificationResult, ModerationVerdict};

/// Words that flag a text when no classifier is available.
pub const DENYLIST: [&str; 4] = ["hate", "attack", "violence", "abuse"];

/// Labels offered to the zero-shot classifier.
pub const CANDIDATE_LABELS: [&str; 4] = ["harassment", "spam", "inappropriate", "safe"];

/// A label must score strictly above this to be flagged.
pub const FLAG_THRESHOLD: f64 = 0.7;

pub const SAFE_LABEL: &str = "safe";
pub const INAPPROPRIATE_FLAG: &str = "inappropriate";

const FALLBACK_FLAGGED_CONFIDENCE: f64 = 0.8;
const FALLBACK_CLEAN_CONFIDENCE: f64 = 0.9;

pub const FALLBACK_SUGGESTION: &str = "Keep the conversation friendly and pet-focused!";
pub const CLASSIFIER_SUGGESTION: &str = "Please keep the community pet-friendly!";

/// Moderate `text` against the keyword denylist.
///
/// Matching is substring containment on the lower-cased text, so "attacker"
/// or "abused" also match. Only one flag is ever raised.
pub fn keyword_verdict(text: &str) -> ModerationVerdict {
    let lowered = text.to_lowercase();

    let mut flags = Vec::new();
    if DENYLIST.iter().any(|word| lowered.contains(word)) {
        flags.push(INAPPROPRIATE_FLAG.to_string());
    }

    let is_approved = flags.is_empty();

    ModerationVerdict {
        is_approved,
        confidence: if is_approved {
            FALLBACK_CLEAN_CONFIDENCE
        } else {
            FALLBACK_FLAGGED_CONFIDENCE
        },
        // Attached to the approved case on this branch
        suggestion: is_approved.then(|| FALLBACK_SUGGESTION.to_string()),
        flags,
    }
}

/// Turn classifier scores into a verdict.
pub fn classifier_verdict(result: &ClassificationResult) -> ModerationVerdict {
    let flags: Vec<String> = result
        .iter()
        .filter(|(label, score)| *score > FLAG_THRESHOLD && *label != SAFE_LABEL)
        .map(|(label, _)| label.to_string())
        .collect();

    // "safe" is filtered out above, so the second clause never holds.
    // Kept until someone confirms whether an explicit safe override was intended.
    let is_approved = flags.is_empty() || flags.iter().any(|f| f == SAFE_LABEL);

    ModerationVerdict {
        is_approved,
        flags,
        confidence: result.max_score(),
        suggestion: (!is_approved).then(|| CLASSIFIER_SUGGESTION.to_string()),
    }
}
