// Pet-care chat responder - keyword matching over canned advice.
//
// There is no model behind this: a message mentioning a pet topic gets one of
// a handful of fixed answers, anything else gets a polite redirect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const PET_KEYWORDS: [&str; 8] = [
    "dog", "cat", "pet", "feed", "walk", "vet", "health", "training",
];

pub const PET_CARE_ANSWERS: [&str; 4] = [
    "Based on your query about pet care, I recommend consulting with a veterinarian for specific medical advice.",
    "For behavioral issues, positive reinforcement training is usually the most effective approach.",
    "Make sure your pet has access to fresh water at all times and gets regular exercise.",
    "A balanced diet is crucial for your pet's health. Consider high-quality pet food appropriate for their age and breed.",
];

pub const OFF_TOPIC_ANSWER: &str =
    "I'm specialized in pet care advice. Please ask me questions about your pets!";

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub is_ai_generated: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct ChatService;

impl ChatService {
    pub fn new() -> Self {
        Self
    }

    pub fn reply(&self, request: &ChatRequest) -> ChatReply {
        tracing::debug!(
            user_id = request.user_id.as_deref().unwrap_or("anonymous"),
            has_context = request.context.is_some(),
            "Chat message received"
        );

        ChatReply {
            response: Self::answer_for(&request.message).to_string(),
            is_ai_generated: true,
            timestamp: Utc::now(),
        }
    }

    /// Pick the canned answer for a message.
    pub fn answer_for(message: &str) -> &'static str {
        let lowered = message.to_lowercase();
        if !PET_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
            return OFF_TOPIC_ANSWER;
        }

        let index = (message_hash(message) % PET_CARE_ANSWERS.len() as u64) as usize;
        PET_CARE_ANSWERS[index]
    }
}

/// Polynomial rolling hash (base 31) over the raw bytes.
///
/// Fixed arithmetic, so a message maps to the same answer on every build.
fn message_hash(message: &str) -> u64 {
    message
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: &str) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            context: None,
            user_id: None,
        }
    }

    #[test]
    fn test_pet_question_gets_canned_answer() {
        let answer = ChatService::answer_for("How often should I walk my dog?");
        assert!(PET_CARE_ANSWERS.contains(&answer));
    }

    #[test]
    fn test_keyword_match_is_case_insensitive() {
        let answer = ChatService::answer_for("My CAT won't eat");
        assert!(PET_CARE_ANSWERS.contains(&answer));
    }

    #[test]
    fn test_same_message_same_answer() {
        let message = "What should I feed a puppy?";
        assert_eq!(
            ChatService::answer_for(message),
            ChatService::answer_for(message)
        );
    }

    #[test]
    fn test_answer_index_is_pinned() {
        assert_eq!(message_hash("dog"), 99_644);
        assert_eq!(ChatService::answer_for("dog"), PET_CARE_ANSWERS[0]);
        assert_eq!(message_hash("cat"), 98_262);
        assert_eq!(ChatService::answer_for("cat"), PET_CARE_ANSWERS[2]);
    }

    #[test]
    fn test_off_topic_message() {
        assert_eq!(
            ChatService::answer_for("What's the weather like tomorrow?"),
            OFF_TOPIC_ANSWER
        );
        assert_eq!(ChatService::answer_for(""), OFF_TOPIC_ANSWER);
    }

    #[test]
    fn test_reply_is_marked_ai_generated() {
        let before = Utc::now();
        let reply = ChatService::new().reply(&request("Is my pet healthy?"));

        assert!(reply.is_ai_generated);
        assert!(PET_CARE_ANSWERS.iter().any(|a| *a == reply.response));
        assert!(reply.timestamp >= before);
    }
}
