//! Keyword-driven reply selection.
//!
//! Input is lower-cased and checked against each category's keyword set in
//! a fixed priority order. The first category with any substring hit wins;
//! the reply is drawn uniformly from that category's pool using the
//! caller's random source.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};

/// The emotional category a message is classified into.
///
/// Variant order is the classification priority order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReplyCategory {
    Sad,
    Anxious,
    Happy,
    Tired,
    Angry,
    Default,
}

impl ReplyCategory {
    /// Keywords that select this category. `Default` has none.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Sad => &["sad", "depressed", "down", "lonely"],
            Self::Anxious => &["anxious", "worried", "stressed", "overwhelmed"],
            Self::Happy => &["happy", "good", "great", "excited"],
            Self::Tired => &["tired", "exhausted", "drained", "sleep"],
            Self::Angry => &["angry", "mad", "frustrated", "annoyed"],
            Self::Default => &[],
        }
    }

    /// The canned replies for this category.
    pub fn pool(self) -> &'static [&'static str] {
        match self {
            Self::Sad => SAD_REPLIES,
            Self::Anxious => ANXIOUS_REPLIES,
            Self::Happy => HAPPY_REPLIES,
            Self::Tired => TIRED_REPLIES,
            Self::Angry => ANGRY_REPLIES,
            Self::Default => DEFAULT_REPLIES,
        }
    }
}

const SAD_REPLIES: &[&str] = &[
    "I'm really sorry you're feeling this way. It's brave of you to share these feelings with me. What's been weighing on your heart lately?",
    "Sadness is a natural part of the human experience, and it's okay to feel this way. Would you like to talk about what's making you feel down?",
    "I hear the pain in your words. You don't have to go through this alone. What small thing could bring you a tiny bit of comfort right now?",
];

const ANXIOUS_REPLIES: &[&str] = &[
    "Anxiety can feel overwhelming, but you're taking a positive step by reaching out. Let's work through this together. What's triggering these feelings?",
    "I understand that feeling stressed can be exhausting. Would you like to try a quick breathing exercise, or would you prefer to talk about what's causing your worry?",
    "It sounds like you're carrying a heavy load right now. What's one thing on your mind that we could break down into smaller, manageable pieces?",
];

const HAPPY_REPLIES: &[&str] = &[
    "I love hearing that you're feeling good! Your positive energy is wonderful. What's bringing you joy today?",
    "That's fantastic! It's beautiful to see you in such a positive space. Would you like to share what's making you feel so happy?",
    "Your happiness is contagious! It's important to celebrate these good moments. What would you like to do to keep this positive energy flowing?",
];

const TIRED_REPLIES: &[&str] = &[
    "Being tired can really affect how we feel emotionally. Are you getting enough rest, or is something keeping you from sleeping well?",
    "Physical and mental exhaustion often go hand in hand. What's been demanding most of your energy lately?",
    "Rest is so important for our mental health. Would you like to talk about your sleep routine or what's been draining your energy?",
];

const ANGRY_REPLIES: &[&str] = &[
    "It sounds like you're feeling really frustrated right now. Anger can be a signal that something important to you isn't being respected. What's got you feeling this way?",
    "I can sense your frustration. It's okay to feel angry - it's a valid emotion. Would you like to talk about what triggered these feelings?",
    "Anger can be intense and overwhelming. You're in a safe space here. What situation or person has you feeling so frustrated?",
];

const DEFAULT_REPLIES: &[&str] = &[
    "I hear you, and your feelings are completely valid. Would you like to share more about what's on your mind?",
    "Thank you for opening up to me. It takes courage to express your feelings. How can I support you right now?",
    "I'm here with you. Sometimes just talking about things can help us process them better. What would help you feel more at ease?",
    "Your mental health journey is unique and important. Every small step you take matters. What's one thing that brought you comfort recently?",
    "I appreciate you trusting me with your thoughts. Remember, it's okay to feel what you're feeling. What would you like to explore together?",
];

/// Classifies `input` into the first matching category.
///
/// Categories are not mutually exclusive ("happy but tired" hits two), so
/// the declaration order of [`ReplyCategory`] acts as the tie-break.
pub fn classify(input: &str) -> ReplyCategory {
    let message = input.to_lowercase();
    ReplyCategory::iter()
        .find(|category| {
            category
                .keywords()
                .iter()
                .any(|keyword| message.contains(keyword))
        })
        .unwrap_or(ReplyCategory::Default)
}

/// Classifies `input` and picks one reply from the matching pool.
///
/// Never fails: blank and non-matching input fall through to the default
/// pool.
pub fn classify_and_reply<R: Rng + ?Sized>(input: &str, rng: &mut R) -> &'static str {
    let category = classify(input);
    let pool = category.pool();
    let reply = pool[rng.gen_range(0..pool.len())];
    tracing::debug!(target: "companion", category = %category, "selected reply");
    reply
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_pool_sizes() {
        for category in ReplyCategory::iter() {
            let expected = if category == ReplyCategory::Default { 5 } else { 3 };
            assert_eq!(category.pool().len(), expected, "pool size for {}", category);
        }
    }

    #[test]
    fn test_each_keyword_selects_its_category() {
        for category in ReplyCategory::iter() {
            for keyword in category.keywords() {
                assert_eq!(classify(keyword), category, "keyword '{}'", keyword);
            }
        }
    }

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(classify("I feel SAD today"), ReplyCategory::Sad);
        assert_eq!(classify("So Frustrated"), ReplyCategory::Angry);
    }

    #[test]
    fn test_priority_order_breaks_ties() {
        assert_eq!(classify("happy but tired"), ReplyCategory::Happy);
        assert_eq!(classify("tired and sad"), ReplyCategory::Sad);
        assert_eq!(classify("worried and angry"), ReplyCategory::Anxious);
        assert_eq!(classify("exhausted and annoyed"), ReplyCategory::Tired);
    }

    #[test]
    fn test_substring_matching_is_literal() {
        // "down" inside "downtown" still counts
        assert_eq!(classify("heading downtown"), ReplyCategory::Sad);
        // "mad" inside "made"
        assert_eq!(classify("I made dinner"), ReplyCategory::Angry);
    }

    #[test]
    fn test_blank_and_unmatched_input_fall_through_to_default() {
        let mut rng = rng();
        for input in ["", "   ", "\t\n", "the weather is mild", "🙂"] {
            assert_eq!(classify(input), ReplyCategory::Default);
            let reply = classify_and_reply(input, &mut rng);
            assert!(DEFAULT_REPLIES.contains(&reply));
        }
    }

    #[test]
    fn test_repeated_replies_stay_in_pool() {
        let mut rng = rng();
        for _ in 0..200 {
            let reply = classify_and_reply("I feel so lonely", &mut rng);
            assert!(SAD_REPLIES.contains(&reply));
        }
        for _ in 0..200 {
            let reply = classify_and_reply("can't sleep", &mut rng);
            assert!(TIRED_REPLIES.contains(&reply));
        }
    }

    #[test]
    fn test_seeded_source_is_deterministic() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                classify_and_reply("hello", &mut a),
                classify_and_reply("hello", &mut b)
            );
        }
    }
}
