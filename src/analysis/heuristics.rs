//! Deterministic keyword fallbacks for the analyzer branches.
//!
//! Used whenever no completion provider is configured or a provider call
//! fails. Pure functions of the transcript text, so degraded results are
//! stable across re-analysis.

use super::models::{
    ActionCategory, ActionItem, EmotionScores, Opportunity, OpportunityType, Priority,
    SentimentLabel, SentimentResult,
};

const POSITIVE_WORDS: &[&str] = &[
    "great", "excellent", "good", "happy", "love", "perfect", "wonderful", "amazing", "helpful",
    "pleased",
];

const NEGATIVE_WORDS: &[&str] = &[
    "problem", "bad", "issue", "unhappy", "terrible", "awful", "disappointed", "frustrated",
    "complaint", "cancel",
];

pub const DEGRADED_KEY_PHRASE: &str = "keyword-based analysis (no completion provider)";

fn presence_count(transcript_lower: &str, words: &[&str]) -> usize {
    words
        .iter()
        .filter(|word| transcript_lower.contains(*word))
        .count()
}

pub fn sentiment(transcript: &str) -> SentimentResult {
    let lower = transcript.to_lowercase();
    let positive = presence_count(&lower, POSITIVE_WORDS);
    let negative = presence_count(&lower, NEGATIVE_WORDS);

    let (overall, score) = if positive > negative + 1 {
        (SentimentLabel::Positive, 0.6)
    } else if negative > positive + 1 {
        (SentimentLabel::Negative, -0.6)
    } else if positive > 0 && negative > 0 {
        (SentimentLabel::Mixed, 0.1)
    } else {
        (SentimentLabel::Neutral, 0.0)
    };

    let emotions = EmotionScores {
        joy: if overall == SentimentLabel::Positive {
            0.7
        } else {
            0.3
        },
        anger: if overall == SentimentLabel::Negative {
            0.6
        } else {
            0.1
        },
        surprise: 0.2,
        sadness: if overall == SentimentLabel::Negative {
            0.5
        } else {
            0.1
        },
    };

    SentimentResult {
        overall,
        score,
        emotions,
        key_phrases: vec![DEGRADED_KEY_PHRASE.to_string()],
    }
}

pub fn opportunities(transcript: &str) -> Vec<Opportunity> {
    let lower = transcript.to_lowercase();
    let mut found = Vec::new();

    if lower.contains("price") || lower.contains("cost") {
        found.push(Opportunity {
            kind: OpportunityType::Upsell,
            description: "Pricing was discussed during the conversation".to_string(),
            confidence: 0.6,
            context: "Transcript mentions price or cost".to_string(),
            priority: Priority::Medium,
        });
    }

    if lower.contains("follow") || lower.contains("next") {
        found.push(Opportunity {
            kind: OpportunityType::FollowUp,
            description: "The customer expects a follow-up".to_string(),
            confidence: 0.7,
            context: "Transcript mentions a follow-up or next step".to_string(),
            priority: Priority::High,
        });
    }

    found
}

pub fn action_items(_transcript: &str) -> Vec<ActionItem> {
    vec![ActionItem {
        title: "Review conversation".to_string(),
        description: "Automatic extraction was unavailable, review the transcript manually"
            .to_string(),
        priority: Priority::Medium,
        category: ActionCategory::Task,
        due_date: None,
        assignee: None,
    }]
}

/// One templated sentence per missed step, in template order.
pub fn templated_recommendations(missed_steps: &[String]) -> Vec<String> {
    missed_steps
        .iter()
        .map(|name| format!("Ensure to cover the '{name}' step in future conversations."))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_positive() {
        let result = sentiment("This was a great experience, excellent service");
        assert_eq!(result.overall, SentimentLabel::Positive);
        assert_eq!(result.score, 0.6);
        assert_eq!(result.emotions.joy, 0.7);
    }

    #[test]
    fn test_sentiment_negative() {
        let result = sentiment("There was a problem and the service was bad");
        assert_eq!(result.overall, SentimentLabel::Negative);
        assert_eq!(result.score, -0.6);
        assert_eq!(result.emotions.anger, 0.6);
    }

    #[test]
    fn test_sentiment_neutral() {
        let result = sentiment("We scheduled the installation for Tuesday");
        assert_eq!(result.overall, SentimentLabel::Neutral);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_sentiment_mixed() {
        let result = sentiment("The product is great and helpful but we had a problem and an issue");
        assert_eq!(result.overall, SentimentLabel::Mixed);
        assert_eq!(result.score, 0.1);
    }

    #[test]
    fn test_sentiment_case_insensitive() {
        let result = sentiment("GREAT! EXCELLENT!");
        assert_eq!(result.overall, SentimentLabel::Positive);
    }

    #[test]
    fn test_sentiment_degraded_key_phrase() {
        let result = sentiment("anything");
        assert_eq!(result.key_phrases, vec![DEGRADED_KEY_PHRASE.to_string()]);
    }

    #[test]
    fn test_opportunities_upsell_only() {
        let found = opportunities("What does the premium plan cost?");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, OpportunityType::Upsell);
        assert_eq!(found[0].confidence, 0.6);
        assert_eq!(found[0].priority, Priority::Medium);
    }

    #[test]
    fn test_opportunities_follow_up_only() {
        let found = opportunities("Let's sync next week");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].kind, OpportunityType::FollowUp);
        assert_eq!(found[0].confidence, 0.7);
        assert_eq!(found[0].priority, Priority::High);
    }

    #[test]
    fn test_opportunities_additive() {
        let found = opportunities("The price works, follow up with the contract");
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_opportunities_empty() {
        assert!(opportunities("We talked about the weather").is_empty());
    }

    #[test]
    fn test_action_items_single_placeholder() {
        let items = action_items("any transcript");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].priority, Priority::Medium);
        assert_eq!(items[0].category, ActionCategory::Task);
    }

    #[test]
    fn test_templated_recommendations() {
        let missed = vec!["Greeting".to_string(), "Needs Assessment".to_string()];
        let recs = templated_recommendations(&missed);
        assert_eq!(recs.len(), 2);
        assert_eq!(
            recs[0],
            "Ensure to cover the 'Greeting' step in future conversations."
        );
    }
}
