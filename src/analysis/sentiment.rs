//! Sentiment analysis branch.

use std::sync::Arc;
use tracing::warn;

use super::models::SentimentResult;
use super::{heuristics, prompts, request_structured};
use crate::completion::CompletionProvider;

pub struct SentimentAnalyzer {
    provider: Option<Arc<dyn CompletionProvider>>,
}

impl SentimentAnalyzer {
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self { provider }
    }

    /// Total function: provider absence or failure degrades to the keyword
    /// heuristic, never to an error.
    pub async fn run(&self, transcript: &str) -> SentimentResult {
        let Some(provider) = &self.provider else {
            return heuristics::sentiment(transcript);
        };

        let response = request_structured(
            provider.as_ref(),
            prompts::SENTIMENT_INSTRUCTION.to_string(),
            transcript,
        )
        .await;

        match response {
            // Missing fields take their defaults (overall neutral, zero
            // scores, empty phrases) rather than failing the parse.
            Ok(value) => match serde_json::from_value::<SentimentResult>(value) {
                Ok(result) => result,
                Err(e) => {
                    warn!("Sentiment response did not match contract: {e}, using keyword fallback");
                    heuristics::sentiment(transcript)
                }
            },
            Err(e) => {
                warn!("Sentiment completion failed: {e}, using keyword fallback");
                heuristics::sentiment(transcript)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::SentimentLabel;
    use crate::analysis::test_support::StubProvider;
    use serde_json::json;

    #[tokio::test]
    async fn test_no_provider_uses_heuristic() {
        let analyzer = SentimentAnalyzer::new(None);
        let result = analyzer.run("This was a great experience, excellent service").await;
        assert_eq!(result.overall, SentimentLabel::Positive);
        assert_eq!(result.score, 0.6);
    }

    #[tokio::test]
    async fn test_provider_response_parsed() {
        let stub = StubProvider::Json(json!({
            "overall": "positive",
            "score": 0.85,
            "emotions": {"joy": 0.9, "anger": 0.0, "surprise": 0.1, "sadness": 0.0},
            "keyPhrases": ["very happy with the rollout"]
        }));
        let analyzer = SentimentAnalyzer::new(Some(Arc::new(stub)));

        let result = analyzer.run("transcript").await;
        assert_eq!(result.overall, SentimentLabel::Positive);
        assert_eq!(result.score, 0.85);
        assert_eq!(result.key_phrases.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_fields_default() {
        let stub = StubProvider::Json(json!({"overall": "mixed"}));
        let analyzer = SentimentAnalyzer::new(Some(Arc::new(stub)));

        let result = analyzer.run("transcript").await;
        assert_eq!(result.overall, SentimentLabel::Mixed);
        assert_eq!(result.score, 0.0);
        assert!(result.key_phrases.is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_degrades() {
        let analyzer = SentimentAnalyzer::new(Some(Arc::new(StubProvider::Fail)));
        let result = analyzer.run("There was a problem and the service was bad").await;
        assert_eq!(result.overall, SentimentLabel::Negative);
        assert_eq!(result.score, -0.6);
    }
}
