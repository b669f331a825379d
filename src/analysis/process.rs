//! Process-adherence scoring branch.
//!
//! Scores how much of a configured process template a conversation covered.
//! Detection per step is a strict 30% keyword-coverage threshold while the
//! overall score is the continuous mean of step scores, so the two can
//! legitimately diverge and both are reported.

use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use super::models::{ProcessScore, StepScore};
use super::{heuristics, prompts, request_structured};
use crate::completion::CompletionProvider;
use crate::db::templates::ProcessTemplate;

/// Step coverage above this percentage counts as detected. Exactly at the
/// threshold does not.
const DETECTION_THRESHOLD: u8 = 30;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecommendationsEnvelope {
    recommendations: Vec<String>,
}

pub struct ProcessAdherenceScorer {
    provider: Option<Arc<dyn CompletionProvider>>,
}

impl ProcessAdherenceScorer {
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self { provider }
    }

    /// Total function over the template's steps.
    pub async fn score(&self, transcript: &str, template: &ProcessTemplate) -> ProcessScore {
        let lower = transcript.to_lowercase();

        let step_scores: Vec<StepScore> = template
            .steps
            .iter()
            .map(|step| {
                let matched_keywords: Vec<String> = step
                    .keywords
                    .iter()
                    .filter(|keyword| lower.contains(&keyword.to_lowercase()))
                    .cloned()
                    .collect();

                // A step with no keywords scores 0 and is never detected.
                let score = ((matched_keywords.len() as f64
                    / step.keywords.len().max(1) as f64)
                    * 100.0)
                    .round() as u8;

                StepScore {
                    name: step.name.clone(),
                    score,
                    detected: score > DETECTION_THRESHOLD,
                    keywords: step.keywords.clone(),
                    matched_keywords,
                }
            })
            .collect();

        let completed_steps = step_scores.iter().filter(|s| s.detected).count();

        let overall_score = if step_scores.is_empty() {
            0
        } else {
            (step_scores.iter().map(|s| s.score as f64).sum::<f64>() / step_scores.len() as f64)
                .round() as u8
        };

        let missed_steps: Vec<String> = step_scores
            .iter()
            .filter(|s| !s.detected)
            .map(|s| s.name.clone())
            .collect();

        let recommendations = self.recommendations(transcript, &missed_steps).await;

        ProcessScore {
            overall_score,
            completed_steps,
            total_steps: step_scores.len(),
            step_scores,
            missed_steps,
            recommendations,
        }
    }

    async fn recommendations(&self, transcript: &str, missed_steps: &[String]) -> Vec<String> {
        if missed_steps.is_empty() {
            return Vec::new();
        }

        let Some(provider) = &self.provider else {
            return heuristics::templated_recommendations(missed_steps);
        };

        let response = request_structured(
            provider.as_ref(),
            prompts::recommendations_instruction(missed_steps),
            transcript,
        )
        .await;

        match response {
            Ok(value) => match serde_json::from_value::<RecommendationsEnvelope>(value) {
                Ok(envelope) if !envelope.recommendations.is_empty() => envelope.recommendations,
                Ok(_) => heuristics::templated_recommendations(missed_steps),
                Err(e) => {
                    warn!("Recommendation response did not match contract: {e}, using templated fallback");
                    heuristics::templated_recommendations(missed_steps)
                }
            },
            Err(e) => {
                warn!("Recommendation completion failed: {e}, using templated fallback");
                heuristics::templated_recommendations(missed_steps)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::StubProvider;
    use crate::completion::{CompletionError, CompletionRequest};
    use crate::db::templates::ProcessStep;
    use async_trait::async_trait;
    use serde_json::json;

    fn template(steps: Vec<ProcessStep>) -> ProcessTemplate {
        ProcessTemplate {
            id: 1,
            organization_id: 1,
            name: "Discovery call".to_string(),
            is_active: true,
            steps,
        }
    }

    fn step(name: &str, keywords: &[&str]) -> ProcessStep {
        ProcessStep {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_two_of_four_keywords_detected() {
        let scorer = ProcessAdherenceScorer::new(None);
        let tpl = template(vec![step("Greeting", &["alpha", "bravo", "charlie", "delta"])]);

        let result = scorer.score("We covered Alpha and bravo today", &tpl).await;
        let s = &result.step_scores[0];
        assert_eq!(s.matched_keywords.len(), 2);
        assert_eq!(s.score, 50);
        assert!(s.detected);
    }

    #[tokio::test]
    async fn test_one_of_four_keywords_not_detected() {
        let scorer = ProcessAdherenceScorer::new(None);
        let tpl = template(vec![step("Greeting", &["alpha", "bravo", "charlie", "delta"])]);

        let result = scorer.score("only alpha came up", &tpl).await;
        let s = &result.step_scores[0];
        assert_eq!(s.score, 25);
        assert!(!s.detected);
    }

    #[tokio::test]
    async fn test_exactly_thirty_percent_is_not_detected() {
        let scorer = ProcessAdherenceScorer::new(None);
        let tpl = template(vec![step(
            "Qualification",
            &["k1", "k2", "k3", "k4", "k5", "k6", "k7", "k8", "k9", "k10"],
        )]);

        let result = scorer.score("mentions k1, k2 and k3 only", &tpl).await;
        let s = &result.step_scores[0];
        assert_eq!(s.score, 30);
        assert!(!s.detected);
    }

    #[tokio::test]
    async fn test_empty_keyword_step_scores_zero() {
        let scorer = ProcessAdherenceScorer::new(None);
        let tpl = template(vec![step("Empty", &[])]);

        let result = scorer.score("any transcript", &tpl).await;
        assert_eq!(result.step_scores[0].score, 0);
        assert!(!result.step_scores[0].detected);
    }

    #[tokio::test]
    async fn test_empty_step_list_overall_zero() {
        let scorer = ProcessAdherenceScorer::new(None);
        let tpl = template(vec![]);

        let result = scorer.score("any transcript", &tpl).await;
        assert_eq!(result.overall_score, 0);
        assert_eq!(result.total_steps, 0);
        assert!(result.missed_steps.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_overall_mean_diverges_from_completion_ratio() {
        let scorer = ProcessAdherenceScorer::new(None);
        let tpl = template(vec![
            step("Full", &["covered"]),
            step("Half", &["present", "absent1", "absent2", "absent3"]),
        ]);

        let result = scorer.score("covered and present", &tpl).await;
        // Step scores are 100 and 25: mean 63, but only 1 of 2 detected.
        assert_eq!(result.overall_score, 63);
        assert_eq!(result.completed_steps, 1);
        assert_eq!(result.total_steps, 2);
    }

    #[tokio::test]
    async fn test_missed_steps_preserve_template_order() {
        let scorer = ProcessAdherenceScorer::new(None);
        let tpl = template(vec![
            step("First", &["zzz1"]),
            step("Second", &["hello"]),
            step("Third", &["zzz2"]),
        ]);

        let result = scorer.score("hello there", &tpl).await;
        assert_eq!(
            result.missed_steps,
            vec!["First".to_string(), "Third".to_string()]
        );
    }

    #[tokio::test]
    async fn test_templated_recommendations_without_provider() {
        let scorer = ProcessAdherenceScorer::new(None);
        let tpl = template(vec![step("Closing", &["signature"])]);

        let result = scorer.score("no match here", &tpl).await;
        assert_eq!(
            result.recommendations,
            vec!["Ensure to cover the 'Closing' step in future conversations.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_provider_recommendations_used() {
        let stub = StubProvider::Json(json!({
            "recommendations": ["Ask for the signature earlier", "Summarize next steps"]
        }));
        let scorer = ProcessAdherenceScorer::new(Some(Arc::new(stub)));
        let tpl = template(vec![step("Closing", &["signature"])]);

        let result = scorer.score("no match here", &tpl).await;
        assert_eq!(result.recommendations.len(), 2);
        assert_eq!(result.recommendations[0], "Ask for the signature earlier");
    }

    #[tokio::test]
    async fn test_empty_provider_recommendations_fall_back() {
        let stub = StubProvider::Json(json!({ "recommendations": [] }));
        let scorer = ProcessAdherenceScorer::new(Some(Arc::new(stub)));
        let tpl = template(vec![step("Closing", &["signature"])]);

        let result = scorer.score("no match here", &tpl).await;
        assert_eq!(
            result.recommendations,
            vec!["Ensure to cover the 'Closing' step in future conversations.".to_string()]
        );
    }

    /// Provider that panics if called, proving no call happens when every
    /// step was detected.
    struct PanickingProvider;

    #[async_trait]
    impl crate::completion::CompletionProvider for PanickingProvider {
        fn name(&self) -> &'static str {
            "panicking"
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<serde_json::Value, CompletionError> {
            panic!("provider must not be called when no steps were missed");
        }
    }

    #[tokio::test]
    async fn test_no_missed_steps_skips_provider() {
        let scorer = ProcessAdherenceScorer::new(Some(Arc::new(PanickingProvider)));
        let tpl = template(vec![step("Greeting", &["hello"])]);

        let result = scorer.score("hello world", &tpl).await;
        assert!(result.missed_steps.is_empty());
        assert!(result.recommendations.is_empty());
    }
}
