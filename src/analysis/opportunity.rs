//! Sales-opportunity detection branch.

use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use super::models::Opportunity;
use super::{heuristics, prompts, request_structured};
use crate::completion::CompletionProvider;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OpportunitiesEnvelope {
    opportunities: Vec<Opportunity>,
}

pub struct OpportunityDetector {
    provider: Option<Arc<dyn CompletionProvider>>,
}

impl OpportunityDetector {
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self { provider }
    }

    /// Total function: provider absence or failure degrades to the trigger
    /// keyword heuristic.
    pub async fn run(&self, transcript: &str) -> Vec<Opportunity> {
        let Some(provider) = &self.provider else {
            return heuristics::opportunities(transcript);
        };

        let response = request_structured(
            provider.as_ref(),
            prompts::OPPORTUNITY_INSTRUCTION.to_string(),
            transcript,
        )
        .await;

        match response {
            // A missing "opportunities" key is an empty list, not an error.
            Ok(value) => match serde_json::from_value::<OpportunitiesEnvelope>(value) {
                Ok(envelope) => envelope.opportunities,
                Err(e) => {
                    warn!("Opportunity response did not match contract: {e}, using keyword fallback");
                    heuristics::opportunities(transcript)
                }
            },
            Err(e) => {
                warn!("Opportunity completion failed: {e}, using keyword fallback");
                heuristics::opportunities(transcript)
            }
        }
    }
}
