//! Action-item extraction branch.

use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use super::models::ActionItem;
use super::{heuristics, prompts, request_structured};
use crate::completion::CompletionProvider;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ActionItemsEnvelope {
    action_items: Vec<ActionItem>,
}

pub struct ActionItemExtractor {
    provider: Option<Arc<dyn CompletionProvider>>,
}

impl ActionItemExtractor {
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self { provider }
    }

    /// Total function: provider absence or failure degrades to a single
    /// placeholder item.
    pub async fn run(&self, transcript: &str) -> Vec<ActionItem> {
        let Some(provider) = &self.provider else {
            return heuristics::action_items(transcript);
        };

        let response = request_structured(
            provider.as_ref(),
            prompts::ACTION_ITEM_INSTRUCTION.to_string(),
            transcript,
        )
        .await;

        match response {
            Ok(value) => match serde_json::from_value::<ActionItemsEnvelope>(value) {
                Ok(envelope) => envelope.action_items,
                Err(e) => {
                    warn!("Action item response did not match contract: {e}, using placeholder fallback");
                    heuristics::action_items(transcript)
                }
            },
            Err(e) => {
                warn!("Action item completion failed: {e}, using placeholder fallback");
                heuristics::action_items(transcript)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::{ActionCategory, Priority};
    use crate::analysis::test_support::StubProvider;
    use serde_json::json;

    #[tokio::test]
    async fn test_no_provider_uses_placeholder() {
        let extractor = ActionItemExtractor::new(None);
        let items = extractor.run("transcript").await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].category, ActionCategory::Task);
    }

    #[tokio::test]
    async fn test_provider_response_parsed() {
        let stub = StubProvider::Json(json!({
            "actionItems": [{
                "title": "Send proposal",
                "description": "Email the enterprise tier proposal",
                "priority": "high",
                "category": "task",
                "dueDate": "2026-08-21",
                "assignee": "Dana"
            }]
        }));
        let extractor = ActionItemExtractor::new(Some(Arc::new(stub)));

        let items = extractor.run("transcript").await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].priority, Priority::High);
        assert_eq!(items[0].assignee.as_deref(), Some("Dana"));
    }

    #[tokio::test]
    async fn test_missing_array_key_is_empty() {
        let stub = StubProvider::Json(json!({}));
        let extractor = ActionItemExtractor::new(Some(Arc::new(stub)));
        assert!(extractor.run("transcript").await.is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_degrades() {
        let extractor = ActionItemExtractor::new(Some(Arc::new(StubProvider::Fail)));
        let items = extractor.run("transcript").await;
        assert_eq!(items.len(), 1);
    }
}
