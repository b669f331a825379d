//! Completion provider abstraction.
//!
//! The analyzers talk to a language model through this trait. An absent
//! provider (`None` from [`from_config`]) is a legitimate configuration
//! meaning "run in heuristic-only mode". It is not an error, and it is
//! distinguishable from a provider that was configured but failed a call.

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

mod openai_chat;

pub use openai_chat::OpenAiChatProvider;

use crate::config::CompletionConfig;

/// One structured-JSON completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system_instruction: String,
    pub user_payload: String,
    pub temperature: f64,
}

/// Failure of a configured provider during a call. Analyzer branches recover
/// from every variant by falling back to their heuristic.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion API returned status {status}: {body}")]
    Api { status: u16, body: String },
    #[error("completion response was not the expected JSON: {0}")]
    MalformedResponse(String),
}

/// A language-model completion backend returning structured JSON.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<serde_json::Value, CompletionError>;
}

/// Build the configured provider, or `None` for heuristic-only mode.
pub fn from_config(config: &CompletionConfig) -> Result<Option<Arc<dyn CompletionProvider>>> {
    let provider_name = match config.provider.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => {
            info!("No completion provider configured, analyzers will use heuristic fallbacks");
            return Ok(None);
        }
    };

    let provider: Arc<dyn CompletionProvider> = match provider_name {
        "openai-chat" => {
            let api_key = match &config.api_key {
                Some(key) if !key.is_empty() => key.clone(),
                _ => {
                    info!(
                        "Provider '{}' configured without api_key, falling back to heuristic-only mode",
                        provider_name
                    );
                    return Ok(None);
                }
            };

            Arc::new(OpenAiChatProvider::new(
                api_key,
                config.api_endpoint.clone(),
                config.model.clone(),
                config.request_timeout_seconds,
            )?)
        }
        _ => bail!(
            "Unknown completion provider '{}'. Supported providers: openai-chat",
            provider_name
        ),
    };

    info!("Using {} for analysis completions", provider.name());

    Ok(Some(provider))
}

/// Summary of the completion configuration, for CLI/API inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub provider: Option<String>,
    pub model: Option<String>,
    pub api_endpoint: Option<String>,
    pub has_api_key: bool,
    pub heuristic_only: bool,
}

pub fn provider_info(config: &CompletionConfig) -> ProviderInfo {
    let configured = matches!(config.provider.as_deref(), Some(p) if !p.is_empty())
        && matches!(config.api_key.as_deref(), Some(k) if !k.is_empty());

    ProviderInfo {
        provider: config.provider.clone(),
        model: config.model.clone(),
        api_endpoint: config.api_endpoint.clone(),
        has_api_key: config.api_key.is_some(),
        heuristic_only: !configured,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_unconfigured_is_none() {
        let config = CompletionConfig::default();
        assert!(from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_from_config_missing_api_key_is_none() {
        let config = CompletionConfig {
            provider: Some("openai-chat".to_string()),
            ..CompletionConfig::default()
        };
        assert!(from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_from_config_builds_openai_chat() {
        let config = CompletionConfig {
            provider: Some("openai-chat".to_string()),
            api_key: Some("sk-test".to_string()),
            ..CompletionConfig::default()
        };
        let provider = from_config(&config).unwrap().unwrap();
        assert_eq!(provider.name(), "OpenAI chat completions");
    }

    #[test]
    fn test_from_config_unknown_provider_errors() {
        let config = CompletionConfig {
            provider: Some("mystery".to_string()),
            api_key: Some("key".to_string()),
            ..CompletionConfig::default()
        };
        assert!(from_config(&config).is_err());
    }

    #[test]
    fn test_provider_info_heuristic_only() {
        let info = provider_info(&CompletionConfig::default());
        assert!(info.heuristic_only);
        assert!(!info.has_api_key);

        let info = provider_info(&CompletionConfig {
            provider: Some("openai-chat".to_string()),
            api_key: Some("sk".to_string()),
            ..CompletionConfig::default()
        });
        assert!(!info.heuristic_only);
    }
}
