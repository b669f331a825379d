//! Transcript analysis pipeline.
//!
//! Four analyzer branches (sentiment, opportunities, process adherence,
//! action items) run concurrently over one transcript, each degrading to a
//! deterministic keyword heuristic when the completion provider is absent
//! or fails. The orchestrator joins the branches, aggregates a confidence
//! score, and persists the combined report.

pub mod action_items;
pub mod confidence;
pub mod heuristics;
pub mod models;
pub mod opportunity;
pub mod orchestrator;
pub mod process;
pub mod prompts;
pub mod sentiment;

pub use action_items::ActionItemExtractor;
pub use confidence::aggregate_confidence;
pub use models::{
    ActionCategory, ActionItem, AnalysisReport, EmotionScores, Opportunity, OpportunityType,
    Priority, ProcessScore, SentimentLabel, SentimentResult, StepScore,
};
pub use opportunity::OpportunityDetector;
pub use orchestrator::{AnalysisError, AnalysisOrchestrator};
pub use process::ProcessAdherenceScorer;
pub use sentiment::SentimentAnalyzer;

use crate::completion::{CompletionError, CompletionProvider, CompletionRequest};

/// Shared provider-call helper: truncate the transcript to the prompt
/// budget and issue one structured-JSON completion.
pub(crate) async fn request_structured(
    provider: &dyn CompletionProvider,
    system_instruction: String,
    transcript: &str,
) -> Result<serde_json::Value, CompletionError> {
    let request = CompletionRequest {
        system_instruction,
        user_payload: prompts::truncate_transcript(transcript).to_string(),
        temperature: prompts::ANALYSIS_TEMPERATURE,
    };
    provider.complete(request).await
}
