//! Analysis orchestration.
//!
//! Runs the full pipeline for one recording:
//! load → fan out to the four analyzer branches → join → aggregate →
//! upsert → mark completed.
//!
//! All dependencies are injected via constructor, no concrete types
//! hardcoded. Branch failures cannot fail the pipeline (each analyzer is
//! total); the only fatal errors are missing inputs, the overall deadline,
//! and persistence.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use super::confidence::aggregate_confidence;
use super::models::AnalysisReport;
use super::{
    ActionItemExtractor, OpportunityDetector, ProcessAdherenceScorer, SentimentAnalyzer,
};
use crate::completion::CompletionProvider;
use crate::db;
use crate::db::analyses::AnalysisRepository;
use crate::db::recordings::{RecordingRepository, RecordingStatus};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Recording {0} not found")]
    RecordingNotFound(i64),
    #[error("Recording {0} has no transcript")]
    TranscriptMissing(i64),
    #[error("Analysis deadline of {0:?} elapsed")]
    DeadlineExceeded(Duration),
    #[error("Analysis persistence failed: {0}")]
    Persistence(#[from] anyhow::Error),
}

impl AnalysisError {
    /// Whether the error is a missing-input error (for 404 mapping).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RecordingNotFound(_) | Self::TranscriptMissing(_)
        )
    }
}

pub struct AnalysisOrchestrator {
    db_path: PathBuf,
    deadline: Duration,
    sentiment: SentimentAnalyzer,
    opportunities: OpportunityDetector,
    process: ProcessAdherenceScorer,
    action_items: ActionItemExtractor,
}

impl AnalysisOrchestrator {
    pub fn new(
        db_path: PathBuf,
        provider: Option<Arc<dyn CompletionProvider>>,
        deadline: Duration,
    ) -> Self {
        Self {
            db_path,
            deadline,
            sentiment: SentimentAnalyzer::new(provider.clone()),
            opportunities: OpportunityDetector::new(provider.clone()),
            process: ProcessAdherenceScorer::new(provider.clone()),
            action_items: ActionItemExtractor::new(provider),
        }
    }

    /// Analyze a recording under the configured deadline.
    pub async fn analyze(&self, recording_id: i64) -> Result<AnalysisReport, AnalysisError> {
        self.analyze_with_deadline(recording_id, self.deadline).await
    }

    /// Analyze a recording under a caller-supplied deadline. On expiry the
    /// in-flight branches are dropped (cancelling any provider calls) and
    /// nothing is persisted.
    pub async fn analyze_with_deadline(
        &self,
        recording_id: i64,
        deadline: Duration,
    ) -> Result<AnalysisReport, AnalysisError> {
        let conn = db::open_at(&self.db_path)?;

        let context = RecordingRepository::get_with_context(&conn, recording_id)?
            .ok_or(AnalysisError::RecordingNotFound(recording_id))?;

        let transcript = context
            .recording
            .transcript_text
            .filter(|text| !text.is_empty())
            .ok_or(AnalysisError::TranscriptMissing(recording_id))?;

        let template = context.template;

        info!(
            "Analyzing recording {} ({} chars, template: {})",
            recording_id,
            transcript.len(),
            template.as_ref().map(|t| t.name.as_str()).unwrap_or("none"),
        );

        // Fixed-arity fan-out: the branch set is known at compile time, so
        // a typed join beats a dynamic task list. Without a template the
        // process branch is skipped entirely, not run on empty input.
        let branches = async {
            tokio::join!(
                self.sentiment.run(&transcript),
                self.opportunities.run(&transcript),
                async {
                    match &template {
                        Some(t) => Some(self.process.score(&transcript, t).await),
                        None => None,
                    }
                },
                self.action_items.run(&transcript),
            )
        };

        let (sentiment, opportunities, process_score, action_items) =
            tokio::time::timeout(deadline, branches)
                .await
                .map_err(|_| AnalysisError::DeadlineExceeded(deadline))?;

        let confidence = aggregate_confidence(&sentiment, &opportunities, process_score.as_ref());

        let report = AnalysisReport {
            sentiment,
            opportunities,
            process_score,
            action_items,
            confidence,
        };

        // Upsert before the status transition; a failed upsert leaves the
        // recording's status untouched.
        AnalysisRepository::upsert(&conn, recording_id, &report)?;
        RecordingRepository::set_status(&conn, recording_id, RecordingStatus::Completed)?;

        info!(
            "Recording {} analyzed: confidence {:.3}, {} opportunities, {} action items",
            recording_id,
            report.confidence,
            report.opportunities.len(),
            report.action_items.len(),
        );

        Ok(report)
    }
}
