//! Result types produced by the analyzer branches.
//!
//! Wire names are camelCase because the same shapes are used for the
//! completion provider's JSON contract, the stored record, and the API
//! responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmotionScores {
    pub joy: f64,
    pub anger: f64,
    pub surprise: f64,
    pub sadness: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SentimentResult {
    pub overall: SentimentLabel,
    /// Polarity in [-1, 1].
    pub score: f64,
    pub emotions: EmotionScores,
    pub key_phrases: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OpportunityType {
    Upsell,
    CrossSell,
    Renewal,
    Expansion,
    FollowUp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "type")]
    pub kind: OpportunityType,
    pub description: String,
    /// Detection confidence in [0, 1].
    pub confidence: f64,
    #[serde(default)]
    pub context: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionCategory {
    FollowUp,
    Task,
    Reminder,
    Decision,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionItem {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: ActionCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
}

/// Keyword coverage for one process step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepScore {
    pub name: String,
    /// Percentage of the step's keywords found, rounded to [0, 100].
    pub score: u8,
    pub detected: bool,
    pub keywords: Vec<String>,
    pub matched_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessScore {
    pub overall_score: u8,
    pub completed_steps: usize,
    pub total_steps: usize,
    pub step_scores: Vec<StepScore>,
    pub missed_steps: Vec<String>,
    pub recommendations: Vec<String>,
}

/// The combined analysis for one recording. Either every field is present
/// (process only when a template was resolved) or nothing is persisted;
/// there is no partial shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub sentiment: SentimentResult,
    pub opportunities: Vec<Opportunity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_score: Option<ProcessScore>,
    pub action_items: Vec<ActionItem>,
    pub confidence: f64,
}
