//! Aggregate confidence across the scorable sub-results.

use super::models::{Opportunity, ProcessScore, SentimentResult};

/// Score assumed for organizations without a process template: neither a
/// reward nor a penalty.
const NO_TEMPLATE_PROCESS_TERM: f64 = 0.5;

/// Mean of sentiment polarity, mean opportunity confidence, and normalized
/// process score. Commutative over branch completion order. The result is
/// not clamped: sentiment spans [-1, 1] while the other terms span [0, 1],
/// so the aggregate can leave [0, 1] at the extremes.
pub fn aggregate_confidence(
    sentiment: &SentimentResult,
    opportunities: &[Opportunity],
    process: Option<&ProcessScore>,
) -> f64 {
    let opportunity_term = if opportunities.is_empty() {
        0.0
    } else {
        opportunities.iter().map(|o| o.confidence).sum::<f64>() / opportunities.len() as f64
    };

    let process_term = process
        .map(|p| p.overall_score as f64 / 100.0)
        .unwrap_or(NO_TEMPLATE_PROCESS_TERM);

    (sentiment.score + opportunity_term + process_term) / 3.0
}
