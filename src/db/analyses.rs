//! Analysis record persistence.
//!
//! One analysis row per recording, enforced by a UNIQUE key on
//! recording_id. Re-analysis replaces every field in a single upsert
//! statement, so concurrent writers serialize at the row and the last one
//! wins wholesale. A mixed/partial row is never observable.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::analysis::models::AnalysisReport;

/// A stored analysis row.
#[derive(Debug, Clone)]
pub struct AnalysisRecord {
    pub id: i64,
    pub recording_id: i64,
    pub report: AnalysisReport,
    pub created_at: String,
    pub updated_at: String,
}

pub struct AnalysisRepository;

impl AnalysisRepository {
    /// Create-or-replace the analysis for a recording.
    pub fn upsert(conn: &Connection, recording_id: i64, report: &AnalysisReport) -> Result<()> {
        let sentiment =
            serde_json::to_string(&report.sentiment).context("Failed to serialize sentiment")?;
        let opportunities = serde_json::to_string(&report.opportunities)
            .context("Failed to serialize opportunities")?;
        let process_score = report
            .process_score
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .context("Failed to serialize process score")?;
        let action_items = serde_json::to_string(&report.action_items)
            .context("Failed to serialize action items")?;

        conn.execute(
            "INSERT INTO analyses (recording_id, sentiment, opportunities, process_score, action_items, confidence)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(recording_id) DO UPDATE SET
                 sentiment = excluded.sentiment,
                 opportunities = excluded.opportunities,
                 process_score = excluded.process_score,
                 action_items = excluded.action_items,
                 confidence = excluded.confidence,
                 updated_at = CURRENT_TIMESTAMP",
            params![
                recording_id,
                sentiment,
                opportunities,
                process_score,
                action_items,
                report.confidence,
            ],
        )
        .context("Failed to upsert analysis")?;

        Ok(())
    }

    pub fn get_for_recording(conn: &Connection, recording_id: i64) -> Result<Option<AnalysisRecord>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, recording_id, sentiment, opportunities, process_score, action_items,
                        confidence, created_at, updated_at
                 FROM analyses WHERE recording_id = ?1",
            )
            .context("Failed to prepare analysis query")?;

        stmt.query_row(params![recording_id], |row| {
            let sentiment_json: String = row.get(2)?;
            let opportunities_json: String = row.get(3)?;
            let process_json: Option<String> = row.get(4)?;
            let action_items_json: String = row.get(5)?;

            let report = AnalysisReport {
                sentiment: serde_json::from_str(&sentiment_json)
                    .map_err(|_| rusqlite::Error::InvalidQuery)?,
                opportunities: serde_json::from_str(&opportunities_json)
                    .map_err(|_| rusqlite::Error::InvalidQuery)?,
                process_score: process_json
                    .map(|json| serde_json::from_str(&json))
                    .transpose()
                    .map_err(|_| rusqlite::Error::InvalidQuery)?,
                action_items: serde_json::from_str(&action_items_json)
                    .map_err(|_| rusqlite::Error::InvalidQuery)?,
                confidence: row.get(6)?,
            };

            Ok(AnalysisRecord {
                id: row.get(0)?,
                recording_id: row.get(1)?,
                report,
                created_at: row.get(7)?,
                updated_at: row.get(8)?,
            })
        })
        .optional()
        .context("Failed to query analysis")
    }

    pub fn count_for_recording(conn: &Connection, recording_id: i64) -> Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM analyses WHERE recording_id = ?1",
            params![recording_id],
            |row| row.get(0),
        )
        .context("Failed to count analyses")
    }
}
