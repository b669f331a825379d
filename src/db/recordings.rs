//! Recording persistence.
//!
//! A recording owns its transcript text and at most one analysis. Follows
//! the raw-SQL repository pattern used across this module.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use super::templates::{ProcessTemplate, TemplateRepository};

/// Lifecycle state of a recording. The analysis orchestrator writes only
/// `completed`; the other states belong to the surrounding ingest and
/// transcription stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl RecordingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "processing" => Some(Self::Processing),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// A recording row from the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingRecord {
    pub id: i64,
    pub organization_id: i64,
    pub title: Option<String>,
    pub status: String,
    pub transcript_text: Option<String>,
    pub duration_seconds: Option<i64>,
    pub created_at: String,
}

/// Everything the analysis pipeline needs about one recording: the row
/// itself plus the owning organization's active process template, if any.
#[derive(Debug, Clone)]
pub struct RecordingContext {
    pub recording: RecordingRecord,
    pub template: Option<ProcessTemplate>,
}

pub struct RecordingRepository;

impl RecordingRepository {
    /// Insert a recording (status = pending). Returns the new recording ID.
    pub fn insert(
        conn: &Connection,
        organization_id: i64,
        title: Option<&str>,
        transcript_text: Option<&str>,
        duration_seconds: Option<i64>,
    ) -> Result<i64> {
        conn.execute(
            "INSERT INTO recordings (organization_id, title, status, transcript_text, duration_seconds)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                organization_id,
                title,
                RecordingStatus::Pending.as_str(),
                transcript_text,
                duration_seconds,
            ],
        )
        .context("Failed to insert recording")?;

        Ok(conn.last_insert_rowid())
    }

    pub fn get(conn: &Connection, id: i64) -> Result<Option<RecordingRecord>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, organization_id, title, status, transcript_text, duration_seconds, created_at
                 FROM recordings WHERE id = ?1",
            )
            .context("Failed to prepare recording query")?;

        let mut rows = stmt
            .query_map(params![id], row_to_recording)
            .context("Failed to query recording")?;

        match rows.next() {
            Some(Ok(record)) => Ok(Some(record)),
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    /// Load a recording together with its organization's active template.
    pub fn get_with_context(conn: &Connection, id: i64) -> Result<Option<RecordingContext>> {
        let Some(recording) = Self::get(conn, id)? else {
            return Ok(None);
        };

        let template = TemplateRepository::active_for_org(conn, recording.organization_id)?;

        Ok(Some(RecordingContext {
            recording,
            template,
        }))
    }

    /// List recordings, newest first.
    pub fn list(conn: &Connection, limit: usize) -> Result<Vec<RecordingRecord>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, organization_id, title, status, transcript_text, duration_seconds, created_at
                 FROM recordings ORDER BY created_at DESC, id DESC LIMIT ?1",
            )
            .context("Failed to prepare recordings list query")?;

        let rows = stmt
            .query_map(params![limit as i64], row_to_recording)
            .context("Failed to list recordings")?;

        let mut recordings = Vec::new();
        for row in rows {
            recordings.push(row?);
        }

        Ok(recordings)
    }

    pub fn set_status(conn: &Connection, id: i64, status: RecordingStatus) -> Result<()> {
        conn.execute(
            "UPDATE recordings SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )
        .context("Failed to update recording status")?;
        Ok(())
    }
}

fn row_to_recording(row: &rusqlite::Row<'_>) -> rusqlite::Result<RecordingRecord> {
    Ok(RecordingRecord {
        id: row.get(0)?,
        organization_id: row.get(1)?,
        title: row.get(2)?,
        status: row.get(3)?,
        transcript_text: row.get(4)?,
        duration_seconds: row.get(5)?,
        created_at: row.get(6)?,
    })
}
