//! Process template persistence.
//!
//! Templates are an ordered checklist of conversation steps, each with
//! keyword triggers. The step list is stored as a JSON column.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessTemplate {
    pub id: i64,
    pub organization_id: i64,
    pub name: String,
    pub is_active: bool,
    pub steps: Vec<ProcessStep>,
}

pub struct TemplateRepository;

impl TemplateRepository {
    /// Insert a template. Returns the new template ID.
    pub fn insert(
        conn: &Connection,
        organization_id: i64,
        name: &str,
        is_active: bool,
        steps: &[ProcessStep],
    ) -> Result<i64> {
        let steps_json = serde_json::to_string(steps).context("Failed to serialize steps")?;

        conn.execute(
            "INSERT INTO process_templates (organization_id, name, is_active, steps)
             VALUES (?1, ?2, ?3, ?4)",
            params![organization_id, name, is_active, steps_json],
        )
        .context("Failed to insert process template")?;

        Ok(conn.last_insert_rowid())
    }

    pub fn get(conn: &Connection, id: i64) -> Result<Option<ProcessTemplate>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, organization_id, name, is_active, steps
                 FROM process_templates WHERE id = ?1",
            )
            .context("Failed to prepare template query")?;

        let mut rows = stmt
            .query_map(params![id], row_to_template)
            .context("Failed to query template")?;

        match rows.next() {
            Some(Ok(template)) => Ok(Some(template)),
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    /// The active template used for scoring. If several are flagged active
    /// the tie-break is whichever row SQLite returns first.
    pub fn active_for_org(conn: &Connection, organization_id: i64) -> Result<Option<ProcessTemplate>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, organization_id, name, is_active, steps
                 FROM process_templates
                 WHERE organization_id = ?1 AND is_active = 1
                 LIMIT 1",
            )
            .context("Failed to prepare active template query")?;

        let mut rows = stmt
            .query_map(params![organization_id], row_to_template)
            .context("Failed to query active template")?;

        match rows.next() {
            Some(Ok(template)) => Ok(Some(template)),
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }

    pub fn list_for_org(conn: &Connection, organization_id: i64) -> Result<Vec<ProcessTemplate>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, organization_id, name, is_active, steps
                 FROM process_templates WHERE organization_id = ?1 ORDER BY id",
            )
            .context("Failed to prepare template list query")?;

        let rows = stmt
            .query_map(params![organization_id], row_to_template)
            .context("Failed to list templates")?;

        let mut templates = Vec::new();
        for row in rows {
            templates.push(row?);
        }

        Ok(templates)
    }
}

fn row_to_template(row: &rusqlite::Row<'_>) -> rusqlite::Result<ProcessTemplate> {
    let steps_json: String = row.get(4)?;
    let steps: Vec<ProcessStep> =
        serde_json::from_str(&steps_json).map_err(|_| rusqlite::Error::InvalidQuery)?;

    Ok(ProcessTemplate {
        id: row.get(0)?,
        organization_id: row.get(1)?,
        name: row.get(2)?,
        is_active: row.get(3)?,
        steps,
    })
}
