use anyhow::{Context, Result};
use std::io::Read;

use super::args::{RecordingsCliArgs, RecordingsCommand};
use crate::db::{
    self,
    analyses::AnalysisRepository,
    recordings::RecordingRepository,
};

pub fn handle_recordings_command(args: RecordingsCliArgs) -> Result<()> {
    match args.command {
        RecordingsCommand::Add {
            file,
            title,
            org,
            duration,
        } => {
            let transcript = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read transcript from {:?}", path))?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read transcript from stdin")?;
                    buffer
                }
            };

            if transcript.trim().is_empty() {
                anyhow::bail!("Transcript is empty");
            }

            let conn = db::init_db()?;
            let id = RecordingRepository::insert(
                &conn,
                org,
                title.as_deref(),
                Some(&transcript),
                duration,
            )?;

            println!("Recording {} created ({} chars)", id, transcript.len());
        }
        RecordingsCommand::List { limit } => {
            let conn = db::init_db()?;
            let recordings = RecordingRepository::list(&conn, limit)?;

            if recordings.is_empty() {
                println!("No recordings found");
                return Ok(());
            }

            for recording in recordings {
                println!(
                    "{:>5}  {:<10}  {:<19}  {}",
                    recording.id,
                    recording.status,
                    recording.created_at,
                    recording.title.as_deref().unwrap_or("(untitled)"),
                );
            }
        }
        RecordingsCommand::Show { id } => {
            let conn = db::init_db()?;
            let recording = RecordingRepository::get(&conn, id)?
                .with_context(|| format!("Recording {} not found", id))?;

            println!("{}", serde_json::to_string_pretty(&recording)?);

            if let Some(analysis) = AnalysisRepository::get_for_recording(&conn, id)? {
                println!("{}", serde_json::to_string_pretty(&analysis.report)?);
            } else {
                println!("No analysis stored for recording {}", id);
            }
        }
    }

    Ok(())
}
