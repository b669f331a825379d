use anyhow::Result;
use std::time::Duration;

use super::args::AnalyzeCliArgs;
use super::build_orchestrator;
use crate::config::Config;

pub async fn handle_analyze_command(args: AnalyzeCliArgs) -> Result<()> {
    let config = Config::load()?;
    let (orchestrator, _db_path) = build_orchestrator(&config)?;

    let report = match args.deadline_secs {
        Some(secs) => {
            orchestrator
                .analyze_with_deadline(args.recording_id, Duration::from_secs(secs))
                .await?
        }
        None => orchestrator.analyze(args.recording_id).await?,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
