//! CLI command handlers. Argument definitions live in [`args`]; each
//! subcommand has its own handler module.

pub mod args;

mod analyze;
mod provider;
mod recordings;
mod serve;
mod templates;

pub use analyze::handle_analyze_command;
pub use args::{Cli, CliCommand};
pub use provider::handle_provider_command;
pub use recordings::handle_recordings_command;
pub use serve::handle_serve_command;
pub use templates::handle_templates_command;

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::analysis::AnalysisOrchestrator;
use crate::config::Config;
use crate::{completion, db, global};

/// Build the orchestrator from config, ensuring the database exists.
pub(crate) fn build_orchestrator(config: &Config) -> Result<(Arc<AnalysisOrchestrator>, PathBuf)> {
    let db_path = global::db_file()?;
    db::init_db()?;

    let provider = completion::from_config(&config.completion)?;
    let orchestrator = AnalysisOrchestrator::new(
        db_path.clone(),
        provider,
        Duration::from_secs(config.analysis.deadline_seconds),
    );

    Ok((Arc::new(orchestrator), db_path))
}
