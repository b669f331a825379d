use anyhow::Result;

use super::build_orchestrator;
use crate::api::ApiServer;
use crate::config::Config;

pub async fn handle_serve_command() -> Result<()> {
    let config = Config::load()?;
    let (orchestrator, db_path) = build_orchestrator(&config)?;

    ApiServer::new(config.api.port, orchestrator, db_path)
        .start()
        .await
}
