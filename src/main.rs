use anyhow::Result;
use callsight::cli::{
    handle_analyze_command, handle_provider_command, handle_recordings_command,
    handle_serve_command, handle_templates_command, Cli, CliCommand,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(CliCommand::Version) => {
            println!("Callsight {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(CliCommand::Analyze(args)) => handle_analyze_command(args).await,
        Some(CliCommand::Recordings(args)) => handle_recordings_command(args),
        Some(CliCommand::Templates(args)) => handle_templates_command(args),
        Some(CliCommand::Provider(args)) => handle_provider_command(args),
        Some(CliCommand::Serve) | None => handle_serve_command().await,
    }
}
