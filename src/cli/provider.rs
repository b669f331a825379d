use anyhow::Result;

use super::args::{ProviderCliArgs, ProviderCommand};
use crate::completion;
use crate::config::Config;

pub fn handle_provider_command(args: ProviderCliArgs) -> Result<()> {
    match args.command {
        ProviderCommand::Show => {
            let config = Config::load()?;
            let info = completion::provider_info(&config.completion);

            println!("Provider:    {}", info.provider.as_deref().unwrap_or("(none)"));
            println!("Model:       {}", info.model.as_deref().unwrap_or("(default)"));
            println!(
                "Endpoint:    {}",
                info.api_endpoint.as_deref().unwrap_or("(default)")
            );
            println!("API key:     {}", if info.has_api_key { "set" } else { "not set" });
            println!(
                "Mode:        {}",
                if info.heuristic_only {
                    "heuristic-only (no completions issued)"
                } else {
                    "completion-backed with heuristic fallback"
                }
            );
        }
    }

    Ok(())
}
