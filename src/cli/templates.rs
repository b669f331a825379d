use anyhow::{Context, Result};

use super::args::{TemplatesCliArgs, TemplatesCommand};
use crate::db::{
    self,
    templates::{ProcessStep, TemplateRepository},
};

pub fn handle_templates_command(args: TemplatesCliArgs) -> Result<()> {
    match args.command {
        TemplatesCommand::Add {
            name,
            file,
            org,
            active,
        } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read steps from {:?}", file))?;
            let steps: Vec<ProcessStep> =
                serde_json::from_str(&content).context("Steps file must be a JSON array of {name, keywords} objects")?;

            let conn = db::init_db()?;
            let id = TemplateRepository::insert(&conn, org, &name, active, &steps)?;

            println!(
                "Template {} '{}' created with {} steps{}",
                id,
                name,
                steps.len(),
                if active { " (active)" } else { "" },
            );
        }
        TemplatesCommand::List { org } => {
            let conn = db::init_db()?;
            let templates = TemplateRepository::list_for_org(&conn, org)?;

            if templates.is_empty() {
                println!("No templates for organization {}", org);
                return Ok(());
            }

            for template in templates {
                println!(
                    "{:>5}  {:<8}  {} ({} steps)",
                    template.id,
                    if template.is_active { "active" } else { "-" },
                    template.name,
                    template.steps.len(),
                );
            }
        }
    }

    Ok(())
}
