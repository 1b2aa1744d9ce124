//! `atelier provision` — push the embedded content model to the space.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use atelier_content::{plan, provision, ContentModel, ManagementClient, ProvisionOutcome, ProvisionResult};

use super::{init_tracing, load_config};

/// Arguments for `atelier provision`.
#[derive(Args, Debug)]
pub struct ProvisionArgs {
    /// Show what would be created without calling the management API.
    #[arg(long)]
    pub dry_run: bool,
}

impl ProvisionArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        init_tracing();
        let model = ContentModel::embedded().context("embedded content model is invalid")?;

        if self.dry_run {
            print_results(&plan(&model));
            return Ok(());
        }

        let config = load_config(config_path)?;
        let client = ManagementClient::from_config(&config)
            .context("provisioning needs a management token")?;
        let results = provision(&client, &model).context("provisioning stopped")?;
        print_results(&results);
        println!("{} content types provisioned.", results.len());
        Ok(())
    }
}

fn print_results(results: &[ProvisionResult]) {
    for result in results {
        match result.outcome {
            ProvisionOutcome::Activated { version } => {
                println!("{} {} (version {version})", "✓".green(), result.id);
            }
            ProvisionOutcome::Planned { fields } => {
                println!("{} {} ({fields} fields)", "would create".yellow(), result.id);
            }
        }
    }
}
