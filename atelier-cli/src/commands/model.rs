//! `atelier model` — print the content model shipped with this binary.

use anyhow::{Context, Result};
use clap::Args;

use atelier_content::ContentModel;

/// Arguments for `atelier model`.
#[derive(Args, Debug)]
pub struct ModelArgs {
    /// Print JSON instead of YAML.
    #[arg(long)]
    pub json: bool,
}

impl ModelArgs {
    pub fn run(self) -> Result<()> {
        let model = ContentModel::embedded().context("embedded content model is invalid")?;
        let rendered = if self.json {
            serde_json::to_string_pretty(&model).context("failed to serialize content model")?
        } else {
            serde_yaml::to_string(&model).context("failed to serialize content model")?
        };
        println!("{rendered}");
        Ok(())
    }
}
