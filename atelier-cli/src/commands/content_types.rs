//! `atelier content-types` — content types and their field schemas.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use atelier_content::{ContentFacade, DeliveryClient};
use atelier_core::DetailedContentType;
use atelier_server::routes::ContentTypesResponse;

use super::{delivery_mode, init_tracing, load_config, runtime};

/// Arguments for `atelier content-types`.
#[derive(Args, Debug)]
pub struct ContentTypesArgs {
    /// Emit the same JSON the HTTP API returns.
    #[arg(long)]
    pub json: bool,

    /// Read draft content from the preview API.
    #[arg(long)]
    pub preview: bool,
}

impl ContentTypesArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        init_tracing();
        let config = load_config(config_path)?;
        let client = DeliveryClient::from_config(&config, delivery_mode(self.preview))?;
        let facade = ContentFacade::new(Arc::new(client));

        let content_types = runtime()?
            .block_on(facade.detailed_content_types())
            .context("failed to fetch content types")?;

        if self.json {
            let payload = ContentTypesResponse {
                success: true,
                content_types,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize content types")?
            );
            return Ok(());
        }

        print_table(content_types);
        Ok(())
    }
}

#[derive(Tabled)]
struct ContentTypeRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "fields")]
    fields: usize,
    #[tabled(rename = "required")]
    required: usize,
    #[tabled(rename = "description")]
    description: String,
}

fn print_table(content_types: Vec<DetailedContentType>) {
    println!(
        "Atelier v{} | {} content types",
        env!("CARGO_PKG_VERSION"),
        content_types.len()
    );
    if content_types.is_empty() {
        println!("{}", "No content types found.".bright_black());
        return;
    }

    let rows: Vec<ContentTypeRow> = content_types
        .into_iter()
        .map(|ct| ContentTypeRow {
            id: ct.id.0,
            name: ct.name,
            fields: ct.fields.len(),
            required: ct.fields.iter().filter(|f| f.required).count(),
            description: ct.description.unwrap_or_default(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}
