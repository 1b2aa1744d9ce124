//! `atelier entries` — entries of one content type.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use atelier_content::{ContentFacade, DeliveryClient, DEFAULT_ENTRY_LIMIT};
use atelier_core::{AvailabilityStatus, ContentTypeId, Entry};
use atelier_server::routes::EntriesResponse;

use super::{delivery_mode, init_tracing, load_config, paint_status, runtime};

/// Arguments for `atelier entries`.
#[derive(Args, Debug)]
pub struct EntriesArgs {
    /// Content type id, e.g. `artwork`.
    pub content_type: String,

    /// Maximum number of entries to fetch.
    #[arg(long, default_value_t = DEFAULT_ENTRY_LIMIT)]
    pub limit: u32,

    /// Emit the same JSON the HTTP API returns.
    #[arg(long)]
    pub json: bool,

    /// Read draft content from the preview API.
    #[arg(long)]
    pub preview: bool,
}

impl EntriesArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        init_tracing();
        let config = load_config(config_path)?;
        let client = DeliveryClient::from_config(&config, delivery_mode(self.preview))?;
        let facade = ContentFacade::new(Arc::new(client));
        let content_type = ContentTypeId(self.content_type);

        let entries =
            runtime()?.block_on(facade.entries_by_type(&content_type, Some(self.limit)));

        if self.json {
            let payload = EntriesResponse {
                success: true,
                entries,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize entries")?
            );
            return Ok(());
        }

        print_table(&content_type, entries);
        Ok(())
    }
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "availability")]
    availability: String,
    #[tabled(rename = "updated")]
    updated: String,
}

fn print_table(content_type: &ContentTypeId, entries: Vec<Entry>) {
    println!("{} | {} entries", content_type.0.bold(), entries.len());
    if entries.is_empty() {
        println!("{}", "No entries found.".bright_black());
        return;
    }

    let rows: Vec<EntryRow> = entries.into_iter().map(entry_row).collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn entry_row(entry: Entry) -> EntryRow {
    let text = |key: &str| entry.fields.get(key).and_then(|v| v.as_str());
    let title = text("title").or_else(|| text("name")).unwrap_or("-").to_string();
    let availability = match text("availability") {
        Some(raw) => match raw.parse::<AvailabilityStatus>() {
            Ok(status) => paint_status(status),
            Err(_) => raw.to_string(),
        },
        None => "-".to_string(),
    };
    let updated = entry
        .sys
        .updated_at
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());

    EntryRow {
        id: entry.sys.id.clone(),
        title,
        availability,
        updated,
    }
}
