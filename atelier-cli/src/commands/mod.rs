pub mod availability;
pub mod content_types;
pub mod entries;
pub mod model;
pub mod provision;
pub mod serve;

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use atelier_core::{config, AtelierConfig, AvailabilityStatus, DeliveryMode};

pub(crate) fn load_config(explicit: Option<&Path>) -> Result<AtelierConfig> {
    config::load(explicit).context(
        "failed to load configuration; set the CONTENTFUL_* variables or write ~/.atelier/config.yaml",
    )
}

pub(crate) fn delivery_mode(preview: bool) -> DeliveryMode {
    if preview {
        DeliveryMode::Preview
    } else {
        DeliveryMode::Published
    }
}

/// Diagnostics go to stderr so `--json` output stays clean.
pub(crate) fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")
}

pub(crate) fn paint_status(status: AvailabilityStatus) -> String {
    match status {
        AvailabilityStatus::Available => status.label().green().to_string(),
        AvailabilityStatus::Sold => status.label().red().to_string(),
        AvailabilityStatus::NotForSale => status.label().yellow().to_string(),
    }
}
