//! `atelier serve` — run the content HTTP API in the foreground.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use super::{delivery_mode, load_config};

/// Arguments for `atelier serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides ATELIER_BIND and the config file).
    #[arg(long)]
    pub bind: Option<SocketAddr>,

    /// Serve draft content from the preview API.
    #[arg(long)]
    pub preview: bool,
}

impl ServeArgs {
    pub fn run(self, config_path: Option<&Path>) -> Result<()> {
        let mut config = load_config(config_path)?;
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        println!("Serving content on http://{} (ctrl-c to stop)", config.bind);
        atelier_server::start_blocking(&config, delivery_mode(self.preview))
            .context("content server failed")
    }
}
