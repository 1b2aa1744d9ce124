//! Atelier — artwork content tooling.
//!
//! # Usage
//!
//! ```text
//! atelier serve [--bind ADDR] [--preview]
//! atelier content-types [--json] [--preview]
//! atelier entries <content-type> [--limit N] [--json] [--preview]
//! atelier availability <entry-id> [--set STATUS | --toggle] [--locale LOCALE]
//! atelier provision [--dry-run]
//! atelier model [--json]
//! ```
//!
//! Every command accepts `--config <path>` in place of `~/.atelier/config.yaml`.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    availability::AvailabilityArgs, content_types::ContentTypesArgs, entries::EntriesArgs,
    model::ModelArgs, provision::ProvisionArgs, serve::ServeArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "atelier",
    version,
    about = "Browse, serve and manage artwork content",
    long_about = None,
)]
struct Cli {
    /// Config file to read instead of ~/.atelier/config.yaml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the content HTTP API.
    Serve(ServeArgs),

    /// List content types with their field schemas.
    ContentTypes(ContentTypesArgs),

    /// List entries of one content type.
    Entries(EntriesArgs),

    /// Show or change an artwork's availability.
    Availability(AvailabilityArgs),

    /// Create or update the content model in the space.
    Provision(ProvisionArgs),

    /// Print the embedded content model.
    Model(ModelArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();
    match cli.command {
        Commands::Serve(args) => args.run(config),
        Commands::ContentTypes(args) => args.run(config),
        Commands::Entries(args) => args.run(config),
        Commands::Availability(args) => args.run(config),
        Commands::Provision(args) => args.run(config),
        Commands::Model(args) => args.run(),
    }
}
