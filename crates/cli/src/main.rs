// Path: crates/cli/src/main.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Vuls Reconcile CLI
//!
//! Assigns UUIDs to scan targets and keeps `config.toml` minimal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vuls_telemetry::LogFormat;

mod commands;

use commands::*;

#[derive(Parser, Debug)]
#[clap(
    name = "vuls-reconcile",
    version,
    about = "Assign scan target UUIDs and normalize config.toml.",
    long_about = "Ensures every scanned host, container and image has a valid UUID recorded in config.toml, strips server settings that repeat [default], and rewrites the file keeping the previous version as config.toml.bak."
)]
struct Cli {
    /// Path to config.toml (symlinks are followed).
    #[clap(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Log record encoding on stderr: json or text.
    #[clap(long, global = true, default_value = "json")]
    log_format: LogFormat,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assign UUIDs for the scan results in a directory and save them.
    EnsureUuids(ensure_uuids::EnsureUuidsArgs),

    /// Elide default values from every server entry.
    Normalize(normalize::NormalizeArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    vuls_telemetry::init_tracing(cli.log_format)?;

    match cli.command {
        Commands::EnsureUuids(args) => ensure_uuids::run(&cli.config, args),
        Commands::Normalize(args) => normalize::run(&cli.config, args),
    }
}
