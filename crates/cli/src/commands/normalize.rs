// Path: crates/cli/src/commands/normalize.rs

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use vuls_reconcile::loader::load_config;
use vuls_reconcile::persist::{persist, render};
use vuls_reconcile::reconcile::normalize_servers;

#[derive(Parser, Debug)]
pub struct NormalizeArgs {
    /// Print the normalized config.toml instead of saving it.
    #[clap(long)]
    pub dry_run: bool,
}

pub fn run(config: &Path, args: NormalizeArgs) -> Result<()> {
    let mut doc = load_config(config)?;
    let servers = normalize_servers(&mut doc);

    if args.dry_run {
        print!("{}", render(&doc)?);
        return Ok(());
    }

    let outcome = persist(&doc, config)
        .with_context(|| format!("saving normalized config to {}", config.display()))?;
    println!(
        "✅ Normalized {} servers in {} (previous: {})",
        servers,
        outcome.written.display(),
        outcome.backup.display()
    );
    Ok(())
}
