// Path: crates/cli/src/commands/ensure_uuids.rs

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use vuls_reconcile::loader::load_config;
use vuls_reconcile::persist::{persist, render};
use vuls_reconcile::results::{load_results, save_results};
use vuls_reconcile::{sort, Reconciler, UuidV4Generator};

#[derive(Parser, Debug)]
pub struct EnsureUuidsArgs {
    /// Directory holding one scan result JSON file per target.
    #[clap(long)]
    pub results_dir: PathBuf,
    /// Print the rewritten config.toml instead of saving config and results.
    #[clap(long)]
    pub dry_run: bool,
}

pub fn run(config: &Path, args: EnsureUuidsArgs) -> Result<()> {
    let mut doc = load_config(config)?;
    let mut files = load_results(&args.results_dir)?;
    files.sort_by(|a, b| sort::compare(&a.result, &b.result));

    let report = Reconciler::new(UuidV4Generator)
        .run_ordered(&mut doc, files.iter_mut().map(|f| &mut f.result));

    if args.dry_run {
        print!("{}", render(&doc)?);
        return Ok(());
    }

    let outcome = persist(&doc, config)
        .with_context(|| format!("saving UUIDs to {}", config.display()))?;
    save_results(&files)?;

    println!(
        "✅ {} results, {} new UUIDs, {} replaced. Config written to {} (previous: {})",
        report.results,
        report.generated,
        report.replaced,
        outcome.written.display(),
        outcome.backup.display()
    );
    Ok(())
}
