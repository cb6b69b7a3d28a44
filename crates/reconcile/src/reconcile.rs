// Path: crates/reconcile/src/reconcile.rs
use crate::identity::{IdGenerator, IdentityResolver, UuidV4Generator};
use crate::normalize::normalize;
use crate::persist::persist;
use crate::sort::sort_results;
use std::path::Path;
use tracing::info;
use vuls_telemetry::StageTimer;
use vuls_types::config::ConfigDocument;
use vuls_types::scan::ScanResult;
use vuls_types::Result;

/// Summary of one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Scan results processed.
    pub results: usize,
    /// Identifiers created for targets that had none.
    pub generated: usize,
    /// Invalid identifiers that were replaced.
    pub replaced: usize,
    /// Server entries normalized against the default.
    pub servers: usize,
}

/// Drives identifier resolution and normalization over a batch.
pub struct Reconciler<G> {
    resolver: IdentityResolver<G>,
}

impl<G: IdGenerator> Reconciler<G> {
    pub fn new(generator: G) -> Self {
        Self {
            resolver: IdentityResolver::new(generator),
        }
    }

    /// Sorts `results`, then resolves and normalizes.
    pub fn run(&mut self, doc: &mut ConfigDocument, results: &mut [ScanResult]) -> ReconcileReport {
        sort_results(results);
        self.run_ordered(doc, results.iter_mut())
    }

    /// Resolves results in the order given, then normalizes every server
    /// entry exactly once.
    ///
    /// Callers that keep results alongside other data (file paths, say) sort
    /// with [`crate::sort::compare`] themselves and use this entry point.
    pub fn run_ordered<'r, I>(&mut self, doc: &mut ConfigDocument, results: I) -> ReconcileReport
    where
        I: IntoIterator<Item = &'r mut ScanResult>,
    {
        let _timer = StageTimer::new("reconcile");
        let generated_before = self.resolver.generated();
        let replaced_before = self.resolver.replaced();

        let mut count = 0;
        for result in results {
            self.resolver.resolve(result, doc);
            count += 1;
        }
        let servers = normalize_servers(doc);

        let report = ReconcileReport {
            results: count,
            generated: self.resolver.generated() - generated_before,
            replaced: self.resolver.replaced() - replaced_before,
            servers,
        };
        info!(
            target: "reconcile",
            results = report.results,
            generated = report.generated,
            replaced = report.replaced,
            servers = report.servers,
            "Reconciled scan targets"
        );
        report
    }
}

/// Normalizes every non-default server entry. Returns how many were visited.
///
/// Runs after all entries have been created, so no entry appears or
/// disappears while the map is iterated.
pub fn normalize_servers(doc: &mut ConfigDocument) -> usize {
    let default = &doc.default;
    for entry in doc.servers.values_mut() {
        normalize(entry, default);
    }
    doc.servers.len()
}

/// Assigns random UUIDs where missing or invalid, normalizes the
/// configuration, and writes it to `config_path`.
///
/// On error the in-memory document and `results` may already carry the
/// resolved identifiers.
pub fn ensure_uuids(
    config_path: &Path,
    doc: &mut ConfigDocument,
    results: &mut [ScanResult],
) -> Result<ReconcileReport> {
    let report = Reconciler::new(UuidV4Generator).run(doc, results);
    persist(doc, config_path)?;
    Ok(report)
}
