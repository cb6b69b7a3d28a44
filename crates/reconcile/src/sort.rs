// Path: crates/reconcile/src/sort.rs
use std::cmp::Ordering;
use vuls_types::scan::ScanResult;

/// Orders results by server name, then container ID.
///
/// Host and image results have an empty container ID and therefore sort
/// before the containers of the same server.
pub fn compare(a: &ScanResult, b: &ScanResult) -> Ordering {
    a.server_name
        .cmp(&b.server_name)
        .then_with(|| a.container.container_id.cmp(&b.container.container_id))
}

/// Sorts a batch in place so that UUID assignment order is reproducible.
pub fn sort_results(results: &mut [ScanResult]) {
    results.sort_by(compare);
}
