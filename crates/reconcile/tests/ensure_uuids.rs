// Path: crates/reconcile/tests/ensure_uuids.rs

use std::fs;
use std::path::Path;
use tempfile::tempdir;
use vuls_reconcile::identity::is_canonical;
use vuls_reconcile::loader::load_config;
use vuls_reconcile::persist::{backup_path, persist, HEADER_COMMENT};
use vuls_reconcile::reconcile::normalize_servers;
use vuls_reconcile::{ensure_uuids, IdGenerator, Reconciler};
use vuls_types::scan::ScanResult;

const CONFIG: &str = r##"[slack]
hookURL = "https://hooks.slack.com/services/abc"
channel = "#vuls"

[email]
from = "vuls@example.com"

[default]
port = "22"
user = "vuls"
scanMode = ["fast"]

[default.optional]
foo = "1"
bar = "2"

[servers.web]
host = "10.0.0.1"
user = "vuls"
scanMode = ["fast"]

[servers.web.uuids]
web = "not-a-uuid"

[servers.web.optional]
foo = "1"
bar = "3"

[servers.db]
host = "10.0.0.2"
port = "2222"
"##;

const UNMODELLED: &str = r##"[wpscan]
token = "abc"
detectInactive = false

[default]
port = "22"
user = "vuls"
ignorePkgsRegexp = ["^kernel"]

[servers.web]
host = "10.0.0.1"
user = "vuls"
memo = "frontend"
containersIncluded = ["${running}"]
ignorePkgsRegexp = ["^kernel"]

[servers.web.containers.nginx]
cpeNames = ["cpe:/a:nginx:nginx:1.14.0"]
ignoreCves = ["CVE-2014-0160"]
"##;

struct Sequential(u64);

impl IdGenerator for Sequential {
    fn generate(&mut self) -> String {
        self.0 += 1;
        format!("00000000-0000-4000-8000-{:012x}", self.0)
    }
}

fn batch() -> Vec<ScanResult> {
    vec![
        ScanResult::host("db"),
        ScanResult::container("web", "c2", "redis"),
        ScanResult::host("web"),
        ScanResult::container("web", "c1", "nginx"),
        ScanResult::image("registry", "alpine", "3.9"),
    ]
}

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, CONFIG).unwrap();
    path
}

#[test]
fn test_full_run_with_deterministic_ids() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path());

    let mut doc = load_config(&path).unwrap();
    let mut results = batch();
    let report = Reconciler::new(Sequential(0)).run(&mut doc, &mut results);
    persist(&doc, &path).unwrap();

    // Sorted: db, registry(image), web(host), web/c1, web/c2.
    let order: Vec<String> = results
        .iter()
        .map(|r| format!("{}/{}", r.server_name, r.container.container_id))
        .collect();
    assert_eq!(order, vec!["db/", "registry/", "web/", "web/c1", "web/c2"]);

    // db: 1; registry host: 2, image: 3; web host (invalid, replaced): 4;
    // nginx: 5; redis: 6.
    let id = |n: u64| format!("00000000-0000-4000-8000-{:012x}", n);
    assert_eq!(results[0].server_uuid, id(1));
    assert_eq!(results[1].server_uuid, id(3));
    assert_eq!(results[2].server_uuid, id(4));
    assert_eq!(results[3].server_uuid, id(4));
    assert_eq!(results[3].container.uuid, id(5));
    assert_eq!(results[4].container.uuid, id(6));
    assert_eq!(report.generated, 5);
    assert_eq!(report.replaced, 1);

    let saved = fs::read_to_string(&path).unwrap();
    println!("Saved config:\n{}", saved);
    assert!(saved.starts_with(HEADER_COMMENT));
    assert!(saved.contains("[slack]"));
    assert!(!saved.contains("[email]"));
    assert!(saved.contains(r#""nginx@web" = "00000000-0000-4000-8000-000000000005""#));
    assert!(saved.contains(r#""alpine:3.9@registry" = "00000000-0000-4000-8000-000000000003""#));
    assert!(!saved.contains("not-a-uuid"));
    assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), CONFIG);

    // The image's host entry was created on demand.
    let reloaded = load_config(&path).unwrap();
    assert_eq!(reloaded.servers["registry"].uuids["registry"], id(2));
}

#[test]
fn test_saved_config_elides_defaults() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path());

    let mut doc = load_config(&path).unwrap();
    Reconciler::new(Sequential(0)).run(&mut doc, &mut batch());

    let web = &doc.servers["web"];
    assert_eq!(web.user, "");
    assert_eq!(web.port, "");
    assert!(web.scan_mode.is_empty());
    let optional = web.optional.as_ref().unwrap();
    assert_eq!(optional.len(), 1);
    assert_eq!(optional["bar"], toml::Value::String("3".into()));

    let db = &doc.servers["db"];
    assert_eq!(db.port, "2222");
    // db had no optional table of its own; the inherited copy is dropped.
    assert_eq!(db.optional, None);
}

#[test]
fn test_rerun_is_stable() {
    let dir = tempdir().unwrap();
    let path = write_config(dir.path());

    let mut doc = load_config(&path).unwrap();
    let mut results = batch();
    ensure_uuids(&path, &mut doc, &mut results).unwrap();
    let first = fs::read_to_string(&path).unwrap();

    let mut doc = load_config(&path).unwrap();
    let mut again = batch();
    let report = ensure_uuids(&path, &mut doc, &mut again).unwrap();
    let second = fs::read_to_string(&path).unwrap();

    assert_eq!(report.generated, 0);
    assert_eq!(report.replaced, 0);
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(backup_path(&path)).unwrap(), first);
    for (a, b) in results.iter().zip(&again) {
        assert_eq!(a.server_uuid, b.server_uuid);
        assert_eq!(a.container.uuid, b.container.uuid);
        assert!(is_canonical(&b.server_uuid));
    }
}

#[test]
fn test_unmodelled_settings_survive_rewrite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, UNMODELLED).unwrap();

    let before = load_config(&path).unwrap();
    let mut doc = before.clone();
    normalize_servers(&mut doc);
    persist(&doc, &path).unwrap();

    let saved = fs::read_to_string(&path).unwrap();
    println!("Saved config:\n{}", saved);
    assert!(saved.contains("[wpscan]"));
    assert!(saved.contains(r#"memo = "frontend""#));
    assert!(saved.contains("containersIncluded"));
    assert!(saved.contains("[servers.web.containers.nginx]"));

    let after = load_config(&path).unwrap();
    assert_eq!(after, before);
    assert_eq!(after.servers["web"].user, "vuls");
    assert_eq!(
        after.default.extra["ignorePkgsRegexp"],
        before.default.extra["ignorePkgsRegexp"]
    );
}

#[cfg(unix)]
#[test]
fn test_symlinked_config_rewrites_target() {
    let dir = tempdir().unwrap();
    let real_dir = dir.path().join("etc");
    fs::create_dir(&real_dir).unwrap();
    let target = write_config(&real_dir);
    let link = dir.path().join("config.toml");
    std::os::unix::fs::symlink("etc/config.toml", &link).unwrap();

    let mut doc = load_config(&link).unwrap();
    let report = ensure_uuids(&link, &mut doc, &mut batch()).unwrap();

    assert_eq!(report.results, 5);
    assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    assert_eq!(fs::read(backup_path(&target)).unwrap(), CONFIG.as_bytes());
    assert!(!backup_path(&link).exists());
    assert!(fs::read_to_string(&target).unwrap().starts_with(HEADER_COMMENT));
}
