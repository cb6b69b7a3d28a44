// Path: crates/reconcile/src/loader.rs
use crate::normalize::inherit;
use std::fs;
use std::path::Path;
use tracing::debug;
use vuls_types::config::ConfigDocument;
use vuls_types::error::ConfigError;
use vuls_types::Result;

/// Reads `config.toml` and expands every server entry against `[default]`.
///
/// The returned document is the in-memory view a reconciliation run works
/// on: empty server fields already hold the inherited values.
pub fn load_config(path: &Path) -> Result<ConfigDocument> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut doc: ConfigDocument = toml::from_str(&text).map_err(|source| ConfigError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    expand(&mut doc);
    debug!(target: "reconcile", path = %path.display(), servers = doc.servers.len(), "Loaded config");
    Ok(doc)
}

/// Fills every server entry's empty fields from the default entry.
pub fn expand(doc: &mut ConfigDocument) {
    let default = &doc.default;
    for entry in doc.servers.values_mut() {
        *entry = inherit(entry, default);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_expands_servers() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[default]
port = "22"
user = "vuls"

[default.optional]
env = "prod"

[servers.web]
host = "10.0.0.1"
user = "admin"
"#,
        )
        .unwrap();

        let doc = load_config(&path).unwrap();
        let web = &doc.servers["web"];
        assert_eq!(web.port, "22");
        assert_eq!(web.user, "admin");
        assert_eq!(
            web.optional.as_ref().and_then(|o| o.get("env")),
            Some(&toml::Value::String("prod".into()))
        );
        // The template itself is left as written.
        assert_eq!(doc.default.host, "");
    }

    #[test]
    fn test_load_reports_decode_errors_with_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[servers.web\nhost = 1").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Decode { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_config(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
