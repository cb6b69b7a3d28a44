// Path: crates/reconcile/src/results.rs
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use vuls_types::error::ResultError;
use vuls_types::scan::ScanResult;

/// A scan result together with the file it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultFile {
    pub path: PathBuf,
    pub result: ScanResult,
}

/// Loads every `*.json` file directly inside `dir`, ordered by file name.
pub fn load_results(dir: &Path) -> Result<Vec<ResultFile>, ResultError> {
    let read_dir_err = |source| ResultError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = fs::read(&path).map_err(|source| ResultError::Read {
            path: path.clone(),
            source,
        })?;
        let result = serde_json::from_slice(&bytes).map_err(|source| ResultError::Decode {
            path: path.clone(),
            source,
        })?;
        files.push(ResultFile { path, result });
    }
    debug!(target: "reconcile", dir = %dir.display(), count = files.len(), "Loaded scan results");
    Ok(files)
}

/// Writes each result back to the file it came from as pretty JSON.
pub fn save_results(files: &[ResultFile]) -> Result<(), ResultError> {
    for file in files {
        let json = serde_json::to_vec_pretty(&file.result).map_err(|source| ResultError::Encode {
            path: file.path.clone(),
            source,
        })?;
        fs::write(&file.path, json).map_err(|source| ResultError::Write {
            path: file.path.clone(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_only_json_in_name_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("web.json"), r#"{"serverName":"web"}"#).unwrap();
        fs::write(dir.path().join("db.json"), r#"{"serverName":"db"}"#).unwrap();
        fs::write(dir.path().join("web_short.txt"), "summary").unwrap();

        let files = load_results(dir.path()).unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.result.server_name.as_str()).collect();
        assert_eq!(names, vec!["db", "web"]);
    }

    #[test]
    fn test_save_writes_back_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("web.json");
        fs::write(&path, r#"{"serverName":"web","reportedAt":"2019-01-01T00:00:00Z"}"#).unwrap();

        let mut files = load_results(dir.path()).unwrap();
        files[0].result.server_uuid = "2d4e5f60-1a2b-4c3d-8e9f-a0b1c2d3e4f5".into();
        save_results(&files).unwrap();

        let v: serde_json::Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(v["serverUUID"], "2d4e5f60-1a2b-4c3d-8e9f-a0b1c2d3e4f5");
        assert_eq!(v["reportedAt"], "2019-01-01T00:00:00Z");
    }

    #[test]
    fn test_bad_json_names_the_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{").unwrap();

        let err = load_results(dir.path()).unwrap_err();
        assert!(matches!(err, ResultError::Decode { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
