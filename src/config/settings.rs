//! Application settings and dataset path resolution.

use std::path::PathBuf;

use anyhow::Result;


/// Environment variable naming the dataset file.
pub const DATA_PATH_ENV: &str = "CYCLEDASH_DATA";

/// File name probed in the working directory when no path is given.
pub const DEFAULT_DATA_FILE: &str = "day.csv";

/// How long the dashboard waits for a key before redrawing (milliseconds).
pub const EVENT_POLL_MS: u64 = 100;


/// Resolve the dataset path from an explicit argument or the default
/// locations.
///
/// An explicitly given path must exist. Without one, `day.csv` is probed in
/// the working directory and then under `data/`.
pub fn resolve_data_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Dataset not found at {}", path.display());
        }
        return Ok(path);
    }

    let candidates = [
        PathBuf::from(DEFAULT_DATA_FILE),
        PathBuf::from("data").join(DEFAULT_DATA_FILE),
    ];

    for candidate in candidates {
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    anyhow::bail!(
        "No dataset found. Put {} in the working directory, \
         or pass --data / set {}.",
        DEFAULT_DATA_FILE,
        DATA_PATH_ENV
    );
}


#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn test_constants() {
        assert_eq!(DATA_PATH_ENV, "CYCLEDASH_DATA");
        assert_eq!(DEFAULT_DATA_FILE, "day.csv");
        assert_eq!(EVENT_POLL_MS, 100);
    }

    #[test]
    fn test_explicit_path_must_exist() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.csv");

        let err = resolve_data_path(Some(missing.clone())).unwrap_err();
        assert!(err.to_string().contains("Dataset not found"));
    }

    #[test]
    fn test_explicit_path_is_returned_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rentals.csv");
        std::fs::write(&path, "dteday\n").unwrap();

        let resolved = resolve_data_path(Some(path.clone())).unwrap();
        assert_eq!(resolved, path);
    }
}
