pub mod config_io;
pub mod kv;
pub mod log;
pub mod prefs;
pub mod tasks;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// File under the data directory holding the key-value store.
pub const STORE_FILE: &str = "store.json";

/// Error resolving the data directory
#[derive(Debug, thiserror::Error)]
pub enum DataDirError {
    #[error("could not determine a data directory for this platform")]
    NoHome,
    #[error("could not create {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolve the data directory, creating it if needed. An explicit override
/// (from `--data-dir`) wins over the platform default.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf, DataDirError> {
    let dir = match override_dir {
        Some(d) => d.to_path_buf(),
        None => ProjectDirs::from("com", "yanisdbx", "taskflow")
            .ok_or(DataDirError::NoHome)?
            .data_dir()
            .to_path_buf(),
    };
    std::fs::create_dir_all(&dir).map_err(|e| DataDirError::Create {
        path: dir.clone(),
        source: e,
    })?;
    Ok(dir)
}
