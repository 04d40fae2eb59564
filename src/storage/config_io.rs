use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// Error type for configuration loading. Unlike stored task data, the
/// config file is user-authored, so a malformed one is surfaced instead of
/// silently replaced.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load `config.toml` from the data directory. A missing file yields the
/// defaults.
pub fn load_config(data_dir: &Path) -> Result<AppConfig, ConfigError> {
    let path = data_dir.join("config.toml");
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.board.column_limit, 5);
    }

    #[test]
    fn reads_overrides() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[board]\ncolumn_limit = 3\n\n[ui.colors]\nbackground = \"#101010\"\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.board.column_limit, 3);
        assert_eq!(config.ui.colors.get("background").unwrap(), "#101010");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "not toml [").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }
}
