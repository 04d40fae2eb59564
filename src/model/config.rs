use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml in the data directory. Every field is
/// optional; a missing file yields `AppConfig::default()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub board: BoardConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex color overrides for the theme, e.g. `background = "#0C001B"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// How many cards a collapsed column shows before "+N more"
    #[serde(default = "default_column_limit")]
    pub column_limit: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            column_limit: default_column_limit(),
        }
    }
}

fn default_column_limit() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.board.column_limit, 5);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: AppConfig = toml::from_str(
            r##"
[ui.colors]
background = "#000000"
"##,
        )
        .unwrap();
        assert_eq!(config.ui.colors.get("background").unwrap(), "#000000");
        assert_eq!(config.board.column_limit, 5);
    }

    #[test]
    fn column_limit_override() {
        let config: AppConfig = toml::from_str("[board]\ncolumn_limit = 8\n").unwrap();
        assert_eq!(config.board.column_limit, 8);
    }
}
