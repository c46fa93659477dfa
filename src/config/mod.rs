mod settings;

pub use settings::{BackendSettings, Config, ReportSettings};

use crate::error::{LedgerError, Result};
use crate::ledger::RateTable;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "LEDGER_CONFIG_DIR";

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "ledger") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.ledger/
    let home = dirs_home().ok_or_else(|| {
        LedgerError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".ledger"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Expand ~ in paths
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs_home() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Relative output directories live inside the config directory
pub fn resolve_output_dir(output_dir: &str, config_dir: &Path) -> PathBuf {
    let expanded = expand_path(output_dir);
    if expanded.is_absolute() {
        expanded
    } else {
        config_dir.join(expanded)
    }
}

/// Directory holding client snapshots (`<id>.json`)
pub fn clients_dir(config_dir: &Path) -> PathBuf {
    config_dir.join("clients")
}

fn read_toml<T: serde::de::DeserializeOwned>(path: PathBuf) -> Result<T> {
    if !path.exists() {
        return Err(LedgerError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| LedgerError::ConfigParse { path, source: e })
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    read_toml(config_dir.join("config.toml"))
}

/// Load rates.toml
pub fn load_rates(config_dir: &Path) -> Result<RateTable> {
    read_toml(config_dir.join("rates.toml"))
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[report]
currency_symbol = "₹"
output_dir = "output"   # relative paths live inside this config directory
page_size = 10          # rows per page on screen: 5, 10, 20 or 50

# Uncomment to load clients from the backend with --remote
# [backend]
# url = "http://localhost:5000"
# timeout_secs = 10
"#;

/// Template content for rates.toml
pub const RATES_TEMPLATE: &str = r#"# Unit price per product size, one table per client.
# Client names are matched ignoring case; sizes must match exactly.
# Sizes without a price are billed at 0.

["Example Pumps"]
"4in" = 100
"6in" = 150
"8in" = 220
"#;

/// Template client snapshot written to clients/example.json
pub const EXAMPLE_CLIENT: &str = r#"{
  "category": "submersible",
  "name": "Example Pumps",
  "calculatedBalance": 1250,
  "entries": [
    { "date": "2024-01-05", "size": "4in", "quantity": 3 },
    { "date": "2024-02-10", "size": "6in", "quantity": "5" },
    { "date": "2024-03-01", "size": "10in", "quantity": 2 }
  ],
  "payments": [
    { "date": "2024-01-20", "amount": 300, "medium": "Cash", "transferMethod": "", "comment": "" },
    { "date": "2024-02-15", "amount": 500, "medium": "Transfer", "transferMethod": "UPI", "comment": "February dues" }
  ]
}
"#;
