use serde::{Deserialize, Serialize};

use crate::ledger::PageSize;

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub backend: Option<BackendSettings>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ReportSettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default)]
    pub page_size: PageSize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            output_dir: default_output_dir(),
            page_size: PageSize::default(),
        }
    }
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

/// REST service that owns client records
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BackendSettings {
    pub url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}
