use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Config directory not found at {0}. Run 'ledger init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Client '{0}' not found in clients/")]
    ClientNotFound(String),

    #[error("Client data unavailable: {0}")]
    DataUnavailable(String),

    #[error("Invalid client record: {0}")]
    InvalidRecord(String),

    #[error("Client '{name}' is a {category} client and has no sales ledger")]
    UnsupportedCategory { name: String, category: String },

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD (e.g., 2024-02-01)")]
    InvalidDate(String),

    #[error("Invalid range: from {from} is after to {to}")]
    InvalidRange { from: String, to: String },

    #[error("Invalid page size {0}. Use one of 5, 10, 20, 50")]
    InvalidPageSize(usize),

    #[error("No backend configured. Add a [backend] url to config.toml to use --remote")]
    NoBackend,

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
