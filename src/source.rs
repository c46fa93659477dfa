//! Where client records come from: JSON snapshots in the config directory or
//! the backend REST service.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};
use ureq::Agent;

use crate::config::{clients_dir, BackendSettings, Config};
use crate::error::{LedgerError, Result};
use crate::ledger::ClientRecord;

pub fn snapshot_path(config_dir: &Path, client_id: &str) -> PathBuf {
    clients_dir(config_dir).join(format!("{client_id}.json"))
}

/// Read one client snapshot
pub fn load_snapshot(config_dir: &Path, client_id: &str) -> Result<ClientRecord> {
    let path = snapshot_path(config_dir, client_id);
    if !path.exists() {
        return Err(LedgerError::ClientNotFound(client_id.to_string()));
    }
    let content = fs::read_to_string(&path)?;
    ClientRecord::from_json(&content)
}

/// All readable snapshots, sorted by id. Unreadable files are skipped.
pub fn list_snapshots(config_dir: &Path) -> Result<Vec<(String, ClientRecord)>> {
    let dir = clients_dir(config_dir);
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut records = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        match load_snapshot(config_dir, id) {
            Ok(record) => records.push((id.to_string(), record)),
            Err(e) => warn!(client = id, error = %e, "skipping unreadable snapshot"),
        }
    }

    records.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(records)
}

/// Fetch a client record from `{url}/client/{id}`.
///
/// Any transport, status or decoding failure is reported as
/// `DataUnavailable`; there is no retry.
pub fn fetch_client(backend: &BackendSettings, client_id: &str) -> Result<ClientRecord> {
    let agent: Agent = Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(backend.timeout_secs)))
        .build()
        .into();

    let url = format!("{}/client/{}", backend.url.trim_end_matches('/'), client_id);
    info!(%url, "fetching client record");

    let body: String = agent
        .get(&url)
        .call()
        .map_err(|e| LedgerError::DataUnavailable(format!("{url}: {e}")))?
        .body_mut()
        .read_to_string()
        .map_err(|e| LedgerError::DataUnavailable(format!("{url}: {e}")))?;

    ClientRecord::from_json(&body).map_err(|e| match e {
        LedgerError::InvalidRecord(reason) => {
            LedgerError::DataUnavailable(format!("{url}: {reason}"))
        }
        other => other,
    })
}

/// Materialize a client record, remotely when asked to
pub fn load_client(
    config_dir: &Path,
    config: &Config,
    client_id: &str,
    remote: bool,
) -> Result<ClientRecord> {
    if remote {
        let backend = config.backend.as_ref().ok_or(LedgerError::NoBackend)?;
        return fetch_client(backend, client_id);
    }
    load_snapshot(config_dir, client_id)
}
