//! Record store abstraction
//!
//! The dashboard only needs two operations from its backing service: fetch a
//! whole table and insert one row. Each backend implements `RecordStore`;
//! everything above this module works on typed records.

mod json_dir;
mod rest;

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

use crate::consts::{EMPLOYEES_TABLE, PROJECTS_TABLE, TOOLS_TABLE};
use crate::core::{Employee, Project, Snapshot, Tool};
use crate::error::StoreError;
use crate::form::StorageRecord;

pub(crate) use json_dir::JsonDirStore;
pub(crate) use rest::RestStore;

/// Backend holding the `projects`, `tools`, and `employees` tables
pub(crate) trait RecordStore: Send + Sync {
    /// Short label for diagnostics
    fn name(&self) -> &'static str;

    /// Fetch every row of a table
    fn fetch_all(&self, table: &str) -> Result<Vec<Value>, StoreError>;

    /// Insert a single row
    fn insert(&self, table: &str, record: &StorageRecord) -> Result<(), StoreError>;
}

pub(crate) type BoxedStore = Box<dyn RecordStore>;

/// Connection settings after merging CLI, environment, and config file
#[derive(Debug, Clone, Default)]
pub(crate) struct StoreSettings {
    pub(crate) url: Option<String>,
    pub(crate) api_key: Option<String>,
    pub(crate) data_dir: Option<PathBuf>,
    pub(crate) timeout: Duration,
}

/// Pick a backend: a local data directory wins over a remote URL
pub(crate) fn open_store(settings: &StoreSettings) -> Result<BoxedStore, StoreError> {
    if let Some(dir) = &settings.data_dir {
        tracing::debug!(dir = %dir.display(), "using local JSON store");
        return Ok(Box::new(JsonDirStore::new(dir.clone())));
    }
    let Some(url) = settings.url.as_deref().filter(|u| !u.trim().is_empty()) else {
        return Err(StoreError::NotConfigured);
    };
    let Some(api_key) = settings.api_key.clone().filter(|k| !k.trim().is_empty()) else {
        return Err(StoreError::MissingApiKey {
            url: url.to_string(),
        });
    };
    tracing::debug!(url, "using REST store");
    Ok(Box::new(RestStore::new(url, api_key, settings.timeout)))
}

/// Fetch a table and decode every row into `T`.
///
/// A row that cannot be decoded fails the whole fetch.
pub(crate) fn fetch_records<T: DeserializeOwned>(
    store: &dyn RecordStore,
    table: &str,
) -> Result<Vec<T>, StoreError> {
    let rows = store.fetch_all(table)?;
    tracing::debug!(store = store.name(), table, rows = rows.len(), "fetched");
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::from_value(row).map_err(|e| StoreError::Decode {
                table: table.to_string(),
                reason: format!("row {i}: {e}"),
            })
        })
        .collect()
}

/// Fetch all three record sets concurrently.
///
/// Either every set arrives or the first failure is returned; there is no
/// partial snapshot.
pub(crate) fn load_snapshot(store: &dyn RecordStore) -> Result<Snapshot, StoreError> {
    let (projects, (tools, employees)) = rayon::join(
        || fetch_records::<Project>(store, PROJECTS_TABLE),
        || {
            rayon::join(
                || fetch_records::<Tool>(store, TOOLS_TABLE),
                || fetch_records::<Employee>(store, EMPLOYEES_TABLE),
            )
        },
    );
    Ok(Snapshot {
        projects: projects?,
        tools: tools?,
        employees: employees?,
    })
}
