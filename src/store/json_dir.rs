//! Local backend: one `<table>.json` file per table, each holding a JSON array

use chrono::Utc;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::StoreError;
use crate::form::StorageRecord;
use crate::store::RecordStore;

pub(crate) struct JsonDirStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonDirStore {
    pub(crate) fn new(dir: PathBuf) -> Self {
        JsonDirStore {
            dir,
            write_lock: Mutex::new(()),
        }
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}.json"))
    }

    fn read_rows(&self, table: &str) -> Result<Vec<Value>, String> {
        let path = self.table_path(table);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let file = File::open(&path).map_err(|e| format!("{}: {e}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| format!("{}: {e}", path.display()))
    }
}

/// Write rows to a sibling file, then rename it over `path`.
///
/// The existing table is left untouched unless the new contents were fully written.
fn write_replacing(path: &Path, rows: &[Value]) -> Result<(), String> {
    let tmp = path.with_extension("json.tmp");
    let result = File::create(&tmp)
        .map_err(|e| format!("{}: {e}", tmp.display()))
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, rows).map_err(|e| e.to_string())?;
            let file = writer.into_inner().map_err(|e| e.to_string())?;
            file.sync_all().map_err(|e| e.to_string())
        })
        .and_then(|()| fs::rename(&tmp, path).map_err(|e| format!("{}: {e}", path.display())));
    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

/// Next serial id: one past the largest integer id present
fn next_id(rows: &[Value]) -> i64 {
    rows.iter()
        .filter_map(|r| r.get("id").and_then(Value::as_i64))
        .max()
        .unwrap_or(0)
        + 1
}

impl RecordStore for JsonDirStore {
    fn name(&self) -> &'static str {
        "json-dir"
    }

    fn fetch_all(&self, table: &str) -> Result<Vec<Value>, StoreError> {
        self.read_rows(table).map_err(|reason| StoreError::Fetch {
            table: table.to_string(),
            reason,
        })
    }

    fn insert(&self, table: &str, record: &StorageRecord) -> Result<(), StoreError> {
        let write_err = |reason: String| StoreError::Write {
            table: table.to_string(),
            reason,
        };

        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| write_err("store lock poisoned".to_string()))?;

        let mut rows = self.read_rows(table).map_err(write_err)?;
        let mut row = record.clone();
        if !row.contains_key("id") {
            row.insert("id".to_string(), Value::from(next_id(&rows)));
        }
        if !row.contains_key("created_at") {
            row.insert(
                "created_at".to_string(),
                Value::from(Utc::now().to_rfc3339()),
            );
        }
        rows.push(Value::Object(row));

        fs::create_dir_all(&self.dir).map_err(|e| write_err(e.to_string()))?;
        let path = self.table_path(table);
        write_replacing(&path, &rows).map_err(write_err)?;
        tracing::debug!(table, rows = rows.len(), path = %path.display(), "inserted row");
        Ok(())
    }
}
