//! JSON persistence helpers
//!
//! Stores are replaced whole: a write lands in a sibling temp file and is
//! renamed over the target, so readers see the old or the new document.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::ExpenseError;

/// Load a JSON document, or `T::default()` when the file has never been written
pub fn read_json<T, P>(path: P) -> Result<T, ExpenseError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(ExpenseError::Storage(format!(
                "Cannot read {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_slice(&bytes).map_err(|e| {
        ExpenseError::Storage(format!("{} is not a valid store: {}", path.display(), e))
    })
}

/// Replace `path` with the pretty-printed JSON form of `data`
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ExpenseError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let body = serde_json::to_vec_pretty(data)
        .map_err(|e| ExpenseError::Storage(format!("Cannot encode {}: {}", path.display(), e)))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ExpenseError::Storage(format!("Cannot create {}: {}", parent.display(), e))
        })?;
    }

    let staging = staging_path(path);
    let result = write_synced(&staging, &body).and_then(|()| fs::rename(&staging, path));
    if let Err(e) = result {
        let _ = fs::remove_file(&staging);
        return Err(ExpenseError::Storage(format!(
            "Cannot save {}: {}",
            path.display(),
            e
        )));
    }

    debug!(path = %path.display(), bytes = body.len(), "store written");
    Ok(())
}

/// Hidden sibling of `path`; same directory keeps the rename on one filesystem
fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "store".to_string());
    path.with_file_name(format!(".{}.{}.tmp", name, std::process::id()))
}

fn write_synced(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.write_all(body)?;
    file.sync_all()
}
