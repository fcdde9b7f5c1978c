//! Artifact delivery
//!
//! An artifact is the serialized export plus its filename and content type.
//! Delivering it writes the bytes into a target directory.

use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::info;

use crate::error::{ExpenseError, ExpenseResult};

/// Serialized export ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub content: Vec<u8>,
    pub record_count: usize,
}

impl ExportArtifact {
    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Content as text, for the textual formats
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.content).ok()
    }
}

/// Write `artifact` into `dir`, creating the directory if needed
///
/// Returns the path of the written file.
pub fn deliver(artifact: &ExportArtifact, dir: &Path) -> ExpenseResult<PathBuf> {
    let mut components = Path::new(&artifact.filename).components();
    let plain_name = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !plain_name {
        return Err(ExpenseError::Export(format!(
            "Refusing to write artifact outside the export directory: {}",
            artifact.filename
        )));
    }

    fs::create_dir_all(dir).map_err(|e| {
        ExpenseError::Io(format!(
            "Failed to create export directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let path = dir.join(&artifact.filename);
    fs::write(&path, &artifact.content)
        .map_err(|e| ExpenseError::Io(format!("Failed to write {}: {}", path.display(), e)))?;

    info!(
        path = %path.display(),
        content_type = artifact.content_type,
        bytes = artifact.size(),
        "delivered export artifact"
    );

    Ok(path)
}
