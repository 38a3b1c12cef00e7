//! Writing snapshots to durable storage.

use mondrian_core::error::MondrianError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Where snapshots go by default: the user's pictures folder, falling back to
/// the home directory and then the working directory.
pub fn default_storage_dir() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// A fresh `<uuid>.png` file name.
pub fn unique_file_name() -> String {
    format!("{}.png", Uuid::new_v4())
}

/// Writes `bytes` to a new uniquely named PNG file inside `dir`.
///
/// Creates `dir` if needed and never overwrites an existing file. Returns
/// `MondrianError::Persist` on empty input or any I/O failure.
pub fn write_unique(dir: &Path, bytes: &[u8]) -> Result<PathBuf, MondrianError> {
    if bytes.is_empty() {
        return Err(MondrianError::Persist("refusing to write an empty snapshot".into()));
    }
    fs::create_dir_all(dir)
        .map_err(|e| MondrianError::Persist(format!("cannot create {}: {e}", dir.display())))?;

    let path = dir.join(unique_file_name());
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| MondrianError::Persist(format!("cannot create {}: {e}", path.display())))?;
    file.write_all(bytes)
        .and_then(|()| file.sync_all())
        .map_err(|e| MondrianError::Persist(format!("cannot write {}: {e}", path.display())))?;

    info!(path = %path.display(), bytes = bytes.len(), "saved snapshot");
    Ok(path)
}
