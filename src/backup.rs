//! Backup-before-write for configuration files.
//!
//! Every overwrite of a file that may already exist goes through
//! `replace_config_file`, which first copies the current file to a sibling
//! `<name>.bak-<YYYYmmdd-HHMMSS>`. Backups are never rotated or deleted.

use chrono::Local;
use std::ffi::OsString;
use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

use crate::console;
use crate::error::Result;

/// Timestamp format embedded in backup names (second resolution)
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Current local time formatted for a backup name
pub fn backup_timestamp() -> String {
    Local::now().format(BACKUP_TIMESTAMP_FORMAT).to_string()
}

/// Sibling path `<file-name>.bak-<timestamp>` for `path`
pub fn backup_path_for(path: &Path, timestamp: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(format!(".bak-{}", timestamp));
    path.with_file_name(name)
}

/// Copy `path` to a timestamped sibling if it exists.
///
/// Returns the backup path, or `None` when there was nothing to back up.
/// Permissions and access/modification times are carried over; failing to
/// restore the times is logged and otherwise ignored.
pub fn backup_config_file(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        tracing::debug!("No existing file at {}, skipping backup", path.display());
        return Ok(None);
    }

    let backup_path = backup_path_for(path, &backup_timestamp());
    if let Some(parent) = backup_path.parent() {
        fs::create_dir_all(parent)?;
    }

    // fs::copy carries the permission bits over
    fs::copy(path, &backup_path)?;

    if let Err(e) = copy_file_times(path, &backup_path) {
        tracing::warn!(
            "Could not preserve timestamps on {}: {}",
            backup_path.display(),
            e
        );
    }

    tracing::info!("Backed up {} to {}", path.display(), backup_path.display());
    console::info(format!("Backup created: {}", backup_path.display()));
    Ok(Some(backup_path))
}

fn copy_file_times(source: &Path, target: &Path) -> std::io::Result<()> {
    let meta = fs::metadata(source)?;
    let times = FileTimes::new()
        .set_accessed(meta.accessed()?)
        .set_modified(meta.modified()?);
    File::options().write(true).open(target)?.set_times(times)
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
    console::ok(format!("File written: {}", path.display()));
    Ok(())
}

/// Back up `path` (if present) and overwrite it with `content`.
pub fn replace_config_file(path: &Path, content: &str) -> Result<Option<PathBuf>> {
    let backup = backup_config_file(path)?;
    write_config_file(path, content)?;
    Ok(backup)
}
