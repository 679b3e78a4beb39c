//! Shared file helpers

use hd_core::error::{HelpDocsError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// How often a new record retries when its id is taken by a concurrent writer
pub(crate) const MAX_CLAIM_ATTEMPTS: usize = 64;

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Default data directory (platform data dir, or ~/.help-docs)
pub fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "help-docs", "help-docs")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".help-docs")
        })
}

/// Create a directory if needed
pub(crate) fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| {
            HelpDocsError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create directory {}: {}", dir.display(), e),
            ))
        })?;
        debug!("Created directory: {:?}", dir);
    }
    Ok(())
}

/// Write a JSON file atomically (write to temp, then rename)
pub(crate) fn atomic_write_json<T: Serialize>(dir: &Path, id: u64, value: &T) -> Result<PathBuf> {
    let temp_path = write_temp_json(dir, id, value)?;
    let final_path = record_path(dir, id);

    // Rename to final path (atomic on most filesystems)
    fs::rename(&temp_path, &final_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        HelpDocsError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to rename temp file: {}", e),
        ))
    })?;

    Ok(final_path)
}

/// Write a new JSON record only if no record with that id exists.
///
/// The complete file is linked into place, so readers never see a partial
/// record and the link fails if another writer already holds the id.
/// Returns `None` when the id is taken.
pub(crate) fn create_json_exclusive<T: Serialize>(
    dir: &Path,
    id: u64,
    value: &T,
) -> Result<Option<PathBuf>> {
    let temp_path = write_temp_json(dir, id, value)?;
    let final_path = record_path(dir, id);

    let linked = fs::hard_link(&temp_path, &final_path);
    let _ = fs::remove_file(&temp_path);
    match linked {
        Ok(()) => Ok(Some(final_path)),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(HelpDocsError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to create {}: {}", final_path.display(), e),
        ))),
    }
}

/// Store a new record under the next free id, retrying when a concurrent
/// writer claims the same id first
pub(crate) fn create_with_next_id<T, F>(dir: &Path, mut build: F) -> Result<(T, PathBuf)>
where
    T: Serialize,
    F: FnMut(u64) -> Result<T>,
{
    for _ in 0..MAX_CLAIM_ATTEMPTS {
        let id = next_id(dir)?;
        let value = build(id)?;
        if let Some(path) = create_json_exclusive(dir, id, &value)? {
            return Ok((value, path));
        }
        debug!("Id {} in {:?} was claimed concurrently, retrying", id, dir);
    }
    Err(HelpDocsError::Storage(format!(
        "could not allocate a record id in {} after {} attempts",
        dir.display(),
        MAX_CLAIM_ATTEMPTS
    )))
}

fn write_temp_json<T: Serialize>(dir: &Path, id: u64, value: &T) -> Result<PathBuf> {
    let temp_path = temp_path(dir, id);

    let temp_file = fs::File::create(&temp_path).map_err(|e| {
        HelpDocsError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to create temp file: {}", e),
        ))
    })?;
    let mut writer = BufWriter::new(temp_file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    drop(writer);

    Ok(temp_path)
}

/// Read a JSON record; `None` when the file does not exist
pub(crate) fn read_json<T: DeserializeOwned>(dir: &Path, id: u64) -> Result<Option<T>> {
    let path = record_path(dir, id);
    let file = match fs::File::open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(HelpDocsError::Io(e)),
    };
    let value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| HelpDocsError::from(e).with_context(format!("{}", path.display())))?;
    Ok(Some(value))
}

/// Ids of the records stored in a directory, ascending.
///
/// Temp files, hidden files and files whose stem is not a number are skipped.
pub(crate) fn list_ids(dir: &Path) -> Result<Vec<u64>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        HelpDocsError::Io(std::io::Error::new(
            e.kind(),
            format!("Failed to read directory {}: {}", dir.display(), e),
        ))
    })?;

    let mut ids = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Failed to read directory entry: {}", e);
                continue;
            }
        };
        let path = entry.path();

        // Skip non-json files and temp files
        if !path.extension().map(|e| e == "json").unwrap_or(false) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if stem.starts_with('.') {
            continue;
        }
        match stem.parse::<u64>() {
            Ok(id) => ids.push(id),
            Err(_) => debug!("Ignoring unrelated file {:?}", path),
        }
    }

    ids.sort_unstable();
    Ok(ids)
}

/// Next free id in a directory
pub(crate) fn next_id(dir: &Path) -> Result<u64> {
    Ok(list_ids(dir)?.last().map(|id| id + 1).unwrap_or(1))
}

pub(crate) fn record_path(dir: &Path, id: u64) -> PathBuf {
    dir.join(format!("{}.json", id))
}

/// Temp file name unique per process and write
pub(crate) fn temp_path(dir: &Path, id: u64) -> PathBuf {
    let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
    dir.join(format!(".{}.{}.{}.json.tmp", id, std::process::id(), seq))
}
