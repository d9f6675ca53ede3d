//! Renaming primitives: collision-free target paths, the rename itself, and
//! the records kept about it.
//!
//! Successful renames are written to a human-readable rename log as they
//! happen and collected into a JSON history so they can be undone later.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Highest numeric suffix tried before giving up on a path.
pub const MAX_SUFFIX_ATTEMPTS: u32 = 999;

/// File name of the rename history kept in the log directory.
pub const HISTORY_FILE_NAME: &str = ".extcheck_history.json";

/// Errors that can occur while renaming files or handling their history.
#[derive(Debug, Error)]
pub enum RenameError {
    /// Every numbered candidate for a path is already taken.
    #[error("no free name for {} after {MAX_SUFFIX_ATTEMPTS} attempts", path.display())]
    PathExhausted { path: PathBuf },
    /// The filesystem refused the rename.
    #[error("failed to rename {} to {}: {source}", from.display(), to.display())]
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write rename history: {source}")]
    HistoryWriteFailed {
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read rename history: {source}")]
    HistoryReadFailed {
        #[source]
        source: std::io::Error,
    },
    #[error("invalid rename history format: {reason}")]
    InvalidHistoryFormat { reason: String },
}

/// Result type for rename operations.
pub type RenameResult<T> = Result<T, RenameError>;

/// Builds the `n`-th numbered candidate for a path.
///
/// The `_NNN` suffix goes right before the extension, or at the end of the
/// name when there is none: `image.png` becomes `image_001.png`, `README`
/// becomes `README_001`.
pub fn numbered_candidate(path: &Path, n: u32) -> PathBuf {
    let mut name = path
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(format!("_{n:03}"));
    // Keep the original spelling of the extension.
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}

/// True when something occupies `path`, including a dangling symlink.
pub fn path_taken(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Finds a path that does not exist yet, starting from `desired`.
///
/// Returns `desired` itself when it is free, otherwise the first free
/// numbered candidate (`_001` through `_999`).
///
/// # Errors
///
/// Returns [`RenameError::PathExhausted`] when all 999 candidates exist.
pub fn resolve_unique_path(desired: &Path) -> RenameResult<PathBuf> {
    if !path_taken(desired) {
        return Ok(desired.to_path_buf());
    }

    for n in 1..=MAX_SUFFIX_ATTEMPTS {
        let candidate = numbered_candidate(desired, n);
        if !path_taken(&candidate) {
            debug!(
                desired = %desired.display(),
                candidate = %candidate.display(),
                "resolved unique path"
            );
            return Ok(candidate);
        }
    }

    Err(RenameError::PathExhausted {
        path: desired.to_path_buf(),
    })
}

/// Like [`resolve_unique_path`], but accepts the original path as its own target.
///
/// Used for extension fixes: when the computed target is the file itself there
/// is nothing to resolve.
pub fn resolve_fix_target(original: &Path, target: &Path) -> RenameResult<PathBuf> {
    if target == original {
        return Ok(original.to_path_buf());
    }
    resolve_unique_path(target)
}

/// A successful rename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameLogEntry {
    pub timestamp: DateTime<Local>,
    pub original_path: PathBuf,
    pub new_path: PathBuf,
}

impl RenameLogEntry {
    /// Formats the entry as one rename log line.
    pub fn log_line(&self) -> String {
        format!(
            "{} - {} fixed by renaming to {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.original_path.display(),
            self.new_path.display()
        )
    }
}

/// Renames `from` to `to` in a single filesystem operation.
///
/// An existing file at `to` is replaced. On failure the file stays where it was.
pub fn apply_rename(from: &Path, to: &Path) -> RenameResult<RenameLogEntry> {
    fs::rename(from, to).map_err(|e| RenameError::RenameFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source: e,
    })?;

    Ok(RenameLogEntry {
        timestamp: Local::now(),
        original_path: from.to_path_buf(),
        new_path: to.to_path_buf(),
    })
}

/// Append-only record of the renames performed during one run.
///
/// When backed by a file, each entry is written as soon as it is recorded;
/// the file itself is only created by the first entry.
#[derive(Debug, Default)]
pub struct RenameLog {
    path: Option<PathBuf>,
    entries: Vec<RenameLogEntry>,
}

impl RenameLog {
    /// A log that keeps entries in memory only.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A log that also appends each entry to the file at `path`.
    pub fn to_file(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            entries: Vec::new(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Records a successful rename.
    ///
    /// Failing to write the log file is reported but does not undo or hide
    /// the rename: the entry is still kept for the history.
    pub fn append(&mut self, entry: RenameLogEntry) {
        if let Some(path) = &self.path
            && let Err(e) = Self::write_line(path, &entry.log_line())
        {
            warn!(log = %path.display(), error = %e, "could not write rename log");
        }
        self.entries.push(entry);
    }

    fn write_line(path: &Path, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{line}")
    }

    pub fn entries(&self) -> &[RenameLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<RenameLogEntry> {
        self.entries
    }
}

/// Renames performed by one run, persisted so they can be undone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameHistory {
    /// RFC 3339 timestamp of the run.
    pub timestamp: String,
    pub renames: Vec<RenameLogEntry>,
}

impl RenameHistory {
    /// Collects renames for saving.
    ///
    /// JSON cannot hold paths that are not valid UTF-8; such entries are left
    /// out with a warning so the remaining renames stay undoable.
    pub fn new(renames: Vec<RenameLogEntry>) -> Self {
        let renames = renames
            .into_iter()
            .filter(|entry| {
                let storable =
                    entry.original_path.to_str().is_some() && entry.new_path.to_str().is_some();
                if !storable {
                    warn!(
                        path = %entry.new_path.display(),
                        "rename cannot be recorded for undo: path is not valid UTF-8"
                    );
                }
                storable
            })
            .collect();
        Self {
            timestamp: Local::now().to_rfc3339(),
            renames,
        }
    }

    /// Returns the path to the history file inside a log directory.
    pub fn history_file_path(log_dir: &Path) -> PathBuf {
        log_dir.join(HISTORY_FILE_NAME)
    }

    /// Saves this history to the log directory, replacing any previous one.
    pub fn save(&self, log_dir: &Path) -> RenameResult<PathBuf> {
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            RenameError::HistoryWriteFailed {
                source: std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    format!("JSON serialization failed: {}", e),
                ),
            }
        })?;

        let history_path = Self::history_file_path(log_dir);
        let mut file =
            File::create(&history_path).map_err(|e| RenameError::HistoryWriteFailed { source: e })?;
        file.write_all(json.as_bytes())
            .map_err(|e| RenameError::HistoryWriteFailed { source: e })?;

        Ok(history_path)
    }

    /// Loads the history saved in a log directory, if there is one.
    pub fn load(log_dir: &Path) -> RenameResult<Option<Self>> {
        let history_path = Self::history_file_path(log_dir);
        if !history_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&history_path)
            .map_err(|e| RenameError::HistoryReadFailed { source: e })?;
        let history = serde_json::from_str(&json).map_err(|e| RenameError::InvalidHistoryFormat {
            reason: format!("JSON parse error: {}", e),
        })?;

        Ok(Some(history))
    }

    /// Deletes the history file in a log directory, if present.
    pub fn delete(log_dir: &Path) -> RenameResult<()> {
        let history_path = Self::history_file_path(log_dir);
        if history_path.exists() {
            fs::remove_file(&history_path)
                .map_err(|e| RenameError::HistoryWriteFailed { source: e })?;
        }
        Ok(())
    }
}
