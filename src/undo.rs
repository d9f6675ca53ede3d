//! Undo support for interactive renames.
//!
//! Reads the rename history saved by the last run that renamed something and
//! moves every file back to its original name.

use crate::renamer::{RenameError, RenameHistory, RenameLogEntry, RenameResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Represents the result of an undo operation.
#[derive(Debug, Default)]
pub struct UndoReport {
    /// Number of files successfully restored.
    pub restored_files: usize,
    /// Files whose restore was attempted and failed.
    pub failed_restores: Vec<(PathBuf, String)>,
    /// Files that could not be restored as recorded (gone, or name taken).
    pub skipped_files: Vec<(PathBuf, String)>,
}

impl UndoReport {
    /// Returns true if every recorded rename was reverted.
    pub fn is_complete_success(&self) -> bool {
        self.failed_restores.is_empty() && self.skipped_files.is_empty()
    }
}

enum RestoreError {
    Skipped(PathBuf, String),
    Failed(PathBuf, String),
}

/// Manages undo operations for renames.
pub struct UndoManager;

impl UndoManager {
    /// Reverts the renames recorded in the history of `log_dir`.
    ///
    /// Entries are processed newest first. The history file is deleted only
    /// when every entry was restored, so a partial undo can be retried.
    ///
    /// # Edge Cases Handled
    ///
    /// * **Renamed file missing**: skipped
    /// * **Original name taken again**: skipped; the occupying file is left alone
    /// * **Permission denied**: recorded as a failure with the error reason
    /// * **Missing history**: returns an error indicating no undo is available
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use extcheck::undo::UndoManager;
    /// use std::path::Path;
    ///
    /// match UndoManager::undo(Path::new("/var/log/extcheck")) {
    ///     Ok(report) => println!("Restored {} files", report.restored_files),
    ///     Err(e) => eprintln!("Undo failed: {}", e),
    /// }
    /// ```
    pub fn undo(log_dir: &Path) -> RenameResult<UndoReport> {
        let history =
            RenameHistory::load(log_dir)?.ok_or_else(|| RenameError::InvalidHistoryFormat {
                reason: format!("no rename history found in {}", log_dir.display()),
            })?;

        let mut report = UndoReport::default();
        for entry in history.renames.iter().rev() {
            match Self::restore_file(entry) {
                Ok(()) => report.restored_files += 1,
                Err(RestoreError::Skipped(path, reason)) => {
                    report.skipped_files.push((path, reason))
                }
                Err(RestoreError::Failed(path, reason)) => {
                    report.failed_restores.push((path, reason))
                }
            }
        }

        if report.is_complete_success()
            && let Err(e) = RenameHistory::delete(log_dir)
        {
            warn!(error = %e, "could not delete rename history");
        }

        Ok(report)
    }

    fn restore_file(entry: &RenameLogEntry) -> Result<(), RestoreError> {
        if !entry.new_path.exists() {
            return Err(RestoreError::Skipped(
                entry.new_path.clone(),
                "File not found at expected location".to_string(),
            ));
        }

        if entry.original_path.exists() {
            return Err(RestoreError::Skipped(
                entry.original_path.clone(),
                "Original name is taken by another file".to_string(),
            ));
        }

        fs::rename(&entry.new_path, &entry.original_path).map_err(|e| {
            RestoreError::Failed(
                entry.new_path.clone(),
                format!("Failed to restore file: {}", e),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renamer::apply_rename;
    use tempfile::TempDir;

    fn rename_and_record(dir: &Path, renames: &[(&str, &str)]) -> Vec<RenameLogEntry> {
        renames
            .iter()
            .map(|(from, to)| {
                let from = dir.join(from);
                fs::write(&from, from.to_string_lossy().as_bytes()).unwrap();
                apply_rename(&from, &dir.join(to)).expect("rename failed")
            })
            .collect()
    }

    #[test]
    fn test_undo_no_history() {
        let temp_dir = TempDir::new().unwrap();
        assert!(UndoManager::undo(temp_dir.path()).is_err());
    }

    #[test]
    fn test_undo_restores_files_and_deletes_history() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        let entries = rename_and_record(base, &[("a.jpg", "a.png"), ("b.doc", "b.pdf")]);
        RenameHistory::new(entries).save(base).unwrap();

        let report = UndoManager::undo(base).expect("Undo failed");

        assert_eq!(report.restored_files, 2);
        assert!(report.is_complete_success());
        assert!(base.join("a.jpg").exists());
        assert!(base.join("b.doc").exists());
        assert!(!base.join("a.png").exists());
        assert!(RenameHistory::load(base).unwrap().is_none());
    }

    #[test]
    fn test_undo_skips_missing_file_and_keeps_history() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        let entries = rename_and_record(base, &[("a.jpg", "a.png")]);
        RenameHistory::new(entries).save(base).unwrap();
        fs::remove_file(base.join("a.png")).unwrap();

        let report = UndoManager::undo(base).expect("Undo failed");

        assert_eq!(report.restored_files, 0);
        assert_eq!(report.skipped_files.len(), 1);
        assert!(RenameHistory::load(base).unwrap().is_some());
    }

    #[test]
    fn test_undo_does_not_clobber_original_name() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        let entries = rename_and_record(base, &[("a.jpg", "a.png")]);
        RenameHistory::new(entries).save(base).unwrap();
        fs::write(base.join("a.jpg"), "newcomer").unwrap();

        let report = UndoManager::undo(base).expect("Undo failed");

        assert_eq!(report.skipped_files.len(), 1);
        assert_eq!(fs::read_to_string(base.join("a.jpg")).unwrap(), "newcomer");
        assert!(base.join("a.png").exists());
    }

    #[test]
    fn test_undo_chained_renames_in_reverse_order() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        let first = rename_and_record(base, &[("a.jpg", "a.png")]);
        let second = apply_rename(&base.join("a.png"), &base.join("a.gif")).unwrap();
        let mut entries = first;
        entries.push(second);
        RenameHistory::new(entries).save(base).unwrap();

        let report = UndoManager::undo(base).expect("Undo failed");

        assert_eq!(report.restored_files, 2);
        assert!(base.join("a.jpg").exists());
        assert!(!base.join("a.gif").exists());
    }
}
