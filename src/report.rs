//! Report artifacts: the anomaly table, suggestion lines and the timestamped
//! names of the files a run leaves behind.

use crate::aggregator::{AnomalyRecord, SuggestionRecord};
use chrono::{DateTime, Local};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const REPORT_HEADER: &str = "File Path\tDetected Type\tActual Extension\tExpected Extensions";

/// Timestamp used in artifact file names, e.g. `20250301_142530`.
pub fn artifact_stamp(now: &DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

pub fn report_path(log_dir: &Path, stamp: &str) -> PathBuf {
    log_dir.join(format!("file_type_anomalies_{stamp}.tsv"))
}

pub fn rename_log_path(log_dir: &Path, stamp: &str) -> PathBuf {
    log_dir.join(format!("file_type_renames_{stamp}.log"))
}

/// Renders the anomaly report as tab-separated text.
///
/// One metadata comment line, one header line, then one row per record in
/// the order given.
pub fn render_report(
    records: &[AnomalyRecord],
    generated: &DateTime<Local>,
    roots: &[PathBuf],
) -> String {
    let roots = roots
        .iter()
        .map(|root| root.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = format!(
        "# File type anomaly report generated {} for: {}\n{}\n",
        generated.format("%Y-%m-%d %H:%M:%S"),
        roots,
        REPORT_HEADER
    );
    for record in records {
        out.push_str(&format!(
            "{}\t{}\t{}\t{}\n",
            record.path.display(),
            record.content_type,
            record.extension,
            record.expected
        ));
    }
    out
}

/// Writes the report to `path` when there is something to report.
///
/// With no records, any file already at `path` is removed and `None` is
/// returned, so a clean run never leaves a report behind.
pub fn persist_report(
    path: &Path,
    records: &[AnomalyRecord],
    generated: &DateTime<Local>,
    roots: &[PathBuf],
) -> io::Result<Option<PathBuf>> {
    if records.is_empty() {
        if path.exists() {
            fs::remove_file(path)?;
        }
        return Ok(None);
    }

    fs::write(path, render_report(records, generated, roots))?;
    Ok(Some(path.to_path_buf()))
}

/// Formats a suggestion as a line ready to paste into the registry table.
///
/// ```
/// use extcheck::aggregator::SuggestionRecord;
/// use extcheck::report::suggestion_line;
/// use std::path::PathBuf;
///
/// let record = SuggestionRecord {
///     content_type: "application/x-custom".to_string(),
///     extension: "xyz".to_string(),
///     example_path: PathBuf::from("/data/sample.xyz"),
/// };
/// assert_eq!(
///     suggestion_line(&record),
///     "application/x-custom -> extension \"xyz\"  # example: sample.xyz"
/// );
/// ```
pub fn suggestion_line(record: &SuggestionRecord) -> String {
    let example = record
        .example_path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    format!(
        "{} -> extension \"{}\"  # example: {}",
        record.content_type, record.extension, example
    )
}
