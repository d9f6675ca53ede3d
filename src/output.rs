//! Output formatting and styling module.
//!
//! Provides a centralized interface for all console output: colored status
//! lines, the anomaly listing, the progress bar and the end-of-run summary.

use crate::aggregator::{AnomalyRecord, FileOutcome, RunSummary};
use crate::report::suggestion_line;
use crate::undo::UndoReport;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Manages all CLI output with consistent styling and formatting.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use extcheck::output::OutputFormatter;
    /// OutputFormatter::error("Failed to read configuration");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a question without a trailing newline.
    pub fn prompt(question: &str) {
        print!("{} ", question.bold());
    }

    /// Prints a forensic-mode notice.
    pub fn forensic_notice(message: &str) {
        println!("{}", format!("[FORENSIC] {}", message).yellow());
    }

    /// Creates a progress bar over the files of a run.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Prints one anomaly line.
    pub fn anomaly(record: &AnomalyRecord) {
        let extension = if record.extension.is_empty() {
            "(none)"
        } else {
            record.extension.as_str()
        };
        println!(
            "{} {} [{}] extension: {}, expected: {}",
            "✗".red(),
            record.path.display(),
            record.content_type.cyan(),
            extension.red(),
            record.expected.green()
        );
    }

    /// Prints what happened to a file, as far as the console should know.
    ///
    /// In interactive mode the resolver already showed anomalies and fixes.
    /// Matches are only listed in verbose mode.
    pub fn file_outcome(
        path: &Path,
        content_type: &str,
        outcome: &FileOutcome,
        interactive: bool,
        verbose: bool,
    ) {
        match outcome {
            FileOutcome::Anomaly(record) if !interactive => Self::anomaly(record),
            FileOutcome::Anomaly(_) => {}
            FileOutcome::Fixed(_) => {}
            FileOutcome::Vanished(path) => {
                Self::warning(&format!("File disappeared: {}", path.display()))
            }
            FileOutcome::Match if verbose => {
                println!("{} {} [{}]", "✓".green(), path.display(), content_type)
            }
            FileOutcome::Suggested { new: true } if verbose => {
                println!("{} {} [{}] unregistered type", "?".yellow(), path.display(), content_type)
            }
            _ => {}
        }
    }

    /// Prints the end-of-run summary.
    pub fn run_summary(summary: &RunSummary, forensic: bool) {
        Self::header("SUMMARY");

        println!("{:<22} | {}", "Files examined".bold(), summary.files_processed);
        let remaining = summary.anomalies_remaining().to_string();
        println!(
            "{:<22} | {}",
            "Anomalies remaining".bold(),
            if summary.anomalies_remaining() == 0 {
                remaining.green()
            } else {
                remaining.red()
            }
        );
        println!(
            "{:<22} | {}",
            "Renames performed".bold(),
            summary.renames_performed.to_string().green()
        );
        println!(
            "{:<22} | {}",
            "Anomalies found".bold(),
            if summary.anomalies_found {
                "yes".red()
            } else {
                "no".green()
            }
        );

        if !summary.suggestions.is_empty() {
            Self::header("SUGGESTED REGISTRY ADDITIONS");
            for suggestion in &summary.suggestions {
                println!("  {}", suggestion_line(suggestion));
            }
        }

        println!();
        if forensic {
            Self::forensic_notice("Read-only run. No files or reports were written.");
        } else if summary.anomalies_found {
            Self::warning("Some files do not match their detected type.");
        } else {
            Self::success("All examined files match their detected type.");
        }
    }

    /// Prints the result of an undo run.
    pub fn undo_summary(report: &UndoReport) {
        Self::success("Undo complete!");
        println!("  Restored: {}", report.restored_files);

        if !report.skipped_files.is_empty() {
            println!("  Skipped: {}", report.skipped_files.len());
            for (path, reason) in &report.skipped_files {
                println!("    - {}: {}", path.display(), reason);
            }
        }

        if !report.failed_restores.is_empty() {
            println!("  Failed: {}", report.failed_restores.len());
            for (path, reason) in &report.failed_restores {
                eprintln!("    - {}: {}", path.display(), reason);
            }
        }

        if !report.is_complete_success() {
            Self::warning("History file was NOT deleted. Fix the issues above and try again.");
        }
    }
}
