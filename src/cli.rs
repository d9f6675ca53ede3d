//! Command-line interface module for extcheck.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing
//! - Configuration resolution
//! - Scan orchestration and artifact persistence
//! - Undo operation handling

use crate::aggregator::{BatchAggregator, RunSummary};
use crate::classifier::Classifier;
use crate::config::Config;
use crate::detect::{ContentDetector, InferDetector};
use crate::output::OutputFormatter;
use crate::renamer::{RenameHistory, RenameLog};
use crate::report::{artifact_stamp, persist_report, rename_log_path, report_path};
use crate::resolution::{Prompter, TerminalPrompter};
use crate::scan::collect_files;
use crate::undo::{UndoManager, UndoReport};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Detects files whose extension does not match their content.
#[derive(Debug, Parser)]
#[command(name = "extcheck", version, about)]
pub struct Cli {
    /// Directories to scan.
    #[arg(value_name = "DIRS", default_value = ".")]
    pub dirs: Vec<PathBuf>,

    /// Descend into subdirectories.
    #[arg(short, long)]
    pub recursive: bool,

    /// Offer to fix each mismatch as it is found.
    #[arg(short, long)]
    pub interactive: bool,

    /// Read-only mode: never rename files or write reports.
    #[arg(short, long)]
    pub forensic: bool,

    /// Verbose diagnostics.
    #[arg(short, long)]
    pub debug: bool,

    /// Configuration file to use instead of the default search.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory for the report, rename log and rename history.
    #[arg(short = 'o', long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Do not show a progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Revert the renames of the last interactive run.
    #[arg(long)]
    pub undo: bool,
}

/// Resolved settings of a scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub roots: Vec<PathBuf>,
    pub recursive: bool,
    pub interactive: bool,
    pub forensic: bool,
    pub debug: bool,
    pub show_progress: bool,
    pub log_dir: PathBuf,
}

impl ScanOptions {
    /// Non-interactive, non-recursive scan of `roots`, with artifacts in `log_dir`.
    pub fn new(roots: Vec<PathBuf>, log_dir: PathBuf) -> Self {
        Self {
            roots,
            recursive: false,
            interactive: false,
            forensic: false,
            debug: false,
            show_progress: false,
            log_dir,
        }
    }
}

/// Represents a CLI command to execute.
#[derive(Debug, Clone)]
pub enum CheckCommand {
    /// Scan directories for mismatched extensions.
    Scan(ScanOptions),
    /// Revert the renames recorded in `log_dir`.
    Undo { log_dir: PathBuf, forensic: bool },
}

/// What a command produced; `main` maps it to an exit status.
#[derive(Debug)]
pub enum RunOutcome {
    Scanned(RunSummary),
    Undone(UndoReport),
}

impl RunOutcome {
    /// True when nothing is left for the operator to deal with.
    pub fn is_clean(&self) -> bool {
        match self {
            RunOutcome::Scanned(summary) => summary.anomalies_remaining() == 0,
            RunOutcome::Undone(report) => report.is_complete_success(),
        }
    }
}

impl Cli {
    /// Resolves the command, letting flags win over configuration values.
    pub fn command(&self, config: &Config) -> CheckCommand {
        let log_dir = self
            .log_dir
            .clone()
            .or_else(|| config.output.log_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."));

        if self.undo {
            return CheckCommand::Undo {
                log_dir,
                forensic: self.forensic,
            };
        }

        CheckCommand::Scan(ScanOptions {
            roots: self.dirs.clone(),
            recursive: self.recursive,
            interactive: self.interactive,
            forensic: self.forensic,
            debug: self.debug,
            show_progress: !self.no_progress,
            log_dir,
        })
    }
}

/// Runs the CLI application for parsed arguments.
///
/// # Errors
///
/// Only fatal setup problems are errors: an unreadable or invalid
/// configuration, an unusable log directory, or a missing undo history.
/// Problems with individual files are reported and the run goes on.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use extcheck::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["extcheck", "-r", "/srv/uploads"]);
/// match run_cli(&cli) {
///     Ok(outcome) => println!("clean: {}", outcome.is_clean()),
///     Err(e) => eprintln!("Error: {:#}", e),
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<RunOutcome> {
    let config = Config::load(cli.config.as_deref()).context("Error loading configuration")?;

    match cli.command(&config) {
        CheckCommand::Scan(options) => {
            run_scan(&options, &config, &InferDetector::new(), None).map(RunOutcome::Scanned)
        }
        CheckCommand::Undo { log_dir, forensic } => {
            run_undo(&log_dir, forensic).map(RunOutcome::Undone)
        }
    }
}

/// Scans `options.roots` and returns the run summary.
///
/// With `options.interactive`, anomalies are resolved through `prompter`, or
/// through the terminal when none is given. Outside forensic mode the anomaly
/// report and the rename history are written to `options.log_dir`.
pub fn run_scan(
    options: &ScanOptions,
    config: &Config,
    detector: &dyn ContentDetector,
    prompter: Option<Box<dyn Prompter>>,
) -> Result<RunSummary> {
    let filters = config
        .compile_filters()
        .context("Error compiling filters")?;
    let classifier = Classifier::new(config.build_registry());
    let started = Local::now();
    let stamp = artifact_stamp(&started);

    if !options.forensic {
        fs::create_dir_all(&options.log_dir).with_context(|| {
            format!("Cannot create log directory {}", options.log_dir.display())
        })?;
    }

    let rename_log = if options.interactive && !options.forensic {
        RenameLog::to_file(rename_log_path(&options.log_dir, &stamp))
    } else {
        RenameLog::in_memory()
    };
    let mut aggregator = BatchAggregator::new(classifier).with_rename_log(rename_log);
    if options.interactive {
        let prompter: Box<dyn Prompter> = match prompter {
            Some(prompter) => prompter,
            None => Box::new(TerminalPrompter::new()),
        };
        aggregator = aggregator.interactive(prompter, options.forensic);
    }

    if options.forensic {
        OutputFormatter::forensic_notice("Read-only mode: files will not be renamed.");
    }

    let mut files = Vec::new();
    for root in &options.roots {
        match collect_files(root, options.recursive, &filters) {
            Ok(found) => {
                info!(root = %root.display(), files = found.len(), "collected files");
                files.extend(found);
            }
            Err(e) => OutputFormatter::warning(&format!("Skipping {}: {}", root.display(), e)),
        }
    }

    let progress = (options.show_progress && !options.interactive && !options.debug)
        .then(|| OutputFormatter::create_progress_bar(files.len() as u64));

    for path in &files {
        if !path.exists() {
            warn!(path = %path.display(), "file disappeared before it could be examined");
            if let Some(pb) = &progress {
                pb.inc(1);
            }
            continue;
        }

        let content_type = detector.detect(path);
        let outcome = aggregator.process(path, &content_type);
        let show = || {
            OutputFormatter::file_outcome(
                path,
                &content_type,
                &outcome,
                options.interactive,
                options.debug,
            )
        };
        match &progress {
            Some(pb) => {
                pb.suspend(show);
                pb.inc(1);
            }
            None => show(),
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    let summary = aggregator.finish();
    if !options.forensic {
        persist_artifacts(options, &summary, &started, &stamp);
    }
    OutputFormatter::run_summary(&summary, options.forensic);

    Ok(summary)
}

fn persist_artifacts(
    options: &ScanOptions,
    summary: &RunSummary,
    started: &DateTime<Local>,
    stamp: &str,
) {
    let path = report_path(&options.log_dir, stamp);
    match persist_report(&path, &summary.anomalies, started, &options.roots) {
        Ok(Some(path)) => OutputFormatter::info(&format!("Report saved to {}", path.display())),
        Ok(None) => debug!("no anomalies remain, no report written"),
        Err(e) => OutputFormatter::error(&format!(
            "Could not write report {}: {}",
            path.display(),
            e
        )),
    }

    if let Some(log) = &summary.rename_log
        && !summary.renames.is_empty()
    {
        OutputFormatter::info(&format!("Renames logged to {}", log.display()));
    }

    if summary.renames.is_empty() {
        return;
    }
    match RenameHistory::new(summary.renames.clone()).save(&options.log_dir) {
        Ok(_) => OutputFormatter::info(&format!(
            "History saved. Use 'extcheck --undo -o {}' to revert the renames.",
            options.log_dir.display()
        )),
        Err(e) => OutputFormatter::warning(&format!(
            "Could not save history: {}. Undo will not be available.",
            e
        )),
    }
}

/// Reverts the renames recorded in `log_dir`.
fn run_undo(log_dir: &Path, forensic: bool) -> Result<UndoReport> {
    if forensic {
        bail!("Undo renames files and is not available in forensic mode");
    }

    OutputFormatter::info("Undoing previous renames...");
    let report = UndoManager::undo(log_dir).context("Undo failed")?;
    OutputFormatter::undo_summary(&report);
    Ok(report)
}
