//! extcheck - finds files whose extension does not match their content
//!
//! This library detects each file's content type from its bytes, compares it
//! with the file's extension through a type-to-extension registry, collects
//! the mismatches into a report, and can walk an operator through renaming
//! them, with an undo for the renames.

pub mod aggregator;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod detect;
pub mod logging;
pub mod output;
pub mod registry;
pub mod renamer;
pub mod report;
pub mod resolution;
pub mod scan;
pub mod undo;

pub use aggregator::{AnomalyRecord, BatchAggregator, FileOutcome, RunSummary, SuggestionRecord};
pub use classifier::{Classification, Classifier, FileRecord};
pub use config::{CompiledFilters, Config, ConfigError};
pub use detect::{ContentDetector, InferDetector};
pub use registry::TypeRegistry;
pub use renamer::{RenameError, RenameLogEntry};
pub use resolution::{InteractiveResolver, Prompter, Resolution, ScriptedPrompter};
pub use undo::{UndoManager, UndoReport};

pub use cli::{Cli, RunOutcome, ScanOptions, run_cli, run_scan};
