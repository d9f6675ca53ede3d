//! Batch run aggregation.
//!
//! [`BatchAggregator`] owns the state of one run: it classifies every file it
//! is handed, routes anomalies through the interactive resolver when one is
//! configured, deduplicates suggestions and counts renames. [`BatchAggregator::finish`]
//! turns that state into a [`RunSummary`].

use crate::classifier::{Classification, Classifier, FileRecord};
use crate::renamer::{RenameLog, RenameLogEntry};
use crate::resolution::{InteractiveResolver, Prompter, Resolution};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A mismatch that remained after processing a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnomalyRecord {
    pub path: PathBuf,
    pub content_type: String,
    pub extension: String,
    /// Acceptable extensions joined with commas.
    pub expected: String,
}

impl From<&FileRecord> for AnomalyRecord {
    fn from(record: &FileRecord) -> Self {
        Self {
            path: record.path.clone(),
            content_type: record.content_type.clone(),
            extension: record.extension.clone(),
            expected: record.expected_joined(),
        }
    }
}

/// An unregistered content type seen with a concrete extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRecord {
    pub content_type: String,
    pub extension: String,
    /// First file that exhibited the pair.
    pub example_path: PathBuf,
}

/// What happened to a single processed file.
#[derive(Debug)]
pub enum FileOutcome {
    /// Extension agrees with the content.
    Match,
    /// Unknown type without an extension.
    Ignored,
    /// Unknown type with an extension; `new` is false when the pair was already seen.
    Suggested { new: bool },
    /// Mismatch recorded for the report.
    Anomaly(AnomalyRecord),
    /// Mismatch fixed by renaming.
    Fixed(RenameLogEntry),
    /// Mismatch left unfixed, but the file is no longer at its path.
    Vanished(PathBuf),
}

/// Mutable state of one run.
#[derive(Debug, Default)]
pub struct RunState {
    pub anomalies: Vec<AnomalyRecord>,
    pub suggestions: Vec<SuggestionRecord>,
    seen_suggestions: HashSet<(String, String)>,
    /// Raised by the first anomaly; only cleared at the end of the run.
    pub found_anomalies: bool,
    pub rename_count: usize,
    pub files_processed: usize,
}

impl RunState {
    /// Adds a suggestion unless its (type, extension) pair was already seen.
    fn suggest(&mut self, record: &FileRecord) -> bool {
        let key = (record.content_type.clone(), record.extension.clone());
        if !self.seen_suggestions.insert(key) {
            return false;
        }
        self.suggestions.push(SuggestionRecord {
            content_type: record.content_type.clone(),
            extension: record.extension.clone(),
            example_path: record.path.clone(),
        });
        true
    }

    fn record_anomaly(&mut self, record: &FileRecord) -> AnomalyRecord {
        let anomaly = AnomalyRecord::from(record);
        self.anomalies.push(anomaly.clone());
        anomaly
    }
}

/// Final figures of a run.
#[derive(Debug)]
pub struct RunSummary {
    pub files_processed: usize,
    pub anomalies_found: bool,
    pub renames_performed: usize,
    pub anomalies: Vec<AnomalyRecord>,
    pub suggestions: Vec<SuggestionRecord>,
    pub renames: Vec<RenameLogEntry>,
    pub rename_log: Option<PathBuf>,
}

impl RunSummary {
    pub fn anomalies_remaining(&self) -> usize {
        self.anomalies.len()
    }
}

/// Processes the files of one run.
pub struct BatchAggregator {
    classifier: Classifier,
    resolver: Option<InteractiveResolver<Box<dyn Prompter>>>,
    rename_log: RenameLog,
    state: RunState,
}

impl BatchAggregator {
    /// A non-interactive aggregator with an in-memory rename log.
    pub fn new(classifier: Classifier) -> Self {
        Self {
            classifier,
            resolver: None,
            rename_log: RenameLog::in_memory(),
            state: RunState::default(),
        }
    }

    /// Routes every anomaly through an interactive resolver.
    pub fn interactive(mut self, prompter: impl Prompter + 'static, forensic: bool) -> Self {
        let prompter: Box<dyn Prompter> = Box::new(prompter);
        self.resolver = Some(InteractiveResolver::new(prompter, forensic));
        self
    }

    pub fn with_rename_log(mut self, rename_log: RenameLog) -> Self {
        self.rename_log = rename_log;
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Classifies one file and records the result.
    pub fn process(&mut self, path: &Path, content_type: &str) -> FileOutcome {
        self.state.files_processed += 1;
        let (record, classification) = self.classifier.examine(path, content_type);
        debug!(
            path = %record.path.display(),
            content_type = %record.content_type,
            extension = %record.extension,
            ?classification,
            "classified file"
        );

        match classification {
            Classification::Match => FileOutcome::Match,
            Classification::UnknownIgnored => FileOutcome::Ignored,
            Classification::UnknownSuggested => FileOutcome::Suggested {
                new: self.state.suggest(&record),
            },
            Classification::Anomaly => {
                self.state.found_anomalies = true;
                self.handle_anomaly(&record)
            }
        }
    }

    fn handle_anomaly(&mut self, record: &FileRecord) -> FileOutcome {
        let Some(resolver) = self.resolver.as_mut() else {
            return FileOutcome::Anomaly(self.state.record_anomaly(record));
        };

        match resolver.resolve(record) {
            Resolution::Fixed(entry) => {
                self.state.rename_count += 1;
                self.rename_log.append(entry.clone());
                FileOutcome::Fixed(entry)
            }
            Resolution::NotFixed(reason) => {
                debug!(path = %record.path.display(), ?reason, "anomaly left unfixed");
                self.unresolved(record)
            }
            Resolution::Failed(e) => {
                warn!(path = %record.path.display(), error = %e, "could not resolve anomaly");
                self.unresolved(record)
            }
        }
    }

    fn unresolved(&mut self, record: &FileRecord) -> FileOutcome {
        if record.path.exists() {
            FileOutcome::Anomaly(self.state.record_anomaly(record))
        } else {
            warn!(path = %record.path.display(), "file disappeared while resolving its anomaly");
            FileOutcome::Vanished(record.path.clone())
        }
    }

    /// Ends the run.
    ///
    /// The anomaly flag raised during the run is re-derived here: when every
    /// anomaly was fixed along the way, nothing remains and the flag drops.
    pub fn finish(self) -> RunSummary {
        let mut state = self.state;
        if state.anomalies.is_empty() {
            state.found_anomalies = false;
        }

        let rename_log = self.rename_log.path().map(Path::to_path_buf);
        RunSummary {
            files_processed: state.files_processed,
            anomalies_found: state.found_anomalies,
            renames_performed: state.rename_count,
            anomalies: state.anomalies,
            suggestions: state.suggestions,
            renames: self.rename_log.into_entries(),
            rename_log,
        }
    }
}
