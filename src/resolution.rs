//! Interactive resolution of a single anomaly.
//!
//! The operator is walked through a small state machine:
//!
//! ```text
//! ChooseAction ──► CollisionCheck ──► Confirm ──► Apply
//!      │                 │               │          │
//!      └──────► Confirm  └─► (terminal)  └─► (terminal)
//! ```
//!
//! Every prompt takes one line of input; an empty line selects the default.
//! In forensic mode the anomaly is shown and nothing else happens.

use crate::classifier::FileRecord;
use crate::output::OutputFormatter;
use crate::renamer::{RenameError, RenameLogEntry, apply_rename, path_taken, resolve_fix_target};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Source of operator answers and sink for the messages shown around them.
pub trait Prompter {
    /// Shows an informational message.
    fn say(&mut self, message: &str);

    /// Shows a problem the operator should know about.
    fn warn(&mut self, message: &str) {
        self.say(message);
    }

    /// Asks a question and returns the trimmed answer.
    ///
    /// End of input is an error, never an implicit default.
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

impl<P: Prompter + ?Sized> Prompter for Box<P> {
    fn say(&mut self, message: &str) {
        (**self).say(message);
    }

    fn warn(&mut self, message: &str) {
        (**self).warn(message);
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        (**self).ask(question)
    }
}

/// Prompts on the controlling terminal, falling back to standard input.
pub struct TerminalPrompter {
    input: Box<dyn BufRead>,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        let input: Box<dyn BufRead> = match File::open("/dev/tty") {
            Ok(tty) => Box::new(BufReader::new(tty)),
            Err(_) => Box::new(io::stdin().lock()),
        };
        Self { input }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn say(&mut self, message: &str) {
        OutputFormatter::plain(message);
    }

    fn warn(&mut self, message: &str) {
        OutputFormatter::warning(message);
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        OutputFormatter::prompt(question);
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        Ok(line.trim().to_string())
    }
}

/// Replays canned answers; useful for scripted runs and tests.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    messages: Vec<String>,
    questions: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Every message and warning shown so far.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Every question asked so far.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    /// Answers that were never consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn say(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.questions.push(question.to_string());
        self.answers
            .pop_front()
            .map(|answer| answer.trim().to_string())
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left"))
    }
}

/// First choice offered for an anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Replace the extension with the primary expected one.
    FixExtension,
    Skip,
    /// Keep the name and add the primary expected extension.
    AppendExtension,
    /// Type a new file name in the same directory.
    CustomRename,
}

impl Action {
    fn parse(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "" | "1" | "f" | "fix" => Some(Self::FixExtension),
            "2" | "s" | "skip" => Some(Self::Skip),
            "3" | "a" | "append" => Some(Self::AppendExtension),
            "4" | "c" | "custom" => Some(Self::CustomRename),
            _ => None,
        }
    }
}

/// Choice offered when the target name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionChoice {
    /// Add a `_NNN` suffix until the name is free.
    AutoSuffix,
    CustomRename,
    Overwrite,
    Skip,
}

impl CollisionChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.to_lowercase().as_str() {
            "" | "1" | "a" | "auto" => Some(Self::AutoSuffix),
            "2" | "c" | "custom" => Some(Self::CustomRename),
            "3" | "o" | "overwrite" => Some(Self::Overwrite),
            "4" | "s" | "skip" => Some(Self::Skip),
            _ => None,
        }
    }
}

/// Why an anomaly was left as it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFixedReason {
    /// The operator chose to skip.
    Skipped,
    /// The operator declined the final confirmation.
    Cancelled,
    /// A custom name was requested but none was given.
    EmptyName,
    /// The custom name was not a plain file name.
    InvalidName(String),
    /// The answer matched no menu option.
    InvalidChoice(String),
    /// The second custom name collided as well.
    UnresolvableCollision(PathBuf),
    /// The target turned out to be the file itself.
    Unchanged,
    /// The content type has no extension to offer.
    NoExpectedExtension,
    /// Read-only mode; nothing was offered.
    Forensic,
}

/// Failures that end a resolution without a decision from the operator.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error(transparent)]
    Rename(#[from] RenameError),
    #[error("failed to read operator input: {0}")]
    Prompt(#[from] io::Error),
}

/// Outcome of resolving one anomaly.
#[derive(Debug)]
pub enum Resolution {
    Fixed(RenameLogEntry),
    NotFixed(NotFixedReason),
    Failed(ResolutionError),
}

impl Resolution {
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

enum State {
    ChooseAction,
    CollisionCheck { target: PathBuf },
    Confirm { target: PathBuf },
    Apply { target: PathBuf },
    Done(Resolution),
}

/// Drives the operator through fixing anomalies, one at a time.
pub struct InteractiveResolver<P> {
    prompter: P,
    forensic: bool,
}

impl<P: Prompter> InteractiveResolver<P> {
    pub fn new(prompter: P, forensic: bool) -> Self {
        Self { prompter, forensic }
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn into_prompter(self) -> P {
        self.prompter
    }

    /// Resolves one anomaly.
    ///
    /// The only filesystem change this can make is the final rename in the
    /// apply step; every other path ends without touching the file.
    pub fn resolve(&mut self, record: &FileRecord) -> Resolution {
        self.present(record);

        if self.forensic {
            self.prompter
                .say("Forensic mode: read-only, no changes will be made.");
            return Resolution::NotFixed(NotFixedReason::Forensic);
        }

        let mut state = State::ChooseAction;
        loop {
            state = match state {
                State::Done(resolution) => {
                    debug!(path = %record.path.display(), ?resolution, "anomaly resolved");
                    return resolution;
                }
                other => self.step(record, other).unwrap_or_else(|e| {
                    self.prompter.warn(&format!("Could not resolve: {}", e));
                    State::Done(Resolution::Failed(e))
                }),
            };
        }
    }

    fn present(&mut self, record: &FileRecord) {
        let extension = if record.extension.is_empty() {
            "(none)"
        } else {
            record.extension.as_str()
        };
        self.prompter
            .warn(&format!("Extension mismatch: {}", record.path.display()));
        self.prompter.say(&format!(
            "  Detected type: {}\n  Actual extension: {}\n  Expected extensions: {}",
            record.content_type,
            extension,
            record.expected_joined()
        ));
    }

    fn step(&mut self, record: &FileRecord, state: State) -> Result<State, ResolutionError> {
        match state {
            State::ChooseAction => self.choose_action(record),
            State::CollisionCheck { target } => self.collision_check(record, target),
            State::Confirm { target } => self.confirm(record, target),
            State::Apply { target } => Ok(self.apply(record, target)),
            State::Done(resolution) => Ok(State::Done(resolution)),
        }
    }

    fn choose_action(&mut self, record: &FileRecord) -> Result<State, ResolutionError> {
        let Some(primary) = record.primary_extension() else {
            return Ok(not_fixed(NotFixedReason::NoExpectedExtension));
        };
        let fixed = record.path.with_extension(primary);
        let appended = append_extension(&record.path, primary);

        self.prompter.say(&format!(
            "  [1] Fix extension -> {} (default)\n  [2] Skip\n  [3] Append extension -> {}\n  [4] Custom name",
            file_name(&fixed),
            file_name(&appended)
        ));
        let answer = self.prompter.ask("Choose an action [1-4]:")?;

        let target = match Action::parse(&answer) {
            Some(Action::FixExtension) => fixed,
            Some(Action::AppendExtension) => appended,
            Some(Action::Skip) => return Ok(not_fixed(NotFixedReason::Skipped)),
            Some(Action::CustomRename) => match self.ask_custom_name(record)? {
                Ok(target) => target,
                Err(reason) => return Ok(not_fixed(reason)),
            },
            None => return Ok(not_fixed(NotFixedReason::InvalidChoice(answer))),
        };

        if target != record.path && path_taken(&target) {
            Ok(State::CollisionCheck { target })
        } else {
            Ok(State::Confirm { target })
        }
    }

    fn collision_check(
        &mut self,
        record: &FileRecord,
        target: PathBuf,
    ) -> Result<State, ResolutionError> {
        self.prompter
            .warn(&format!("Target already exists: {}", target.display()));
        self.prompter.say(
            "  [1] Add a numeric suffix (default)\n  [2] Custom name\n  [3] Overwrite\n  [4] Skip",
        );
        let answer = self.prompter.ask("Choose an option [1-4]:")?;

        match CollisionChoice::parse(&answer) {
            Some(CollisionChoice::AutoSuffix) => {
                let target = resolve_fix_target(&record.path, &target)?;
                Ok(State::Confirm { target })
            }
            Some(CollisionChoice::CustomRename) => match self.ask_custom_name(record)? {
                Ok(custom) if path_taken(&custom) => {
                    Ok(not_fixed(NotFixedReason::UnresolvableCollision(custom)))
                }
                Ok(custom) => Ok(State::Confirm { target: custom }),
                Err(reason) => Ok(not_fixed(reason)),
            },
            Some(CollisionChoice::Overwrite) => Ok(State::Confirm { target }),
            Some(CollisionChoice::Skip) => Ok(not_fixed(NotFixedReason::Skipped)),
            None => Ok(not_fixed(NotFixedReason::InvalidChoice(answer))),
        }
    }

    fn confirm(&mut self, record: &FileRecord, target: PathBuf) -> Result<State, ResolutionError> {
        self.prompter.say(&format!(
            "  {} -> {}",
            record.path.display(),
            target.display()
        ));
        let answer = self.prompter.ask("Rename? [Y/n]:")?;

        match answer.to_lowercase().as_str() {
            "" | "y" | "yes" => Ok(State::Apply { target }),
            _ => Ok(not_fixed(NotFixedReason::Cancelled)),
        }
    }

    fn apply(&mut self, record: &FileRecord, target: PathBuf) -> State {
        if target == record.path {
            return not_fixed(NotFixedReason::Unchanged);
        }

        match apply_rename(&record.path, &target) {
            Ok(entry) => {
                self.prompter
                    .say(&format!("Renamed to {}", entry.new_path.display()));
                State::Done(Resolution::Fixed(entry))
            }
            Err(e) => {
                self.prompter.warn(&format!("Rename failed: {}", e));
                State::Done(Resolution::Failed(e.into()))
            }
        }
    }

    /// Asks for a file name in the same directory as the record.
    ///
    /// The outer result carries input failures, the inner one a rejected name.
    fn ask_custom_name(
        &mut self,
        record: &FileRecord,
    ) -> Result<Result<PathBuf, NotFixedReason>, ResolutionError> {
        let name = self.prompter.ask("New file name (empty to skip):")?;
        if name.is_empty() {
            return Ok(Err(NotFixedReason::EmptyName));
        }
        if name == "." || name == ".." || name.contains(std::path::is_separator) {
            return Ok(Err(NotFixedReason::InvalidName(name)));
        }
        Ok(Ok(parent_dir(&record.path).join(name)))
    }
}

fn not_fixed(reason: NotFixedReason) -> State {
    State::Done(Resolution::NotFixed(reason))
}

fn parent_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}

fn append_extension(path: &Path, extension: &str) -> PathBuf {
    let mut appended = path.as_os_str().to_os_string();
    appended.push(".");
    appended.push(extension);
    PathBuf::from(appended)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeRegistry;
    use std::fs;
    use tempfile::TempDir;

    fn anomaly(dir: &Path, name: &str, content_type: &str) -> FileRecord {
        let path = dir.join(name);
        fs::write(&path, b"payload").expect("Failed to write test file");
        FileRecord::new(&path, content_type, &TypeRegistry::default())
    }

    fn resolve(record: &FileRecord, answers: &[&str]) -> (Resolution, ScriptedPrompter) {
        let mut resolver =
            InteractiveResolver::new(ScriptedPrompter::new(answers.iter().copied()), false);
        let resolution = resolver.resolve(record);
        (resolution, resolver.into_prompter())
    }

    #[test]
    fn test_default_fix_extension() {
        let temp_dir = TempDir::new().unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, prompter) = resolve(&record, &["", ""]);

        let Resolution::Fixed(entry) = resolution else {
            panic!("expected a fix, got {resolution:?}");
        };
        assert_eq!(entry.new_path, temp_dir.path().join("image.png"));
        assert!(!record.path.exists());
        assert!(temp_dir.path().join("image.png").exists());
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn test_skip_leaves_file() {
        let temp_dir = TempDir::new().unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, prompter) = resolve(&record, &["2"]);

        assert!(matches!(
            resolution,
            Resolution::NotFixed(NotFixedReason::Skipped)
        ));
        assert!(record.path.exists());
        assert_eq!(prompter.questions().len(), 1);
    }

    #[test]
    fn test_append_extension() {
        let temp_dir = TempDir::new().unwrap();
        let record = anomaly(temp_dir.path(), "scan", "application/pdf");

        let (resolution, _) = resolve(&record, &["a", "y"]);

        assert!(resolution.is_fixed());
        assert!(temp_dir.path().join("scan.pdf").exists());
    }

    #[test]
    fn test_append_keeps_old_extension() {
        let temp_dir = TempDir::new().unwrap();
        let record = anomaly(temp_dir.path(), "report.doc", "application/pdf");

        let (resolution, _) = resolve(&record, &["3", ""]);

        assert!(resolution.is_fixed());
        assert!(temp_dir.path().join("report.doc.pdf").exists());
    }

    #[test]
    fn test_custom_rename() {
        let temp_dir = TempDir::new().unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, _) = resolve(&record, &["4", "holiday.png", "yes"]);

        assert!(resolution.is_fixed());
        assert!(temp_dir.path().join("holiday.png").exists());
    }

    #[test]
    fn test_custom_rename_empty_name() {
        let temp_dir = TempDir::new().unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, _) = resolve(&record, &["c", ""]);

        assert!(matches!(
            resolution,
            Resolution::NotFixed(NotFixedReason::EmptyName)
        ));
        assert!(record.path.exists());
    }

    #[test]
    fn test_custom_rename_rejects_paths() {
        let temp_dir = TempDir::new().unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, _) = resolve(&record, &["4", "../escape.png"]);

        assert!(matches!(
            resolution,
            Resolution::NotFixed(NotFixedReason::InvalidName(_))
        ));
        assert!(record.path.exists());
    }

    #[test]
    fn test_invalid_choice() {
        let temp_dir = TempDir::new().unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, _) = resolve(&record, &["9"]);

        assert!(matches!(
            resolution,
            Resolution::NotFixed(NotFixedReason::InvalidChoice(ref answer)) if answer == "9"
        ));
    }

    #[test]
    fn test_declined_confirmation() {
        let temp_dir = TempDir::new().unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, _) = resolve(&record, &["", "n"]);

        assert!(matches!(
            resolution,
            Resolution::NotFixed(NotFixedReason::Cancelled)
        ));
        assert!(record.path.exists());
        assert!(!temp_dir.path().join("image.png").exists());
    }

    #[test]
    fn test_collision_auto_suffix() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("image.png"), b"other").unwrap();
        fs::write(temp_dir.path().join("image_001.png"), b"other").unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, prompter) = resolve(&record, &["", "", ""]);

        let Resolution::Fixed(entry) = resolution else {
            panic!("expected a fix, got {resolution:?}");
        };
        assert_eq!(entry.new_path, temp_dir.path().join("image_002.png"));
        assert_eq!(fs::read(temp_dir.path().join("image.png")).unwrap(), b"other");
        assert_eq!(prompter.questions().len(), 3);
    }

    #[test]
    fn test_collision_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("image.png"), b"other").unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, _) = resolve(&record, &["1", "o", "y"]);

        assert!(resolution.is_fixed());
        assert_eq!(
            fs::read(temp_dir.path().join("image.png")).unwrap(),
            b"payload"
        );
    }

    #[test]
    fn test_collision_custom_name_also_taken() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("image.png"), b"other").unwrap();
        fs::write(temp_dir.path().join("taken.png"), b"other").unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, prompter) = resolve(&record, &["", "2", "taken.png"]);

        assert!(matches!(
            resolution,
            Resolution::NotFixed(NotFixedReason::UnresolvableCollision(_))
        ));
        assert!(record.path.exists());
        assert_eq!(prompter.questions().len(), 3);
    }

    #[test]
    fn test_collision_custom_name_free() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("image.png"), b"other").unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, _) = resolve(&record, &["", "c", "fresh.png", ""]);

        assert!(resolution.is_fixed());
        assert!(temp_dir.path().join("fresh.png").exists());
    }

    #[test]
    fn test_collision_skip() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("image.png"), b"other").unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, _) = resolve(&record, &["", "4"]);

        assert!(matches!(
            resolution,
            Resolution::NotFixed(NotFixedReason::Skipped)
        ));
    }

    #[test]
    fn test_custom_name_equal_to_original_is_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, _) = resolve(&record, &["4", "image.jpg", "y"]);

        assert!(matches!(
            resolution,
            Resolution::NotFixed(NotFixedReason::Unchanged)
        ));
        assert!(record.path.exists());
    }

    #[test]
    fn test_forensic_mode_asks_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");
        let mut resolver = InteractiveResolver::new(ScriptedPrompter::new(["", ""]), true);

        let resolution = resolver.resolve(&record);

        assert!(matches!(
            resolution,
            Resolution::NotFixed(NotFixedReason::Forensic)
        ));
        let prompter = resolver.into_prompter();
        assert!(prompter.questions().is_empty());
        assert_eq!(prompter.remaining(), 2);
        assert!(
            prompter
                .messages()
                .iter()
                .any(|m| m.contains("image.jpg"))
        );
        assert!(record.path.exists());
    }

    #[test]
    fn test_end_of_input_fails_without_renaming() {
        let temp_dir = TempDir::new().unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, _) = resolve(&record, &[]);

        assert!(matches!(
            resolution,
            Resolution::Failed(ResolutionError::Prompt(_))
        ));
        assert!(record.path.exists());
    }

    #[test]
    fn test_rename_failure_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");
        // File disappears between detection and the rename.
        fs::remove_file(&record.path).unwrap();

        let (resolution, prompter) = resolve(&record, &["", ""]);

        assert!(matches!(
            resolution,
            Resolution::Failed(ResolutionError::Rename(RenameError::RenameFailed { .. }))
        ));
        assert!(
            prompter
                .messages()
                .iter()
                .any(|m| m.starts_with("Rename failed"))
        );
    }

    #[test]
    fn test_collision_with_no_free_suffix_fails() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        fs::write(base.join("image.png"), b"other").unwrap();
        for n in 1..=crate::renamer::MAX_SUFFIX_ATTEMPTS {
            fs::write(base.join(format!("image_{n:03}.png")), b"other").unwrap();
        }
        let record = anomaly(base, "image.jpg", "image/png");

        let (resolution, prompter) = resolve(&record, &["", ""]);

        assert!(matches!(
            resolution,
            Resolution::Failed(ResolutionError::Rename(RenameError::PathExhausted { .. }))
        ));
        assert!(record.path.exists());
        assert_eq!(fs::read(base.join("image.png")).unwrap(), b"other");
        assert!(
            prompter
                .messages()
                .iter()
                .any(|m| m.starts_with("Could not resolve"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_fix_keeps_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(OsStr::from_bytes(b"caf\xe9.jpg"));
        fs::write(&path, b"payload").unwrap();
        let record = FileRecord::new(&path, "image/png", &TypeRegistry::default());

        let (resolution, _) = resolve(&record, &["", ""]);

        let Resolution::Fixed(entry) = resolution else {
            panic!("expected a fix, got {resolution:?}");
        };
        assert_eq!(
            entry.new_path.file_name().unwrap().to_os_string().into_vec(),
            b"caf\xe9.png"
        );
        assert!(entry.new_path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_target_is_a_collision() {
        let temp_dir = TempDir::new().unwrap();
        let link = temp_dir.path().join("image.png");
        std::os::unix::fs::symlink(temp_dir.path().join("nowhere"), &link).unwrap();
        let record = anomaly(temp_dir.path(), "image.jpg", "image/png");

        let (resolution, prompter) = resolve(&record, &["", "4"]);

        assert!(matches!(
            resolution,
            Resolution::NotFixed(NotFixedReason::Skipped)
        ));
        assert_eq!(prompter.questions()[1], "Choose an option [1-4]:");
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(record.path.exists());
    }
}
