//! Anomaly classification.
//!
//! Decides whether a file's extension agrees with its detected content type,
//! using a [`TypeRegistry`] as the source of acceptable extensions.

use crate::registry::TypeRegistry;
use std::path::{Path, PathBuf};

/// Result of comparing a detected content type with a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// The extension is one of the registered extensions for the type.
    Match,
    /// The type is registered but the extension is not in its set.
    Anomaly,
    /// The type is unregistered and the file has an extension worth suggesting.
    UnknownSuggested,
    /// The type is unregistered and the file has no extension.
    UnknownIgnored,
}

/// Returns the byte index of the dot that starts the extension, if any.
///
/// A leading dot never counts: `.bashrc` has no extension, `.config.json` does.
fn extension_dot(basename: &str) -> Option<usize> {
    let offset = usize::from(basename.starts_with('.'));
    basename[offset..].rfind('.').map(|idx| idx + offset)
}

/// Extracts the lowercased extension of a file name.
///
/// # Examples
///
/// ```
/// use extcheck::classifier::extract_extension;
///
/// assert_eq!(extract_extension("photo.JPG"), "jpg");
/// assert_eq!(extract_extension(".bashrc"), "");
/// assert_eq!(extract_extension(".config.json"), "json");
/// assert_eq!(extract_extension("README"), "");
/// ```
pub fn extract_extension(basename: &str) -> String {
    extension_dot(basename)
        .map(|idx| basename[idx + 1..].to_lowercase())
        .unwrap_or_default()
}

/// A single file paired with its detection result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    pub basename: String,
    pub content_type: String,
    /// Lowercased extension, empty when the name has none.
    pub extension: String,
    /// Acceptable extensions for `content_type`, empty for unknown types.
    pub expected: Vec<String>,
}

impl FileRecord {
    pub fn new(path: &Path, content_type: &str, registry: &TypeRegistry) -> Self {
        let basename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let extension = extract_extension(&basename);
        Self {
            path: path.to_path_buf(),
            basename,
            content_type: content_type.to_string(),
            extension,
            expected: registry.lookup(content_type).to_vec(),
        }
    }

    /// The preferred extension for this file's content type.
    pub fn primary_extension(&self) -> Option<&str> {
        self.expected.first().map(String::as_str)
    }

    /// Expected extensions in report form, e.g. `jpg,jpeg`.
    pub fn expected_joined(&self) -> String {
        self.expected.join(",")
    }
}

/// Classifies files against an owned registry.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    registry: TypeRegistry,
}

impl Classifier {
    pub fn new(registry: TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Classifies a detected content type against an actual extension.
    ///
    /// The extension is compared case-insensitively; the content type must
    /// match a registry entry exactly.
    pub fn classify(&self, content_type: &str, extension: &str) -> Classification {
        let expected = self.registry.lookup(content_type);
        if expected.is_empty() {
            return if extension.is_empty() {
                Classification::UnknownIgnored
            } else {
                Classification::UnknownSuggested
            };
        }

        let extension = extension.to_lowercase();
        if expected.iter().any(|ext| *ext == extension) {
            Classification::Match
        } else {
            Classification::Anomaly
        }
    }

    /// Builds the record for a path and classifies it in one step.
    pub fn examine(&self, path: &Path, content_type: &str) -> (FileRecord, Classification) {
        let record = FileRecord::new(path, content_type, &self.registry);
        let classification = self.classify(&record.content_type, &record.extension);
        (record, classification)
    }
}
