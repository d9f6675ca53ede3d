/// Content-type to extension registry.
///
/// This module maps a detected content type (a MIME-like token such as
/// `image/png`) to the ordered list of file extensions considered acceptable
/// for it. The first extension of each list is the primary one, used when a
/// mismatched file is renamed.
///
/// # Examples
///
/// ```
/// use extcheck::registry::TypeRegistry;
///
/// let registry = TypeRegistry::default();
/// assert_eq!(registry.primary_extension("image/png"), Some("png"));
/// assert!(registry.lookup("image/jpeg").iter().any(|ext| ext == "jpeg"));
/// assert!(registry.lookup("application/x-unheard-of").is_empty());
/// ```
use std::collections::HashMap;

/// Maps content types to their acceptable extensions.
///
/// Lookups are exact string matches on the content type. Extensions are stored
/// lowercase, without a leading dot, unique within a set.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    map: HashMap<String, Vec<String>>,
}

impl TypeRegistry {
    /// Creates a registry populated with the built-in table.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.populate_standard_mappings();
        registry
    }

    /// Creates a registry with no mappings at all.
    pub fn empty() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    fn populate_standard_mappings(&mut self) {
        // Images
        self.add_mapping("image/jpeg", &["jpg", "jpeg", "jpe", "jfif"]);
        self.add_mapping("image/png", &["png"]);
        self.add_mapping("image/apng", &["apng", "png"]);
        self.add_mapping("image/gif", &["gif"]);
        self.add_mapping("image/webp", &["webp"]);
        self.add_mapping("image/bmp", &["bmp", "dib"]);
        self.add_mapping("image/tiff", &["tif", "tiff"]);
        self.add_mapping("image/heif", &["heic", "heif"]);
        self.add_mapping("image/avif", &["avif"]);
        self.add_mapping("image/jxl", &["jxl"]);
        self.add_mapping("image/vnd.microsoft.icon", &["ico"]);
        self.add_mapping("image/x-icon", &["ico"]);
        self.add_mapping("image/vnd.adobe.photoshop", &["psd"]);
        self.add_mapping("image/svg+xml", &["svg", "svgz"]);
        self.add_mapping("image/x-canon-cr2", &["cr2"]);
        self.add_mapping("image/openraster", &["ora"]);

        // Audio
        self.add_mapping("audio/mpeg", &["mp3"]);
        self.add_mapping("audio/x-flac", &["flac"]);
        self.add_mapping("audio/x-wav", &["wav"]);
        self.add_mapping("audio/ogg", &["ogg", "oga", "opus"]);
        self.add_mapping("audio/m4a", &["m4a"]);
        self.add_mapping("audio/aac", &["aac"]);
        self.add_mapping("audio/midi", &["mid", "midi"]);
        self.add_mapping("audio/x-aiff", &["aif", "aiff"]);
        self.add_mapping("audio/amr", &["amr"]);

        // Video
        self.add_mapping("video/mp4", &["mp4", "m4v"]);
        self.add_mapping("video/quicktime", &["mov", "qt"]);
        self.add_mapping("video/x-matroska", &["mkv"]);
        self.add_mapping("video/webm", &["webm"]);
        self.add_mapping("video/x-msvideo", &["avi"]);
        self.add_mapping("video/x-flv", &["flv"]);
        self.add_mapping("video/x-ms-wmv", &["wmv", "asf"]);
        self.add_mapping("video/mpeg", &["mpg", "mpeg"]);
        self.add_mapping("video/x-m4v", &["m4v", "mp4"]);

        // Documents
        self.add_mapping("application/pdf", &["pdf"]);
        self.add_mapping("application/rtf", &["rtf"]);
        self.add_mapping("application/postscript", &["ps", "eps"]);
        self.add_mapping("application/epub+zip", &["epub"]);
        self.add_mapping("application/msword", &["doc", "dot"]);
        self.add_mapping(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            &["docx", "docm", "dotx"],
        );
        self.add_mapping("application/vnd.ms-excel", &["xls", "xlt"]);
        self.add_mapping(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            &["xlsx", "xlsm", "xltx"],
        );
        self.add_mapping("application/vnd.ms-powerpoint", &["ppt", "pot", "pps"]);
        self.add_mapping(
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            &["pptx", "pptm", "potx", "ppsx"],
        );
        self.add_mapping("application/vnd.oasis.opendocument.text", &["odt"]);
        self.add_mapping("application/vnd.oasis.opendocument.spreadsheet", &["ods"]);
        self.add_mapping(
            "application/vnd.oasis.opendocument.presentation",
            &["odp"],
        );
        self.add_mapping("text/html", &["html", "htm", "xhtml"]);
        self.add_mapping(
            "text/xml",
            &[
                "xml", "svg", "xsd", "xsl", "xslt", "plist", "rss", "atom", "kml", "gpx",
                "xhtml", "config", "csproj", "resx",
            ],
        );

        // Archives
        self.add_mapping(
            "application/zip",
            &[
                "zip", "jar", "apk", "xpi", "ipa", "aar", "whl", "nupkg", "cbz", "kmz", "vsix",
            ],
        );
        self.add_mapping("application/gzip", &["gz", "tgz"]);
        self.add_mapping("application/x-bzip2", &["bz2", "tbz2"]);
        self.add_mapping("application/x-xz", &["xz", "txz"]);
        self.add_mapping("application/zstd", &["zst"]);
        self.add_mapping("application/x-7z-compressed", &["7z"]);
        self.add_mapping("application/vnd.rar", &["rar", "cbr"]);
        self.add_mapping("application/x-tar", &["tar"]);
        self.add_mapping("application/x-lzip", &["lz"]);
        self.add_mapping("application/vnd.ms-cab-compressed", &["cab"]);
        self.add_mapping("application/x-rpm", &["rpm"]);
        self.add_mapping("application/vnd.debian.binary-package", &["deb"]);
        self.add_mapping("application/java-archive", &["jar"]);
        self.add_mapping("application/vnd.android.package-archive", &["apk"]);

        // Fonts
        self.add_mapping("font/ttf", &["ttf"]);
        self.add_mapping("font/otf", &["otf"]);
        self.add_mapping("font/woff", &["woff"]);
        self.add_mapping("font/woff2", &["woff2"]);
        self.add_mapping("application/font-woff", &["woff", "woff2"]);
        self.add_mapping("application/font-sfnt", &["ttf", "otf"]);

        // Binaries and data
        self.add_mapping(
            "application/vnd.microsoft.portable-executable",
            &["exe", "dll", "sys", "scr", "efi"],
        );
        self.add_mapping("application/wasm", &["wasm"]);
        self.add_mapping("application/x-sqlite3", &["sqlite", "sqlite3", "db"]);
        self.add_mapping("application/vnd.sqlite3", &["sqlite", "sqlite3", "db"]);
        self.add_mapping("application/x-shockwave-flash", &["swf"]);
        self.add_mapping("application/x-apple-diskimage", &["dmg"]);
        self.add_mapping("application/x-iso9660-image", &["iso"]);
    }

    /// Adds extensions to the set of a content type.
    ///
    /// Extensions are lowercased and stripped of a leading dot. A new content
    /// type gets a fresh set whose first extension becomes the primary one; an
    /// existing set keeps its order and only gains the extensions it lacks.
    pub fn add_mapping(&mut self, content_type: &str, extensions: &[&str]) {
        let set = self.map.entry(content_type.to_string()).or_default();
        for ext in extensions {
            let ext = ext.trim_start_matches('.').to_lowercase();
            if !ext.is_empty() && !set.contains(&ext) {
                set.push(ext);
            }
        }
        if set.is_empty() {
            self.map.remove(content_type);
        }
    }

    /// Returns the acceptable extensions for a content type.
    ///
    /// Unknown content types yield an empty slice, never an error.
    pub fn lookup(&self, content_type: &str) -> &[String] {
        self.map
            .get(content_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the preferred extension for a content type, if it is registered.
    pub fn primary_extension(&self, content_type: &str) -> Option<&str> {
        self.lookup(content_type).first().map(String::as_str)
    }

    /// Returns true if the content type has a registered extension set.
    pub fn contains(&self, content_type: &str) -> bool {
        self.map.contains_key(content_type)
    }

    /// Number of registered content types.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_types() {
        let registry = TypeRegistry::new();
        assert_eq!(registry.lookup("image/png"), ["png"]);
        assert_eq!(registry.lookup("application/pdf"), ["pdf"]);
        assert_eq!(registry.primary_extension("image/jpeg"), Some("jpg"));
    }

    #[test]
    fn test_lookup_unknown_type_is_empty() {
        let registry = TypeRegistry::new();
        assert!(registry.lookup("application/x-custom").is_empty());
        assert!(registry.lookup("").is_empty());
        assert_eq!(registry.primary_extension("application/x-custom"), None);
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let registry = TypeRegistry::new();
        assert!(registry.lookup("IMAGE/PNG").is_empty());
        assert!(registry.lookup(" image/png").is_empty());
    }

    #[test]
    fn test_fallback_types_are_not_registered() {
        let registry = TypeRegistry::new();
        assert!(!registry.contains("text/plain"));
        assert!(!registry.contains("application/octet-stream"));
    }

    #[test]
    fn test_extension_sets_are_unique_and_lowercase() {
        let registry = TypeRegistry::new();
        for set in registry.map.values() {
            assert!(!set.is_empty());
            for (i, ext) in set.iter().enumerate() {
                assert_eq!(ext, &ext.to_lowercase());
                assert!(!ext.starts_with('.'));
                assert!(!set[i + 1..].contains(ext), "duplicate {ext} in {set:?}");
            }
        }
    }

    #[test]
    fn test_add_mapping_new_type() {
        let mut registry = TypeRegistry::empty();
        registry.add_mapping("application/x-custom", &[".XYZ", "xyz", "abc"]);
        assert_eq!(registry.lookup("application/x-custom"), ["xyz", "abc"]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_mapping_extends_existing_set_keeping_primary() {
        let mut registry = TypeRegistry::new();
        registry.add_mapping("image/png", &["PNG", "pngx"]);
        assert_eq!(registry.lookup("image/png"), ["png", "pngx"]);
    }

    #[test]
    fn test_add_mapping_with_no_extensions_registers_nothing() {
        let mut registry = TypeRegistry::empty();
        registry.add_mapping("application/x-empty", &["", "."]);
        assert!(!registry.contains("application/x-empty"));
        assert!(registry.is_empty());
    }
}
