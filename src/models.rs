//! Core data models for the media catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Media kind classification
///
/// Only these two kinds are ever stored; a file whose extension matches
/// neither table is skipped by the scanner and never reaches the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Video files (mp4, mkv, avi, etc.)
    Video,
    /// Image files (jpg, png, webp, etc.)
    Image,
}

impl MediaKind {
    /// Classify a file extension, case-insensitively.
    ///
    /// Returns `None` for anything outside the fixed table; that is a
    /// normal negative result, not an error.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext_lower = ext.to_lowercase();
        match ext_lower.as_str() {
            // Video extensions
            "mp4" | "avi" | "mkv" | "mov" | "wmv" | "flv" | "webm" => Some(MediaKind::Video),
            // Image extensions
            "jpg" | "jpeg" | "png" | "gif" | "webp" => Some(MediaKind::Image),
            _ => None,
        }
    }

    /// Classify a path by its extension.
    ///
    /// Hidden files and files without an extension classify as `None`.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Image => "image",
        }
    }

    /// Parse the stored string representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "video" => Some(MediaKind::Video),
            "image" => Some(MediaKind::Image),
            _ => None,
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One cataloged media file
///
/// Records are append-only: `size` and `created_at` are captured at first
/// indexing and never refreshed by later scans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRecord {
    /// Surrogate key assigned by the store on insert
    pub id: i64,
    /// Absolute filesystem path, unique across the catalog
    pub path: String,
    /// Base name of the file
    pub filename: String,
    /// File size in bytes at scan time
    pub size: u64,
    /// Media kind derived from the extension
    pub kind: MediaKind,
    /// Timestamp of first indexing
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new catalog entry
///
/// The store assigns `id` and stamps `created_at` at insert time.
#[derive(Debug, Clone)]
pub struct NewMediaRecord {
    pub path: String,
    pub filename: String,
    pub size: u64,
    pub kind: MediaKind,
}

impl NewMediaRecord {
    /// Build an insert payload from an absolute path and filesystem metadata.
    pub fn new(
        path: impl Into<String>,
        filename: impl Into<String>,
        size: u64,
        kind: MediaKind,
    ) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
            size,
            kind,
        }
    }
}

/// Aggregate catalog counts, computed from stored rows on every call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogStats {
    /// Total number of cataloged files
    pub total: u64,
    /// Number of video records
    pub video: u64,
    /// Number of image records
    pub image: u64,
}

/// Result of one scan invocation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    /// Number of records inserted by this scan
    pub added: u64,
    /// Files that were already cataloged and skipped
    pub already_cataloged: u64,
    /// Files whose extension matched neither kind table
    pub unclassified: u64,
    /// Files that vanished or became unreadable mid-scan
    pub skipped: u64,
    /// Total scan duration in milliseconds
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;

    #[test]
    fn test_media_kind_from_extension() {
        // Video extensions
        assert_eq!(MediaKind::from_extension("mp4"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_extension("MKV"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_extension("avi"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_extension("mov"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_extension("wmv"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_extension("flv"), Some(MediaKind::Video));
        assert_eq!(MediaKind::from_extension("webm"), Some(MediaKind::Video));

        // Image extensions
        assert_eq!(MediaKind::from_extension("jpg"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_extension("JPEG"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_extension("png"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_extension("gif"), Some(MediaKind::Image));
        assert_eq!(MediaKind::from_extension("webp"), Some(MediaKind::Image));

        // Everything else is a negative, not an error
        assert_eq!(MediaKind::from_extension("txt"), None);
        assert_eq!(MediaKind::from_extension("pdf"), None);
        assert_eq!(MediaKind::from_extension("mp3"), None);
        assert_eq!(MediaKind::from_extension(""), None);
    }

    #[test]
    fn test_media_kind_from_path() {
        assert_eq!(
            MediaKind::from_path(&PathBuf::from("/media/clip.mp4")),
            Some(MediaKind::Video)
        );
        assert_eq!(
            MediaKind::from_path(&PathBuf::from("/media/FILE.MP4")),
            Some(MediaKind::Video)
        );
        assert_eq!(
            MediaKind::from_path(&PathBuf::from("/media/photo.jpeg")),
            Some(MediaKind::Image)
        );
        // No extension, hidden file, unrecognized extension
        assert_eq!(MediaKind::from_path(&PathBuf::from("/media/README")), None);
        assert_eq!(MediaKind::from_path(&PathBuf::from("/media/.hidden")), None);
        assert_eq!(MediaKind::from_path(&PathBuf::from("/media/doc.pdf")), None);
    }

    #[test]
    fn test_media_kind_roundtrip() {
        for kind in [MediaKind::Video, MediaKind::Image] {
            assert_eq!(MediaKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(MediaKind::parse("audio"), None);
        assert_eq!(MediaKind::parse(""), None);
    }

    #[test]
    fn test_media_kind_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&MediaKind::Video).unwrap(),
            "\"video\""
        );
        assert_eq!(
            serde_json::from_str::<MediaKind>("\"image\"").unwrap(),
            MediaKind::Image
        );
    }

    fn is_supported(ext: &str) -> bool {
        matches!(
            ext,
            "mp4" | "avi"
                | "mkv"
                | "mov"
                | "wmv"
                | "flv"
                | "webm"
                | "jpg"
                | "jpeg"
                | "png"
                | "gif"
                | "webp"
        )
    }

    proptest! {
        /// Classification only depends on the extension's lowercase form.
        #[test]
        fn classification_is_case_insensitive(
            ext in "(mp4|avi|mkv|mov|wmv|flv|webm|jpg|jpeg|png|gif|webp)",
        ) {
            let expected = MediaKind::from_extension(&ext);
            prop_assert!(expected.is_some());

            let mangled: String = ext
                .chars()
                .enumerate()
                .map(|(i, c)| if i % 2 == 0 { c.to_ascii_uppercase() } else { c })
                .collect();
            prop_assert_eq!(MediaKind::from_extension(&mangled), expected);
        }

        /// Extensions outside the fixed table never classify.
        #[test]
        fn unknown_extensions_never_classify(ext in "[a-z0-9]{1,6}") {
            if !is_supported(&ext) {
                prop_assert_eq!(MediaKind::from_extension(&ext), None);
            }
        }
    }
}
