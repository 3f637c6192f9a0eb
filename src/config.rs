//! Scan configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one scan invocation
///
/// The symlink and depth policy belongs to the walk primitive, not the
/// engine; this is where the caller expresses it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Root directory (or single file) to scan
    pub root: PathBuf,

    /// Whether the walk follows symbolic links
    pub follow_links: bool,

    /// Maximum traversal depth; `None` means unbounded
    pub max_depth: Option<usize>,
}

impl ScanConfig {
    /// Create a config for the given root with default walk policy
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: false,
            max_depth: None,
        }
    }

    /// Set whether the walk follows symbolic links
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Limit the traversal depth
    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }
}
