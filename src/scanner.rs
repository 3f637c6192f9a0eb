//! Scan engine - turns a directory traversal into catalog insertions

use std::path::Path;
use std::time::Instant;
use walkdir::WalkDir;

use crate::config::ScanConfig;
use crate::db::CatalogStore;
use crate::error::CatalogError;
use crate::models::{MediaKind, NewMediaRecord, ScanReport};

/// Per-file outcome of the scan pipeline
///
/// Everything except `Added` is a skip; the distinction keeps the report
/// tallies honest and keeps per-file skips separate from scan-level aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileOutcome {
    /// New record inserted
    Added,
    /// Path already present in the catalog
    AlreadyCataloged,
    /// Extension matched neither kind table
    Unclassified,
    /// File disappeared or became unreadable between enumeration and stat
    Vanished,
    /// Insert failed for a reason other than a duplicate path
    Failed,
}

/// Walk the tree under `config.root` and insert every new, classifiable
/// file into the catalog.
///
/// Re-running on an unchanged tree adds nothing. Per-file problems are
/// skipped; a missing root or a tree-enumeration failure aborts the scan.
/// Records inserted before an abort are retained.
///
/// A root that is a single regular file is processed as one entry.
pub fn scan(store: &mut CatalogStore, config: &ScanConfig) -> Result<ScanReport, CatalogError> {
    let start = Instant::now();

    // Canonicalize up front: a missing or unreadable root is a scan-level
    // error, and stored paths must be absolute.
    let root = std::fs::canonicalize(&config.root).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CatalogError::root_not_found(config.root.clone()),
        std::io::ErrorKind::PermissionDenied => {
            CatalogError::permission_denied(config.root.clone())
        }
        _ => CatalogError::from(e),
    })?;

    log::info!("starting scan of {}", root.display());

    let mut report = ScanReport::default();

    let mut walker = WalkDir::new(&root).follow_links(config.follow_links);
    if let Some(depth) = config.max_depth {
        walker = walker.max_depth(depth);
    }

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // An entry that vanished between listing and stat is a per-file
            // skip; any other enumeration failure aborts the walk.
            Err(e) if e.io_error().map(|io| io.kind()) == Some(std::io::ErrorKind::NotFound) => {
                report.skipped += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        // Directories contribute nothing; non-regular files (sockets,
        // fifos, unfollowed symlinks) are not media.
        if !entry.file_type().is_file() {
            continue;
        }

        match process_file(store, entry.path())? {
            FileOutcome::Added => report.added += 1,
            FileOutcome::AlreadyCataloged => report.already_cataloged += 1,
            FileOutcome::Unclassified => report.unclassified += 1,
            FileOutcome::Vanished | FileOutcome::Failed => report.skipped += 1,
        }
    }

    report.duration_ms = start.elapsed().as_millis() as u64;
    log::info!(
        "scan complete: {} new items ({} already cataloged, {} unclassified, {} skipped) in {}ms",
        report.added,
        report.already_cataloged,
        report.unclassified,
        report.skipped,
        report.duration_ms
    );
    Ok(report)
}

/// Run one regular file through classify / dedup / insert.
///
/// Store read failures propagate; everything that is wrong with the file
/// itself comes back as a skip outcome.
fn process_file(store: &mut CatalogStore, path: &Path) -> Result<FileOutcome, CatalogError> {
    let kind = match MediaKind::from_path(path) {
        Some(kind) => kind,
        None => return Ok(FileOutcome::Unclassified),
    };

    let path_str = path.to_string_lossy().to_string();
    if store.exists(&path_str)? {
        return Ok(FileOutcome::AlreadyCataloged);
    }

    // Size comes from a fresh stat; the file may be gone by now.
    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(_) => return Ok(FileOutcome::Vanished),
    };

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let record = NewMediaRecord::new(path_str, filename, metadata.len(), kind);
    match store.insert(&record) {
        Ok(_) => Ok(FileOutcome::Added),
        // Backstop: the unique index caught a path the exists() check
        // missed. Already cataloged, not a failure.
        Err(e) if e.is_constraint_violation() => Ok(FileOutcome::AlreadyCataloged),
        Err(e) => {
            log::warn!("failed to insert {}: {}", record.path, e);
            Ok(FileOutcome::Failed)
        }
    }
}
