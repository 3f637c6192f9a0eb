//! Error types for the media catalog

use std::path::PathBuf;
use thiserror::Error;

/// Error kinds that can occur while scanning or querying the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorKind {
    /// Scan root does not exist
    RootNotFound,
    /// Permission denied when accessing a file or directory
    PermissionDenied,
    /// Filesystem error while enumerating the tree
    Traversal,
    /// Duplicate path on insert (unique constraint on `path`)
    ConstraintViolation,
    /// Database operation failed
    Database,
    /// Other I/O error
    Io,
}

/// An error from the catalog store or scan engine
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CatalogError {
    /// The kind of error
    pub kind: CatalogErrorKind,
    /// The path where the error occurred, if any
    pub path: Option<PathBuf>,
    /// Human-readable error message
    pub message: String,
}

impl CatalogError {
    /// Create a new catalog error
    pub fn new(kind: CatalogErrorKind, path: Option<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path,
            message: message.into(),
        }
    }

    /// Scan root missing or not a filesystem object we can read
    pub fn root_not_found(path: PathBuf) -> Self {
        Self::new(
            CatalogErrorKind::RootNotFound,
            Some(path.clone()),
            format!("scan root not found: {}", path.display()),
        )
    }

    /// Permission denied on a path
    pub fn permission_denied(path: PathBuf) -> Self {
        Self::new(
            CatalogErrorKind::PermissionDenied,
            Some(path.clone()),
            format!("permission denied: {}", path.display()),
        )
    }

    /// Duplicate path rejected by the unique index
    pub fn constraint_violation(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self::new(
            CatalogErrorKind::ConstraintViolation,
            Some(path.clone()),
            format!("path already cataloged: {}", path.display()),
        )
    }

    /// Database operation failed
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(CatalogErrorKind::Database, None, message)
    }

    /// True iff this error is a duplicate-path insert rejection.
    pub fn is_constraint_violation(&self) -> bool {
        self.kind == CatalogErrorKind::ConstraintViolation
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        // RootNotFound is reserved for the scan engine's root check; a
        // generic NotFound here could come from anywhere (a bind path, a
        // database file) and stays a plain I/O error.
        let kind = match err.kind() {
            std::io::ErrorKind::PermissionDenied => CatalogErrorKind::PermissionDenied,
            _ => CatalogErrorKind::Io,
        };
        Self::new(kind, None, err.to_string())
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        // Surface a violated unique index as its own kind so the scanner
        // can recover it as "already cataloged".
        if let rusqlite::Error::SqliteFailure(e, _) = &err {
            if e.code == rusqlite::ErrorCode::ConstraintViolation {
                return Self::new(CatalogErrorKind::ConstraintViolation, None, err.to_string());
            }
        }
        Self::database(err.to_string())
    }
}

impl From<walkdir::Error> for CatalogError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.to_path_buf());
        let kind = if err.io_error().map(|e| e.kind())
            == Some(std::io::ErrorKind::PermissionDenied)
        {
            CatalogErrorKind::PermissionDenied
        } else {
            CatalogErrorKind::Traversal
        };
        Self::new(kind, path, err.to_string())
    }
}
