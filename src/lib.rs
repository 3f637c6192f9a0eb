//! Media catalog: index local media files into a queryable SQLite catalog
//!
//! The core is the scan pipeline: walk a directory tree with walkdir,
//! classify files by extension, and insert new records with dedup-insert
//! semantics keyed on the absolute path. A thin HTTP layer and CLI sit on
//! top of the [`CatalogStore`] / [`scanner::scan`] interface.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod scanner;
pub mod server;

pub use config::ScanConfig;
pub use db::CatalogStore;
pub use error::{CatalogError, CatalogErrorKind};
pub use models::{CatalogStats, MediaKind, MediaRecord, NewMediaRecord, ScanReport};
pub use scanner::scan;
