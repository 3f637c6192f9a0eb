//! Catalog store backed by SQLite

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::error::CatalogError;
use crate::models::{CatalogStats, MediaKind, MediaRecord, NewMediaRecord};

/// Durable, deduplicated store of [`MediaRecord`]s
///
/// The store is the only component that touches the database. `insert` is
/// the single mutator; everything else reads. Uniqueness of `path` is
/// enforced by a unique index as a backstop even when callers check
/// [`CatalogStore::exists`] first.
pub struct CatalogStore {
    conn: Connection,
}

impl CatalogStore {
    /// Open or create the catalog database at the given path
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Open an in-memory catalog (for testing)
    pub fn open_memory() -> Result<Self, CatalogError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<(), CatalogError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS media (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                path TEXT NOT NULL UNIQUE,
                filename TEXT NOT NULL,
                size INTEGER NOT NULL,
                kind TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_media_kind ON media(kind);
            ",
        )?;
        Ok(())
    }

    /// Check whether a path is already cataloged
    pub fn exists(&self, path: &str) -> Result<bool, CatalogError> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT id FROM media WHERE path = ?1", [path], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// Insert a new record, stamping `created_at`, and return its id.
    ///
    /// A duplicate path fails with a `ConstraintViolation` kind.
    pub fn insert(&mut self, record: &NewMediaRecord) -> Result<i64, CatalogError> {
        let created_at: DateTime<Utc> = Utc::now();
        self.conn
            .execute(
                "INSERT INTO media (path, filename, size, kind, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.path,
                    record.filename,
                    record.size as i64,
                    record.kind.as_str(),
                    created_at,
                ],
            )
            .map_err(|e| {
                let err = CatalogError::from(e);
                if err.is_constraint_violation() {
                    CatalogError::constraint_violation(record.path.clone())
                } else {
                    err
                }
            })?;
        Ok(self.conn.last_insert_rowid())
    }

    /// List all records, optionally restricted to one kind, newest first
    pub fn list_all(&self, kind: Option<MediaKind>) -> Result<Vec<MediaRecord>, CatalogError> {
        let base = "SELECT id, path, filename, size, kind, created_at FROM media";
        let order = "ORDER BY created_at DESC, id DESC";

        let mut records = Vec::new();
        match kind {
            Some(kind) => {
                let sql = format!("{base} WHERE kind = ?1 {order}");
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([kind.as_str()], Self::row_to_record)?;
                for row in rows {
                    records.push(row?);
                }
            }
            None => {
                let sql = format!("{base} {order}");
                let mut stmt = self.conn.prepare(&sql)?;
                let rows = stmt.query_map([], Self::row_to_record)?;
                for row in rows {
                    records.push(row?);
                }
            }
        }
        Ok(records)
    }

    /// Aggregate counts per kind, computed from the stored rows
    pub fn count_by_kind(&self) -> Result<CatalogStats, CatalogError> {
        let mut stmt = self
            .conn
            .prepare("SELECT kind, COUNT(*) FROM media GROUP BY kind")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)? as u64))
        })?;

        let mut stats = CatalogStats::default();
        for row in rows {
            let (kind, count) = row?;
            match MediaKind::parse(&kind) {
                Some(MediaKind::Video) => stats.video = count,
                Some(MediaKind::Image) => stats.image = count,
                None => {}
            }
            stats.total += count;
        }
        Ok(stats)
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<MediaRecord> {
        let kind_str: String = row.get(4)?;
        let kind = MediaKind::parse(&kind_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                4,
                rusqlite::types::Type::Text,
                format!("unknown media kind: {kind_str}").into(),
            )
        })?;
        Ok(MediaRecord {
            id: row.get(0)?,
            path: row.get(1)?,
            filename: row.get(2)?,
            size: row.get::<_, i64>(3)? as u64,
            kind,
            created_at: row.get(5)?,
        })
    }
}
