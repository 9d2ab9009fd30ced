//! The transactional table store.
//!
//! All rows live in memory; durability comes from writing a full
//! snapshot after each committed transaction. One exclusive lock covers
//! both tables, so multi-row structural operations are serialized and
//! cannot interleave. A transaction that fails — including a failed
//! snapshot write — restores the pre-transaction state, so callers only
//! ever observe "fully applied" or "untouched".

use std::collections::HashMap;
use std::path::PathBuf;

use tokio::sync::RwLock;
use tracing::{debug, info};

use drivebox_core::config::store::StoreConfig;
use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_core::types::ItemId;
use drivebox_entity::file::FileEntry;
use drivebox_entity::folder::FolderEntry;

use crate::snapshot::SnapshotDocument;

/// A row stored in a [`Table`].
pub trait TableRow: Clone + Send + Sync + 'static {
    /// The row's primary key.
    fn row_id(&self) -> ItemId;
}

impl TableRow for FileEntry {
    fn row_id(&self) -> ItemId {
        self.id
    }
}

impl TableRow for FolderEntry {
    fn row_id(&self) -> ItemId {
        self.id
    }
}

/// One flat, id-keyed table.
#[derive(Debug, Clone)]
pub struct Table<R: TableRow> {
    rows: HashMap<ItemId, R>,
}

impl<R: TableRow> Table<R> {
    /// Insert a new row; the id must not be taken.
    pub fn insert(&mut self, row: R) -> AppResult<()> {
        let id = row.row_id();
        if self.rows.contains_key(&id) {
            return Err(AppError::conflict(format!("Row {id} already exists")));
        }
        self.rows.insert(id, row);
        Ok(())
    }

    /// Fetch a row by id.
    pub fn get(&self, id: ItemId) -> Option<&R> {
        self.rows.get(&id)
    }

    /// Apply a partial update to a row, returning the updated copy.
    pub fn update(&mut self, id: ItemId, apply: impl FnOnce(&mut R)) -> AppResult<R> {
        let row = self
            .rows
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Row {id} not found")))?;
        apply(row);
        Ok(row.clone())
    }

    /// Remove a row by id.
    pub fn remove(&mut self, id: ItemId) -> Option<R> {
        self.rows.remove(&id)
    }

    /// Iterate over all rows in unspecified order.
    pub fn rows(&self) -> impl Iterator<Item = &R> {
        self.rows.values()
    }

    /// Clone every row matching the predicate.
    pub fn filter(&self, predicate: impl Fn(&R) -> bool) -> Vec<R> {
        self.rows.values().filter(|row| predicate(row)).cloned().collect()
    }

    /// Count rows matching the predicate.
    pub fn count(&self, predicate: impl Fn(&R) -> bool) -> u64 {
        self.rows.values().filter(|row| predicate(row)).count() as u64
    }

    /// Total number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R: TableRow> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }
}

impl<R: TableRow> FromIterator<R> for Table<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().map(|row| (row.row_id(), row)).collect(),
        }
    }
}

/// Both drive tables, moved through transactions as one unit.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    /// The `files` table.
    pub files: Table<FileEntry>,
    /// The `folders` table.
    pub folders: Table<FolderEntry>,
}

/// Where committed state goes.
#[derive(Debug, Clone)]
enum Persistence {
    /// Nothing leaves memory; used by tests.
    Ephemeral,
    /// Full snapshot written to this path after every commit.
    Snapshot(PathBuf),
}

/// Handle to the drive's table store.
///
/// Held behind an `Arc` and injected into every repository; there is no
/// ambient global instance.
#[derive(Debug)]
pub struct DriveStore {
    tables: RwLock<Tables>,
    persistence: Persistence,
}

impl DriveStore {
    /// An empty store with no persistence.
    pub fn in_memory() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
            persistence: Persistence::Ephemeral,
        }
    }

    /// Open the store for a namespace, loading its snapshot when one
    /// exists.
    pub async fn open(config: &StoreConfig, namespace: &str) -> AppResult<Self> {
        if config.ephemeral {
            return Ok(Self::in_memory());
        }

        let path = config.snapshot_path(namespace);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create data directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let tables = match tokio::fs::read(&path).await {
            Ok(raw) => {
                let document: SnapshotDocument = serde_json::from_slice(&raw)?;
                let tables = document.into_tables();
                info!(
                    namespace,
                    files = tables.files.len(),
                    folders = tables.folders.len(),
                    "Loaded drive snapshot"
                );
                tables
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(namespace, "No snapshot found, starting empty");
                Tables::default()
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read snapshot '{}'", path.display()),
                    e,
                ));
            }
        };

        Ok(Self {
            tables: RwLock::new(tables),
            persistence: Persistence::Snapshot(path),
        })
    }

    /// Run a read-only closure under the shared lock.
    pub async fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        let guard = self.tables.read().await;
        f(&guard)
    }

    /// Run a mutating closure under the exclusive lock.
    ///
    /// The pre-transaction state is restored when the closure errors or
    /// the snapshot write fails.
    pub async fn transaction<T>(
        &self,
        f: impl FnOnce(&mut Tables) -> AppResult<T>,
    ) -> AppResult<T> {
        let mut guard = self.tables.write().await;
        let before = guard.clone();

        match f(&mut guard) {
            Ok(value) => {
                if let Err(e) = self.write_snapshot(&guard).await {
                    *guard = before;
                    return Err(e);
                }
                Ok(value)
            }
            Err(e) => {
                *guard = before;
                Err(e)
            }
        }
    }

    /// Write the current state out, regardless of pending transactions.
    pub async fn persist(&self) -> AppResult<()> {
        let guard = self.tables.read().await;
        self.write_snapshot(&guard).await
    }

    async fn write_snapshot(&self, tables: &Tables) -> AppResult<()> {
        let Persistence::Snapshot(path) = &self.persistence else {
            return Ok(());
        };

        let document = SnapshotDocument::from_tables(tables);
        let raw = serde_json::to_vec(&document)?;

        // Write-then-rename so a crash mid-write never truncates the
        // previous snapshot.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &raw).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write snapshot '{}'", tmp.display()),
                e,
            )
        })?;
        tokio::fs::rename(&tmp, path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace snapshot '{}'", path.display()),
                e,
            )
        })?;

        debug!(path = %path.display(), bytes = raw.len(), "Snapshot written");
        Ok(())
    }
}
