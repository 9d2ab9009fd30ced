//! Snapshot document format.
//!
//! A snapshot is the full content of both tables as one JSON document.
//! Rows are stored as flat lists so the on-disk form stays readable and
//! diffable; the id-keyed maps are rebuilt on load.

use serde::{Deserialize, Serialize};

use drivebox_entity::file::FileEntry;
use drivebox_entity::folder::FolderEntry;

use crate::store::Tables;

/// Current snapshot format version.
const SNAPSHOT_VERSION: u32 = 1;

/// The on-disk snapshot document.
#[derive(Debug, Serialize, Deserialize)]
pub struct SnapshotDocument {
    /// Format version for future migrations.
    pub version: u32,
    /// All file rows.
    pub files: Vec<FileEntry>,
    /// All folder rows.
    pub folders: Vec<FolderEntry>,
}

impl SnapshotDocument {
    /// Capture the current tables.
    pub fn from_tables(tables: &Tables) -> Self {
        let mut files: Vec<FileEntry> = tables.files.rows().cloned().collect();
        let mut folders: Vec<FolderEntry> = tables.folders.rows().cloned().collect();
        // Stable output order keeps successive snapshots comparable.
        files.sort_by(|a, b| a.id.cmp(&b.id));
        folders.sort_by(|a, b| a.id.cmp(&b.id));
        Self {
            version: SNAPSHOT_VERSION,
            files,
            folders,
        }
    }

    /// Rebuild tables from the document.
    pub fn into_tables(self) -> Tables {
        Tables {
            files: self.files.into_iter().collect(),
            folders: self.folders.into_iter().collect(),
        }
    }
}
