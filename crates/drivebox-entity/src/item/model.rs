//! Union of the two item kinds.
//!
//! Directory listings, search results, selections, and bulk actions all
//! operate over mixed files and folders; this enum is that surface.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivebox_core::types::path::DrivePath;
use drivebox_core::types::ItemId;

use crate::file::FileEntry;
use crate::folder::FolderEntry;

/// Which table a row lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    /// A file row.
    File,
    /// A folder row.
    Folder,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Folder => write!(f, "folder"),
        }
    }
}

/// A file or folder, as returned by listings and searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DriveItem {
    /// A file row.
    File(FileEntry),
    /// A folder row.
    Folder(FolderEntry),
}

impl DriveItem {
    /// The row id.
    pub fn id(&self) -> ItemId {
        match self {
            Self::File(file) => file.id,
            Self::Folder(folder) => folder.id,
        }
    }

    /// Which table the row lives in.
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::File(_) => ItemKind::File,
            Self::Folder(_) => ItemKind::Folder,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Self::File(file) => &file.name,
            Self::Folder(folder) => &folder.name,
        }
    }

    /// Comparison slug.
    pub fn slug(&self) -> &str {
        match self {
            Self::File(file) => &file.slug,
            Self::Folder(folder) => &folder.slug,
        }
    }

    /// Containing directory (for folders, the parent).
    pub fn path(&self) -> &DrivePath {
        match self {
            Self::File(file) => &file.path,
            Self::Folder(folder) => &folder.path,
        }
    }

    /// Favorite flag.
    pub fn is_favorite(&self) -> bool {
        match self {
            Self::File(file) => file.is_favorite,
            Self::Folder(folder) => folder.is_favorite,
        }
    }

    /// Last-modified timestamp.
    pub fn modified_at(&self) -> DateTime<Utc> {
        match self {
            Self::File(file) => file.modified_at,
            Self::Folder(folder) => folder.modified_at,
        }
    }

    /// Byte size; folders have none and sort as zero.
    pub fn size_bytes(&self) -> u64 {
        match self {
            Self::File(file) => file.size_bytes,
            Self::Folder(_) => 0,
        }
    }
}

impl From<FileEntry> for DriveItem {
    fn from(file: FileEntry) -> Self {
        Self::File(file)
    }
}

impl From<FolderEntry> for DriveItem {
    fn from(folder: FolderEntry) -> Self {
        Self::Folder(folder)
    }
}
