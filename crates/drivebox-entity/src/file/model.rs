//! File entity model.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivebox_core::types::path::DrivePath;
use drivebox_core::types::slug::slugify;
use drivebox_core::types::ItemId;

/// A file stored in the drive.
///
/// `path` locates the **containing folder**; the file's own name is not
/// part of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Unique file identifier.
    pub id: ItemId,
    /// Display name, including the extension.
    pub name: String,
    /// Normalized form of `name`, used for duplicate detection among
    /// siblings.
    pub slug: String,
    /// Extension derived from `name` at creation (lowercase, empty when
    /// the name has no dot).
    pub extension: String,
    /// Content length in bytes.
    pub size_bytes: u64,
    /// Segments of the containing folder.
    pub path: DrivePath,
    /// User-toggleable favorite flag.
    pub is_favorite: bool,
    /// Opaque payload, owned exclusively by this entry.
    #[serde(with = "crate::content")]
    pub content: Bytes,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last mutated.
    pub modified_at: DateTime<Utc>,
}

impl FileEntry {
    /// Build a fresh entry from creation data; derives id, slug,
    /// extension, and size, and stamps both timestamps.
    pub fn create(data: CreateFile) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            slug: slugify(&data.name),
            extension: extension_of(&data.name),
            size_bytes: data.content.len() as u64,
            name: data.name,
            path: data.path,
            is_favorite: false,
            content: data.content,
            created_at: now,
            modified_at: now,
        }
    }
}

/// Data required to create a new file.
#[derive(Debug, Clone)]
pub struct CreateFile {
    /// Display name, including the extension.
    pub name: String,
    /// Content payload.
    pub content: Bytes,
    /// Containing folder.
    pub path: DrivePath,
}

/// Extension of a display name: the part after the last dot, lowercase;
/// empty when there is no dot.
pub fn extension_of(name: &str) -> String {
    name.rsplit('.')
        .next()
        .filter(|ext| *ext != name)
        .map(str::to_lowercase)
        .unwrap_or_default()
}
