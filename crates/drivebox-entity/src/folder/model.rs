//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use drivebox_core::types::path::DrivePath;
use drivebox_core::types::slug::slugify;
use drivebox_core::types::ItemId;

/// A folder in the drive hierarchy.
///
/// `path` holds the segments of the **parent** directory; the folder's
/// own location — its identity path — is `path` plus `name`. Children
/// reference that identity path in their own `path` field, so renaming
/// or moving a folder rewrites every descendant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderEntry {
    /// Unique folder identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Normalized form of `name`, used for duplicate detection among
    /// siblings.
    pub slug: String,
    /// Segments of the parent directory.
    pub path: DrivePath,
    /// Denormalized count of direct children (files + folders).
    pub item_count: u64,
    /// User-toggleable favorite flag.
    pub is_favorite: bool,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last mutated.
    pub modified_at: DateTime<Utc>,
}

impl FolderEntry {
    /// Build a fresh, empty folder from creation data.
    pub fn create(data: CreateFolder) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            slug: slugify(&data.name),
            name: data.name,
            path: data.path,
            item_count: 0,
            is_favorite: false,
            created_at: now,
            modified_at: now,
        }
    }

    /// The folder's own full location.
    pub fn identity_path(&self) -> DrivePath {
        self.path.child(&self.name)
    }

    /// Whether the folder sits at the drive root.
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone)]
pub struct CreateFolder {
    /// Display name.
    pub name: String,
    /// Parent directory.
    pub path: DrivePath,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_path() {
        let folder = FolderEntry::create(CreateFolder {
            name: "Work".to_string(),
            path: DrivePath::new(["Documents"]).unwrap(),
        });
        assert_eq!(folder.identity_path().encode(), "Documents/Work");
        assert!(!folder.is_root());
        assert_eq!(folder.item_count, 0);
    }
}
