//! Folder tree structures for hierarchical display.

use serde::{Deserialize, Serialize};

use crate::file::FileEntry;
use crate::folder::FolderEntry;

/// A folder with its resolved children, produced by tree assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderTreeNode {
    /// The folder itself.
    pub folder: FolderEntry,
    /// Child folder nodes.
    pub children: Vec<FolderTreeNode>,
    /// Files directly inside this folder.
    pub files: Vec<FileEntry>,
}

impl FolderTreeNode {
    /// A node with no resolved children yet.
    pub fn leaf(folder: FolderEntry) -> Self {
        Self {
            folder,
            children: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Total number of folders in this subtree, including self.
    pub fn folder_count(&self) -> u64 {
        1 + self.children.iter().map(FolderTreeNode::folder_count).sum::<u64>()
    }
}

/// Aggregates over a folder's entire descendant set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderStats {
    /// Number of descendant files (all depths).
    pub file_count: u64,
    /// Number of descendant folders (all depths).
    pub subfolder_count: u64,
    /// Total descendant file size in bytes.
    pub total_size_bytes: u64,
}
