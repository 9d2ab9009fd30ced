//! Tree assembly from the flat tables.

use std::collections::HashMap;
use std::sync::Arc;

use drivebox_core::result::AppResult;
use drivebox_core::types::ItemId;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_entity::file::FileEntry;
use drivebox_entity::folder::{FolderEntry, FolderTreeNode};

/// Builds the hierarchical folder view out of the flat, path-keyed
/// tables.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Folder repository.
    folders: Arc<FolderRepository>,
    /// File repository.
    files: Arc<FileRepository>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(folders: Arc<FolderRepository>, files: Arc<FileRepository>) -> Self {
        Self { folders, files }
    }

    /// Two-pass assembly: first index every folder by its identity
    /// path, then link each folder and file to the owner of its stored
    /// `path`. Rows whose parent path resolves to nothing are skipped;
    /// files at the drive root belong to no folder and are skipped too.
    pub async fn build_tree(&self) -> AppResult<Vec<FolderTreeNode>> {
        let all_folders = self.folders.find_all().await?;
        let all_files = self.files.find_all().await?;

        let mut by_id: HashMap<ItemId, FolderEntry> = HashMap::new();
        let mut by_identity: HashMap<String, ItemId> = HashMap::new();
        for folder in all_folders {
            by_identity.insert(folder.identity_path().encode(), folder.id);
            by_id.insert(folder.id, folder);
        }

        let mut roots: Vec<ItemId> = Vec::new();
        let mut children: HashMap<ItemId, Vec<ItemId>> = HashMap::new();
        for folder in by_id.values() {
            if folder.is_root() {
                roots.push(folder.id);
            } else if let Some(&parent_id) = by_identity.get(&folder.path.encode()) {
                children.entry(parent_id).or_default().push(folder.id);
            }
        }

        let mut files_of: HashMap<ItemId, Vec<FileEntry>> = HashMap::new();
        for file in all_files {
            if file.path.is_empty() {
                continue;
            }
            if let Some(&owner_id) = by_identity.get(&file.path.encode()) {
                files_of.entry(owner_id).or_default().push(file);
            }
        }

        let mut tree: Vec<FolderTreeNode> = roots
            .into_iter()
            .map(|id| Self::assemble(id, &by_id, &children, &mut files_of))
            .collect();
        tree.sort_by_key(|node| node.folder.name.to_lowercase());
        Ok(tree)
    }

    fn assemble(
        id: ItemId,
        by_id: &HashMap<ItemId, FolderEntry>,
        children: &HashMap<ItemId, Vec<ItemId>>,
        files_of: &mut HashMap<ItemId, Vec<FileEntry>>,
    ) -> FolderTreeNode {
        let mut node = FolderTreeNode::leaf(by_id[&id].clone());

        if let Some(child_ids) = children.get(&id) {
            node.children = child_ids
                .iter()
                .map(|&child| Self::assemble(child, by_id, children, files_of))
                .collect();
            node.children.sort_by_key(|child| child.folder.name.to_lowercase());
        }

        if let Some(mut files) = files_of.remove(&id) {
            files.sort_by_key(|file| file.name.to_lowercase());
            node.files = files;
        }

        node
    }
}
