//! Folder repository implementation.
//!
//! Holds the structural primitives of the drive: because containment is
//! only a path-prefix relationship, renaming or moving a folder must
//! rewrite the stored path of every descendant row, and deleting one
//! must remove everything under its identity path. Each of these runs
//! inside a single store transaction.

use std::sync::Arc;

use chrono::Utc;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::path::DrivePath;
use drivebox_core::types::slug::slugify;
use drivebox_core::types::ItemId;
use drivebox_entity::folder::FolderEntry;

use crate::store::DriveStore;

use super::{recount_directory, rewrite_descendants};

/// Row counts removed by a recursive delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RemovedSubtree {
    /// Folders removed, the deleted folder itself included.
    pub folders: u64,
    /// Files removed.
    pub files: u64,
}

impl RemovedSubtree {
    /// Total rows removed.
    pub fn total(&self) -> u64 {
        self.folders + self.files
    }
}

/// Repository for folder rows and subtree operations.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    store: Arc<DriveStore>,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(store: Arc<DriveStore>) -> Self {
        Self { store }
    }

    /// Find a folder by id.
    pub async fn find_by_id(&self, id: ItemId) -> AppResult<Option<FolderEntry>> {
        Ok(self.store.read(|tables| tables.folders.get(id).cloned()).await)
    }

    /// All folders.
    pub async fn find_all(&self) -> AppResult<Vec<FolderEntry>> {
        Ok(self.store.read(|tables| tables.folders.filter(|_| true)).await)
    }

    /// Folders whose parent directory equals `path`.
    pub async fn find_by_path(&self, path: &DrivePath) -> AppResult<Vec<FolderEntry>> {
        Ok(self
            .store
            .read(|tables| tables.folders.filter(|folder| folder.path == *path))
            .await)
    }

    /// Folders at the drive root.
    pub async fn find_roots(&self) -> AppResult<Vec<FolderEntry>> {
        Ok(self
            .store
            .read(|tables| tables.folders.filter(FolderEntry::is_root))
            .await)
    }

    /// The folder whose identity path equals `identity`, if any.
    ///
    /// Unique by the sibling-slug invariant; duplicates would make
    /// parent resolution ambiguous everywhere.
    pub async fn find_by_identity(&self, identity: &DrivePath) -> AppResult<Option<FolderEntry>> {
        Ok(self
            .store
            .read(|tables| {
                tables
                    .folders
                    .rows()
                    .find(|folder| folder.identity_path() == *identity)
                    .cloned()
            })
            .await)
    }

    /// Folders anywhere under `prefix` (direct children included).
    pub async fn find_descendants(&self, prefix: &DrivePath) -> AppResult<Vec<FolderEntry>> {
        Ok(self
            .store
            .read(|tables| tables.folders.filter(|folder| folder.path.starts_with(prefix)))
            .await)
    }

    /// Case-insensitive substring search over names.
    pub async fn search(&self, query: &str) -> AppResult<Vec<FolderEntry>> {
        let query = query.to_lowercase();
        Ok(self
            .store
            .read(|tables| {
                tables
                    .folders
                    .filter(|folder| folder.name.to_lowercase().contains(&query))
            })
            .await)
    }

    /// All favorite folders.
    pub async fn find_favorites(&self) -> AppResult<Vec<FolderEntry>> {
        Ok(self
            .store
            .read(|tables| tables.folders.filter(|folder| folder.is_favorite))
            .await)
    }

    /// Number of folders.
    pub async fn count(&self) -> AppResult<u64> {
        Ok(self.store.read(|tables| tables.folders.len() as u64).await)
    }

    /// Insert a new folder and recount its parent.
    pub async fn create(&self, entry: FolderEntry) -> AppResult<FolderEntry> {
        let created = entry.clone();
        let parent = entry.path.clone();
        self.store
            .transaction(move |tables| {
                tables.folders.insert(entry)?;
                recount_directory(tables, &parent)
            })
            .await?;
        Ok(created)
    }

    /// Rename a folder, rewriting every descendant's path in the same
    /// transaction (the identity path changes with the name).
    pub async fn rename_subtree(&self, id: ItemId, new_name: &str) -> AppResult<FolderEntry> {
        let name = new_name.to_string();
        let slug = slugify(new_name);
        self.store
            .transaction(move |tables| {
                let folder = tables
                    .folders
                    .get(id)
                    .cloned()
                    .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;

                let old_identity = folder.identity_path();
                let new_identity = folder.path.child(&name);

                let renamed = tables.folders.update(id, |folder| {
                    folder.name = name;
                    folder.slug = slug;
                    folder.modified_at = Utc::now();
                })?;

                rewrite_descendants(tables, &old_identity, &new_identity)?;
                Ok(renamed)
            })
            .await
    }

    /// Move a folder to a new parent directory, rewriting every
    /// descendant's path in the same transaction.
    pub async fn move_subtree(&self, id: ItemId, new_path: &DrivePath) -> AppResult<FolderEntry> {
        let new_path = new_path.clone();
        self.store
            .transaction(move |tables| {
                let folder = tables
                    .folders
                    .get(id)
                    .cloned()
                    .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;

                let old_identity = folder.identity_path();
                let new_identity = new_path.child(&folder.name);

                if new_path.starts_with(&old_identity) {
                    return Err(AppError::validation(format!(
                        "Cannot move '{}' into its own subtree",
                        folder.name
                    )));
                }

                let old_parent = folder.path.clone();
                let moved = tables.folders.update(id, |folder| {
                    folder.path = new_path.clone();
                    folder.modified_at = Utc::now();
                })?;

                rewrite_descendants(tables, &old_identity, &new_identity)?;
                recount_directory(tables, &old_parent)?;
                recount_directory(tables, &new_path)?;
                Ok(moved)
            })
            .await
    }

    /// Delete a folder together with every descendant row, then recount
    /// the parent.
    pub async fn delete_recursive(&self, id: ItemId) -> AppResult<RemovedSubtree> {
        self.store
            .transaction(move |tables| {
                let folder = tables
                    .folders
                    .get(id)
                    .cloned()
                    .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;

                let identity = folder.identity_path();

                let folder_ids: Vec<ItemId> = tables
                    .folders
                    .rows()
                    .filter(|child| child.path.starts_with(&identity))
                    .map(|child| child.id)
                    .collect();
                let file_ids: Vec<ItemId> = tables
                    .files
                    .rows()
                    .filter(|file| file.path.starts_with(&identity))
                    .map(|file| file.id)
                    .collect();

                let mut removed = RemovedSubtree::default();
                for child_id in folder_ids {
                    if tables.folders.remove(child_id).is_some() {
                        removed.folders += 1;
                    }
                }
                for file_id in file_ids {
                    if tables.files.remove(file_id).is_some() {
                        removed.files += 1;
                    }
                }
                if tables.folders.remove(id).is_some() {
                    removed.folders += 1;
                }

                recount_directory(tables, &folder.path)?;
                Ok(removed)
            })
            .await
    }

    /// Shallow delete of a single folder row.
    pub async fn delete(&self, id: ItemId) -> AppResult<FolderEntry> {
        self.store
            .transaction(move |tables| {
                let removed = tables
                    .folders
                    .remove(id)
                    .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
                recount_directory(tables, &removed.path)?;
                Ok(removed)
            })
            .await
    }

    /// Re-derive `item_count` from the folder's actual direct children.
    pub async fn recount(&self, id: ItemId) -> AppResult<FolderEntry> {
        self.store
            .transaction(move |tables| {
                let identity = tables
                    .folders
                    .get(id)
                    .map(FolderEntry::identity_path)
                    .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
                recount_directory(tables, &identity)?;
                tables
                    .folders
                    .get(id)
                    .cloned()
                    .ok_or_else(|| AppError::internal("Folder vanished during recount"))
            })
            .await
    }

    /// Flip the favorite flag.
    pub async fn toggle_favorite(&self, id: ItemId) -> AppResult<FolderEntry> {
        self.store
            .transaction(move |tables| {
                tables.folders.update(id, |folder| {
                    folder.is_favorite = !folder.is_favorite;
                    folder.modified_at = Utc::now();
                })
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use drivebox_entity::file::{CreateFile, FileEntry};
    use drivebox_entity::folder::CreateFolder;

    use crate::repositories::file::FileRepository;

    fn repos() -> (Arc<DriveStore>, FolderRepository, FileRepository) {
        let store = Arc::new(DriveStore::in_memory());
        (
            store.clone(),
            FolderRepository::new(store.clone()),
            FileRepository::new(store),
        )
    }

    fn folder_at(name: &str, path: DrivePath) -> FolderEntry {
        FolderEntry::create(CreateFolder {
            name: name.to_string(),
            path,
        })
    }

    fn file_at(name: &str, path: DrivePath) -> FileEntry {
        FileEntry::create(CreateFile {
            name: name.to_string(),
            content: Bytes::from_static(b"x"),
            path,
        })
    }

    #[tokio::test]
    async fn test_move_subtree_rewrites_descendants() {
        let (_, folders, files) = repos();

        let a = folders.create(folder_at("A", DrivePath::root())).await.unwrap();
        folders
            .create(folder_at("B", DrivePath::new(["A"]).unwrap()))
            .await
            .unwrap();
        folders.create(folder_at("X", DrivePath::root())).await.unwrap();
        let f = files
            .create(file_at("f.txt", DrivePath::new(["A", "B"]).unwrap()))
            .await
            .unwrap();

        folders
            .move_subtree(a.id, &DrivePath::new(["X"]).unwrap())
            .await
            .unwrap();

        let b = folders
            .find_by_identity(&DrivePath::new(["X", "A", "B"]).unwrap())
            .await
            .unwrap();
        assert!(b.is_some(), "B should now live under X/A");

        let f = files.find_by_id(f.id).await.unwrap().unwrap();
        assert_eq!(f.path.encode(), "X/A/B");
    }

    #[tokio::test]
    async fn test_move_does_not_touch_string_prefix_sibling() {
        let (_, folders, _) = repos();

        let a = folders.create(folder_at("A", DrivePath::root())).await.unwrap();
        let ab = folders.create(folder_at("A-old", DrivePath::root())).await.unwrap();
        folders
            .create(folder_at("inner", DrivePath::new(["A-old"]).unwrap()))
            .await
            .unwrap();
        folders.create(folder_at("X", DrivePath::root())).await.unwrap();

        folders
            .move_subtree(a.id, &DrivePath::new(["X"]).unwrap())
            .await
            .unwrap();

        // "A-old" shares the string prefix "A" but is not a descendant.
        let untouched = folders.find_by_id(ab.id).await.unwrap().unwrap();
        assert!(untouched.path.is_empty());
        let inner = folders
            .find_by_identity(&DrivePath::new(["A-old", "inner"]).unwrap())
            .await
            .unwrap();
        assert!(inner.is_some());
    }

    #[tokio::test]
    async fn test_move_into_own_subtree_rejected() {
        let (_, folders, _) = repos();

        let a = folders.create(folder_at("A", DrivePath::root())).await.unwrap();
        folders
            .create(folder_at("B", DrivePath::new(["A"]).unwrap()))
            .await
            .unwrap();

        let err = folders
            .move_subtree(a.id, &DrivePath::new(["A", "B"]).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind, drivebox_core::error::ErrorKind::Validation);

        let err = folders
            .move_subtree(a.id, &DrivePath::new(["A"]).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind, drivebox_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_rename_subtree_rewrites_descendants() {
        let (_, folders, files) = repos();

        let docs = folders.create(folder_at("Docs", DrivePath::root())).await.unwrap();
        folders
            .create(folder_at("Work", DrivePath::new(["Docs"]).unwrap()))
            .await
            .unwrap();
        let f = files
            .create(file_at("x.txt", DrivePath::new(["Docs", "Work"]).unwrap()))
            .await
            .unwrap();

        let renamed = folders.rename_subtree(docs.id, "Archive").await.unwrap();
        assert_eq!(renamed.slug, "archive");

        let f = files.find_by_id(f.id).await.unwrap().unwrap();
        assert_eq!(f.path.encode(), "Archive/Work");
    }

    #[tokio::test]
    async fn test_delete_recursive_removes_subtree_and_recounts() {
        let (store, folders, files) = repos();

        let top = folders.create(folder_at("Top", DrivePath::root())).await.unwrap();
        let doomed = folders
            .create(folder_at("Doomed", DrivePath::new(["Top"]).unwrap()))
            .await
            .unwrap();
        let doomed_path = DrivePath::new(["Top", "Doomed"]).unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            files.create(file_at(name, doomed_path.clone())).await.unwrap();
        }
        folders
            .create(folder_at("Sub", doomed_path.clone()))
            .await
            .unwrap();
        files
            .create(file_at("d.txt", DrivePath::new(["Top", "Doomed", "Sub"]).unwrap()))
            .await
            .unwrap();

        let removed = folders.delete_recursive(doomed.id).await.unwrap();
        assert_eq!(removed.folders, 2);
        assert_eq!(removed.files, 4);
        assert_eq!(removed.total(), 6);

        let (file_rows, folder_rows) = store
            .read(|tables| (tables.files.len(), tables.folders.len()))
            .await;
        assert_eq!(file_rows, 0);
        assert_eq!(folder_rows, 1, "only Top remains");

        let top = folders.find_by_id(top.id).await.unwrap().unwrap();
        assert_eq!(top.item_count, 0);
    }
}
