//! The unified drive façade combining file and folder operations.

use std::sync::Arc;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::path::DrivePath;
use drivebox_core::types::{ItemId, VirtualDir};
use drivebox_entity::folder::FolderTreeNode;
use drivebox_entity::item::{DriveItem, ItemAction, ItemKind, StorageStats};

use crate::file::{FileDownload, FileService};
use crate::folder::{ArchiveManifest, ArchiveService, FolderService, TreeService};
use crate::validate::ensure_writable_target;

/// What an [`ItemAction`] produced.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    /// The item was mutated; here is its new state.
    Updated(DriveItem),
    /// The item (and, for folders, its subtree) is gone.
    Deleted,
    /// A single file payload ready for export.
    Download(FileDownload),
    /// A folder export layout ready for archiving.
    Archive(ArchiveManifest),
}

/// High-level operations that work across both files and folders.
#[derive(Debug, Clone)]
pub struct DriveService {
    /// File operations.
    files: Arc<FileService>,
    /// Folder operations.
    folders: Arc<FolderService>,
    /// Tree assembly.
    tree: Arc<TreeService>,
    /// Folder export.
    archive: Arc<ArchiveService>,
}

impl DriveService {
    /// Creates a new drive façade.
    pub fn new(
        files: Arc<FileService>,
        folders: Arc<FolderService>,
        tree: Arc<TreeService>,
        archive: Arc<ArchiveService>,
    ) -> Self {
        Self {
            files,
            folders,
            tree,
            archive,
        }
    }

    /// Direct access to file operations.
    pub fn files(&self) -> &Arc<FileService> {
        &self.files
    }

    /// Direct access to folder operations.
    pub fn folders(&self) -> &Arc<FolderService> {
        &self.folders
    }

    /// Find an item of either kind by id.
    pub async fn find_item(&self, id: ItemId) -> AppResult<Option<DriveItem>> {
        if let Some(file) = self.files.get_all().await?.into_iter().find(|f| f.id == id) {
            return Ok(Some(DriveItem::File(file)));
        }
        Ok(self
            .folders
            .get_all()
            .await?
            .into_iter()
            .find(|f| f.id == id)
            .map(DriveItem::Folder))
    }

    /// Get an item of either kind by id, erroring when absent.
    pub async fn get_item(&self, id: ItemId) -> AppResult<DriveItem> {
        self.find_item(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    /// All items at a path. Reserved roots resolve to their computed
    /// views; real paths resolve to the directory listing.
    pub async fn items_by_path(&self, path: &DrivePath) -> AppResult<Vec<DriveItem>> {
        match VirtualDir::of_path(path) {
            Some(VirtualDir::Recent) => self.get_all_recent().await,
            Some(VirtualDir::Starred) => self.get_favorites().await,
            Some(VirtualDir::Trash) | Some(VirtualDir::SharedWithMe) => Ok(Vec::new()),
            None => self.folders.get_children_by_path(path).await,
        }
    }

    /// Search both kinds by name; folders first.
    pub async fn search(&self, query: &str) -> AppResult<Vec<DriveItem>> {
        let (folders, files) = tokio::try_join!(self.folders.search(query), self.files.search(query))?;
        Ok(folders
            .into_iter()
            .map(DriveItem::from)
            .chain(files.into_iter().map(DriveItem::from))
            .collect())
    }

    /// All favorite items.
    pub async fn get_favorites(&self) -> AppResult<Vec<DriveItem>> {
        let (folders, files) =
            tokio::try_join!(self.folders.get_favorites(), self.files.get_favorites())?;
        Ok(folders
            .into_iter()
            .map(DriveItem::from)
            .chain(files.into_iter().map(DriveItem::from))
            .collect())
    }

    /// All items, most recently modified first.
    pub async fn get_all_recent(&self) -> AppResult<Vec<DriveItem>> {
        let (folders, files) = tokio::try_join!(self.folders.get_all(), self.files.get_all())?;
        let mut items: Vec<DriveItem> = folders
            .into_iter()
            .map(DriveItem::from)
            .chain(files.into_iter().map(DriveItem::from))
            .collect();
        items.sort_by(|a, b| b.modified_at().cmp(&a.modified_at()));
        Ok(items)
    }

    /// Toggle the favorite flag on either kind.
    pub async fn toggle_favorite(&self, id: ItemId, kind: ItemKind) -> AppResult<DriveItem> {
        match kind {
            ItemKind::File => Ok(DriveItem::File(self.files.toggle_favorite(id).await?)),
            ItemKind::Folder => Ok(DriveItem::Folder(self.folders.toggle_favorite(id).await?)),
        }
    }

    /// Move either kind to a new containing directory.
    ///
    /// The destination must be the drive root or an existing folder;
    /// item counts of both parents are recomputed by the underlying
    /// structural transaction.
    pub async fn move_item(
        &self,
        id: ItemId,
        kind: ItemKind,
        new_path: &DrivePath,
    ) -> AppResult<DriveItem> {
        ensure_writable_target(new_path)?;
        if !new_path.is_empty() && self.folders.get_by_identity(new_path).await?.is_none() {
            return Err(AppError::validation(format!(
                "Destination folder '{new_path}' does not exist"
            )));
        }

        match kind {
            ItemKind::File => Ok(DriveItem::File(self.files.move_to(id, new_path).await?)),
            ItemKind::Folder => Ok(DriveItem::Folder(self.folders.move_to(id, new_path).await?)),
        }
    }

    /// Delete either kind; folders go recursively.
    pub async fn delete_item(&self, id: ItemId, kind: ItemKind) -> AppResult<()> {
        match kind {
            ItemKind::File => self.files.delete(id).await,
            ItemKind::Folder => self.folders.delete_recursive(id).await.map(|_| ()),
        }
    }

    /// Aggregate statistics across both tables.
    pub async fn storage_stats(&self) -> AppResult<StorageStats> {
        let (total_size_bytes, file_count, folder_count) = tokio::try_join!(
            self.files.total_size(),
            self.files.count(),
            self.folders.count()
        )?;
        Ok(StorageStats {
            total_size_bytes,
            file_count,
            folder_count,
            total_items: file_count + folder_count,
        })
    }

    /// The complete folder tree.
    pub async fn build_tree(&self) -> AppResult<Vec<FolderTreeNode>> {
        self.tree.build_tree().await
    }

    /// Apply a UI action to an item, exhaustively by variant.
    pub async fn dispatch(&self, item: &DriveItem, action: ItemAction) -> AppResult<ActionOutcome> {
        match action {
            ItemAction::Favorite => {
                let updated = self.toggle_favorite(item.id(), item.kind()).await?;
                Ok(ActionOutcome::Updated(updated))
            }
            ItemAction::Delete => {
                self.delete_item(item.id(), item.kind()).await?;
                Ok(ActionOutcome::Deleted)
            }
            ItemAction::Rename { new_name } => {
                let updated = match item.kind() {
                    ItemKind::File => DriveItem::File(self.files.rename(item.id(), &new_name).await?),
                    ItemKind::Folder => {
                        DriveItem::Folder(self.folders.rename(item.id(), &new_name).await?)
                    }
                };
                Ok(ActionOutcome::Updated(updated))
            }
            ItemAction::Download => match item.kind() {
                ItemKind::File => Ok(ActionOutcome::Download(self.files.download(item.id()).await?)),
                ItemKind::Folder => Ok(ActionOutcome::Archive(
                    self.archive.folder_manifest(item.id()).await?,
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use drivebox_database::repositories::file::FileRepository;
    use drivebox_database::repositories::folder::FolderRepository;
    use drivebox_database::store::DriveStore;
    use drivebox_entity::file::CreateFile;
    use drivebox_entity::folder::CreateFolder;

    fn drive() -> DriveService {
        let store = Arc::new(DriveStore::in_memory());
        let file_repo = Arc::new(FileRepository::new(store.clone()));
        let folder_repo = Arc::new(FolderRepository::new(store));

        let files = Arc::new(FileService::new(file_repo.clone(), folder_repo.clone()));
        let folders = Arc::new(FolderService::new(folder_repo.clone(), file_repo.clone()));
        let tree = Arc::new(TreeService::new(folder_repo.clone(), file_repo.clone()));
        let archive = Arc::new(ArchiveService::new(folder_repo, file_repo));
        DriveService::new(files, folders, tree, archive)
    }

    #[tokio::test]
    async fn test_move_rejects_missing_destination() {
        let drive = drive();
        let file = drive
            .files()
            .create(CreateFile {
                name: "a.txt".to_string(),
                content: Bytes::from_static(b"x"),
                path: DrivePath::root(),
            })
            .await
            .unwrap();

        let err = drive
            .move_item(file.id, ItemKind::File, &DrivePath::new(["Nowhere"]).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.kind, drivebox_core::error::ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_move_adjusts_both_parent_counts() {
        let drive = drive();
        let src = drive
            .folders()
            .create(CreateFolder {
                name: "Src".to_string(),
                path: DrivePath::root(),
            })
            .await
            .unwrap();
        let dst = drive
            .folders()
            .create(CreateFolder {
                name: "Dst".to_string(),
                path: DrivePath::root(),
            })
            .await
            .unwrap();
        let file = drive
            .files()
            .create(CreateFile {
                name: "a.txt".to_string(),
                content: Bytes::from_static(b"x"),
                path: DrivePath::new(["Src"]).unwrap(),
            })
            .await
            .unwrap();

        drive
            .move_item(file.id, ItemKind::File, &DrivePath::new(["Dst"]).unwrap())
            .await
            .unwrap();

        assert_eq!(drive.folders().get(src.id).await.unwrap().item_count, 0);
        assert_eq!(drive.folders().get(dst.id).await.unwrap().item_count, 1);
    }

    #[tokio::test]
    async fn test_virtual_roots_resolve_to_views() {
        let drive = drive();
        let file = drive
            .files()
            .create(CreateFile {
                name: "a.txt".to_string(),
                content: Bytes::from_static(b"x"),
                path: DrivePath::root(),
            })
            .await
            .unwrap();
        drive.toggle_favorite(file.id, ItemKind::File).await.unwrap();

        let starred = drive
            .items_by_path(&DrivePath::new(["Starred"]).unwrap())
            .await
            .unwrap();
        assert_eq!(starred.len(), 1);

        let trash = drive
            .items_by_path(&DrivePath::new(["Trash"]).unwrap())
            .await
            .unwrap();
        assert!(trash.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_rename_routes_by_kind() {
        let drive = drive();
        let folder = drive
            .folders()
            .create(CreateFolder {
                name: "Old".to_string(),
                path: DrivePath::root(),
            })
            .await
            .unwrap();

        let outcome = drive
            .dispatch(
                &DriveItem::Folder(folder),
                ItemAction::Rename {
                    new_name: "New".to_string(),
                },
            )
            .await
            .unwrap();

        match outcome {
            ActionOutcome::Updated(DriveItem::Folder(folder)) => assert_eq!(folder.name, "New"),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_storage_stats() {
        let drive = drive();
        drive
            .folders()
            .create(CreateFolder {
                name: "Docs".to_string(),
                path: DrivePath::root(),
            })
            .await
            .unwrap();
        drive
            .files()
            .create(CreateFile {
                name: "a.bin".to_string(),
                content: Bytes::from_static(&[0u8; 10]),
                path: DrivePath::new(["Docs"]).unwrap(),
            })
            .await
            .unwrap();

        let stats = drive.storage_stats().await.unwrap();
        assert_eq!(stats.total_size_bytes, 10);
        assert_eq!(stats.file_count, 1);
        assert_eq!(stats.folder_count, 1);
        assert_eq!(stats.total_items, 2);
    }
}
