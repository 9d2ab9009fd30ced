//! Folder CRUD and the structural operations over the path-indexed
//! hierarchy.

use std::sync::Arc;

use tracing::info;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::path::{validate_segment, DrivePath};
use drivebox_core::types::slug::slugify;
use drivebox_core::types::{ItemId, VirtualDir};
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::{FolderRepository, RemovedSubtree};
use drivebox_entity::folder::{CreateFolder, FolderEntry, FolderStats};
use drivebox_entity::item::DriveItem;

use crate::validate::{ensure_name, ensure_slug_available, ensure_writable_target};

/// A folder together with its direct children.
#[derive(Debug, Clone)]
pub struct FolderWithChildren {
    /// The folder itself.
    pub folder: FolderEntry,
    /// Direct children, folders before files.
    pub children: Vec<DriveItem>,
}

/// Manages folder rows and subtree mutations.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder repository.
    folders: Arc<FolderRepository>,
    /// File repository (children listings, duplicate checks).
    files: Arc<FileRepository>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folders: Arc<FolderRepository>, files: Arc<FileRepository>) -> Self {
        Self { folders, files }
    }

    /// Creates an empty folder.
    pub async fn create(&self, data: CreateFolder) -> AppResult<FolderEntry> {
        ensure_name(&data.name)?;
        // Folder names become path segments of every descendant.
        validate_segment(&data.name)?;
        ensure_writable_target(&data.path)?;
        self.ensure_not_shadowing(&data.path, &data.name)?;
        ensure_slug_available(
            &self.files,
            &self.folders,
            &data.path,
            &slugify(&data.name),
            None,
        )
        .await?;

        let created = self.folders.create(FolderEntry::create(data)).await?;
        info!(folder_id = %created.id, path = %created.identity_path(), "Folder created");
        Ok(created)
    }

    /// Gets a folder by id.
    pub async fn get(&self, id: ItemId) -> AppResult<FolderEntry> {
        self.folders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    /// All folders.
    pub async fn get_all(&self) -> AppResult<Vec<FolderEntry>> {
        self.folders.find_all().await
    }

    /// Folders whose parent directory equals `path`.
    pub async fn get_by_path(&self, path: &DrivePath) -> AppResult<Vec<FolderEntry>> {
        self.folders.find_by_path(path).await
    }

    /// Folders at the drive root.
    pub async fn get_root_folders(&self) -> AppResult<Vec<FolderEntry>> {
        self.folders.find_roots().await
    }

    /// The folder whose identity path equals `identity`, if any.
    pub async fn get_by_identity(&self, identity: &DrivePath) -> AppResult<Option<FolderEntry>> {
        self.folders.find_by_identity(identity).await
    }

    /// Case-insensitive substring search over names.
    pub async fn search(&self, query: &str) -> AppResult<Vec<FolderEntry>> {
        self.folders.search(query).await
    }

    /// All favorite folders.
    pub async fn get_favorites(&self) -> AppResult<Vec<FolderEntry>> {
        self.folders.find_favorites().await
    }

    /// Number of folders.
    pub async fn count(&self) -> AppResult<u64> {
        self.folders.count().await
    }

    /// Renames a folder. The identity path changes with the name, so
    /// every descendant's stored path is rewritten in the same
    /// transaction.
    pub async fn rename(&self, id: ItemId, new_name: &str) -> AppResult<FolderEntry> {
        ensure_name(new_name)?;
        validate_segment(new_name)?;
        let folder = self.get(id).await?;
        self.ensure_not_shadowing(&folder.path, new_name)?;
        ensure_slug_available(
            &self.files,
            &self.folders,
            &folder.path,
            &slugify(new_name),
            Some(id),
        )
        .await?;

        let renamed = self.folders.rename_subtree(id, new_name).await?;
        info!(folder_id = %id, from = %folder.name, to = %new_name, "Folder renamed");
        Ok(renamed)
    }

    /// Moves a folder (and its whole subtree) under a new parent
    /// directory.
    pub async fn move_to(&self, id: ItemId, new_path: &DrivePath) -> AppResult<FolderEntry> {
        ensure_writable_target(new_path)?;
        let folder = self.get(id).await?;
        ensure_slug_available(&self.files, &self.folders, new_path, &folder.slug, Some(id))
            .await?;

        let moved = self.folders.move_subtree(id, new_path).await?;
        info!(
            folder_id = %id,
            from = %folder.identity_path(),
            to = %moved.identity_path(),
            "Folder moved"
        );
        Ok(moved)
    }

    /// Deletes a folder and everything under it.
    pub async fn delete_recursive(&self, id: ItemId) -> AppResult<RemovedSubtree> {
        let removed = self.folders.delete_recursive(id).await?;
        info!(
            folder_id = %id,
            folders = removed.folders,
            files = removed.files,
            "Folder deleted recursively"
        );
        Ok(removed)
    }

    /// Re-derives a folder's `item_count` from its actual children.
    pub async fn update_item_count(&self, id: ItemId) -> AppResult<FolderEntry> {
        self.folders.recount(id).await
    }

    /// Flips the favorite flag.
    pub async fn toggle_favorite(&self, id: ItemId) -> AppResult<FolderEntry> {
        self.folders.toggle_favorite(id).await
    }

    /// The directory-listing primitive: folders then files whose path
    /// equals `path`, each group in case-insensitive name order.
    pub async fn get_children_by_path(&self, path: &DrivePath) -> AppResult<Vec<DriveItem>> {
        let mut folders = self.folders.find_by_path(path).await?;
        let mut files = self.files.find_by_path(path).await?;
        folders.sort_by_key(|folder| folder.name.to_lowercase());
        files.sort_by_key(|file| file.name.to_lowercase());

        Ok(folders
            .into_iter()
            .map(DriveItem::from)
            .chain(files.into_iter().map(DriveItem::from))
            .collect())
    }

    /// A folder together with its direct children.
    pub async fn get_with_children(&self, id: ItemId) -> AppResult<FolderWithChildren> {
        let folder = self.get(id).await?;
        let children = self.get_children_by_path(&folder.identity_path()).await?;
        Ok(FolderWithChildren { folder, children })
    }

    /// Aggregates over the folder's entire descendant set.
    pub async fn get_stats(&self, id: ItemId) -> AppResult<FolderStats> {
        let folder = self.get(id).await?;
        let identity = folder.identity_path();

        let descendant_files = self.files.find_descendants(&identity).await?;
        let subfolder_count = self.folders.find_descendants(&identity).await?.len() as u64;

        Ok(FolderStats {
            file_count: descendant_files.len() as u64,
            subfolder_count,
            total_size_bytes: descendant_files.iter().map(|file| file.size_bytes).sum(),
        })
    }

    /// A root folder must not take a reserved navigation name.
    fn ensure_not_shadowing(&self, parent: &DrivePath, name: &str) -> AppResult<()> {
        if parent.is_empty() {
            if let Some(dir) = VirtualDir::from_name(name) {
                return Err(AppError::validation(format!(
                    "'{dir}' is a reserved name"
                )));
            }
        }
        Ok(())
    }
}
