//! File CRUD, search, and content export.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::path::DrivePath;
use drivebox_core::types::slug::slugify;
use drivebox_core::types::ItemId;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_entity::file::{CreateFile, FileEntry};

use crate::validate::{ensure_name, ensure_slug_available, ensure_writable_target};

/// A file payload ready for export.
#[derive(Debug, Clone)]
pub struct FileDownload {
    /// Display name to save under.
    pub name: String,
    /// The raw content.
    pub content: Bytes,
}

/// Manages file rows.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File repository.
    files: Arc<FileRepository>,
    /// Folder repository (for sibling duplicate checks).
    folders: Arc<FolderRepository>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(files: Arc<FileRepository>, folders: Arc<FolderRepository>) -> Self {
        Self { files, folders }
    }

    /// Creates a file, deriving extension, slug, and size.
    pub async fn create(&self, data: CreateFile) -> AppResult<FileEntry> {
        ensure_name(&data.name)?;
        ensure_writable_target(&data.path)?;
        ensure_slug_available(
            &self.files,
            &self.folders,
            &data.path,
            &slugify(&data.name),
            None,
        )
        .await?;

        let created = self.files.create(FileEntry::create(data)).await?;
        info!(file_id = %created.id, path = %created.path, name = %created.name, "File created");
        Ok(created)
    }

    /// Creates several files sequentially; the first failure aborts the
    /// remainder.
    pub async fn create_many(&self, batch: Vec<CreateFile>) -> AppResult<Vec<ItemId>> {
        let mut ids = Vec::with_capacity(batch.len());
        for data in batch {
            ids.push(self.create(data).await?.id);
        }
        Ok(ids)
    }

    /// Gets a file by id.
    pub async fn get(&self, id: ItemId) -> AppResult<FileEntry> {
        self.files
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// All files.
    pub async fn get_all(&self) -> AppResult<Vec<FileEntry>> {
        self.files.find_all().await
    }

    /// Files directly inside `path`.
    pub async fn get_by_path(&self, path: &DrivePath) -> AppResult<Vec<FileEntry>> {
        self.files.find_by_path(path).await
    }

    /// Files with the given extension.
    pub async fn get_by_extension(&self, extension: &str) -> AppResult<Vec<FileEntry>> {
        self.files.find_by_extension(extension).await
    }

    /// Case-insensitive substring search over names.
    pub async fn search(&self, query: &str) -> AppResult<Vec<FileEntry>> {
        self.files.search(query).await
    }

    /// All favorite files.
    pub async fn get_favorites(&self) -> AppResult<Vec<FileEntry>> {
        self.files.find_favorites().await
    }

    /// Total bytes stored across all files.
    pub async fn total_size(&self) -> AppResult<u64> {
        self.files.total_size().await
    }

    /// Number of files.
    pub async fn count(&self) -> AppResult<u64> {
        self.files.count().await
    }

    /// Renames a file, preserving its stored extension the way the
    /// rename dialog does: `"notes"` on a `.txt` file becomes
    /// `"notes.txt"`.
    pub async fn rename(&self, id: ItemId, new_name: &str) -> AppResult<FileEntry> {
        ensure_name(new_name)?;
        let file = self.get(id).await?;

        let mut target = new_name.trim().to_string();
        if !file.extension.is_empty() {
            let suffix = format!(".{}", file.extension);
            if !target.to_lowercase().ends_with(&suffix) {
                target.push_str(&suffix);
            }
        }

        ensure_slug_available(
            &self.files,
            &self.folders,
            &file.path,
            &slugify(&target),
            Some(id),
        )
        .await?;

        let renamed = self.files.rename(id, &target).await?;
        info!(file_id = %id, name = %renamed.name, "File renamed");
        Ok(renamed)
    }

    /// Moves a file to a new containing directory.
    pub async fn move_to(&self, id: ItemId, new_path: &DrivePath) -> AppResult<FileEntry> {
        ensure_writable_target(new_path)?;
        let file = self.get(id).await?;
        ensure_slug_available(&self.files, &self.folders, new_path, &file.slug, Some(id)).await?;

        let moved = self.files.move_to(id, new_path).await?;
        info!(file_id = %id, from = %file.path, to = %new_path, "File moved");
        Ok(moved)
    }

    /// Flips the favorite flag.
    pub async fn toggle_favorite(&self, id: ItemId) -> AppResult<FileEntry> {
        self.files.toggle_favorite(id).await
    }

    /// Deletes a file.
    pub async fn delete(&self, id: ItemId) -> AppResult<()> {
        let removed = self.files.delete(id).await?;
        info!(file_id = %id, name = %removed.name, "File deleted");
        Ok(())
    }

    /// The file's content for export.
    pub async fn download(&self, id: ItemId) -> AppResult<FileDownload> {
        let file = self.get(id).await?;
        Ok(FileDownload {
            name: file.name,
            content: file.content,
        })
    }

    /// The file's content for an in-app preview; empty payloads are
    /// rejected rather than rendered as a blank viewer.
    pub async fn open_preview(&self, id: ItemId) -> AppResult<FileDownload> {
        let file = self.get(id).await?;
        if file.content.is_empty() {
            return Err(AppError::corrupted_content(format!(
                "'{}' has no content to preview",
                file.name
            )));
        }
        Ok(FileDownload {
            name: file.name,
            content: file.content,
        })
    }
}
