//! File repository implementation.

use std::sync::Arc;

use chrono::Utc;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::path::DrivePath;
use drivebox_core::types::slug::slugify;
use drivebox_core::types::ItemId;
use drivebox_entity::file::FileEntry;

use crate::store::DriveStore;

use super::recount_directory;

/// Repository for file rows.
#[derive(Debug, Clone)]
pub struct FileRepository {
    store: Arc<DriveStore>,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(store: Arc<DriveStore>) -> Self {
        Self { store }
    }

    /// Find a file by id.
    pub async fn find_by_id(&self, id: ItemId) -> AppResult<Option<FileEntry>> {
        Ok(self.store.read(|tables| tables.files.get(id).cloned()).await)
    }

    /// All files.
    pub async fn find_all(&self) -> AppResult<Vec<FileEntry>> {
        Ok(self.store.read(|tables| tables.files.filter(|_| true)).await)
    }

    /// Files whose containing directory equals `path`.
    pub async fn find_by_path(&self, path: &DrivePath) -> AppResult<Vec<FileEntry>> {
        Ok(self
            .store
            .read(|tables| tables.files.filter(|file| file.path == *path))
            .await)
    }

    /// Files anywhere under `prefix` (direct children included).
    pub async fn find_descendants(&self, prefix: &DrivePath) -> AppResult<Vec<FileEntry>> {
        Ok(self
            .store
            .read(|tables| tables.files.filter(|file| file.path.starts_with(prefix)))
            .await)
    }

    /// Files with the given extension (case-insensitive).
    pub async fn find_by_extension(&self, extension: &str) -> AppResult<Vec<FileEntry>> {
        let extension = extension.to_lowercase();
        Ok(self
            .store
            .read(|tables| tables.files.filter(|file| file.extension == extension))
            .await)
    }

    /// Case-insensitive substring search over names.
    pub async fn search(&self, query: &str) -> AppResult<Vec<FileEntry>> {
        let query = query.to_lowercase();
        Ok(self
            .store
            .read(|tables| {
                tables
                    .files
                    .filter(|file| file.name.to_lowercase().contains(&query))
            })
            .await)
    }

    /// All favorite files.
    pub async fn find_favorites(&self) -> AppResult<Vec<FileEntry>> {
        Ok(self
            .store
            .read(|tables| tables.files.filter(|file| file.is_favorite))
            .await)
    }

    /// Sum of all file sizes in bytes.
    pub async fn total_size(&self) -> AppResult<u64> {
        Ok(self
            .store
            .read(|tables| tables.files.rows().map(|file| file.size_bytes).sum())
            .await)
    }

    /// Number of files.
    pub async fn count(&self) -> AppResult<u64> {
        Ok(self.store.read(|tables| tables.files.len() as u64).await)
    }

    /// Insert a new file and recount its parent folder.
    pub async fn create(&self, entry: FileEntry) -> AppResult<FileEntry> {
        let created = entry.clone();
        let parent = entry.path.clone();
        self.store
            .transaction(move |tables| {
                tables.files.insert(entry)?;
                recount_directory(tables, &parent)
            })
            .await?;
        Ok(created)
    }

    /// Update name and slug; the stored extension is immutable.
    pub async fn rename(&self, id: ItemId, new_name: &str) -> AppResult<FileEntry> {
        let name = new_name.to_string();
        let slug = slugify(new_name);
        self.store
            .transaction(move |tables| {
                tables.files.update(id, |file| {
                    file.name = name;
                    file.slug = slug;
                    file.modified_at = Utc::now();
                })
            })
            .await
    }

    /// Re-home the file and recount both parents.
    pub async fn move_to(&self, id: ItemId, new_path: &DrivePath) -> AppResult<FileEntry> {
        let new_path = new_path.clone();
        self.store
            .transaction(move |tables| {
                let old_path = tables
                    .files
                    .get(id)
                    .map(|file| file.path.clone())
                    .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;

                let moved = tables.files.update(id, |file| {
                    file.path = new_path.clone();
                    file.modified_at = Utc::now();
                })?;

                recount_directory(tables, &old_path)?;
                recount_directory(tables, &new_path)?;
                Ok(moved)
            })
            .await
    }

    /// Flip the favorite flag.
    pub async fn toggle_favorite(&self, id: ItemId) -> AppResult<FileEntry> {
        self.store
            .transaction(move |tables| {
                tables.files.update(id, |file| {
                    file.is_favorite = !file.is_favorite;
                    file.modified_at = Utc::now();
                })
            })
            .await
    }

    /// Delete a file and recount its parent folder.
    pub async fn delete(&self, id: ItemId) -> AppResult<FileEntry> {
        self.store
            .transaction(move |tables| {
                let removed = tables
                    .files
                    .remove(id)
                    .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;
                recount_directory(tables, &removed.path)?;
                Ok(removed)
            })
            .await
    }
}
