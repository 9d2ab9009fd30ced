//! Pre-write validation shared by the file and folder services.
//!
//! Validation failures surface before any table write, so a rejected
//! operation leaves no trace.

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::path::DrivePath;
use drivebox_core::types::{ItemId, VirtualDir};
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;

/// Reject names that are empty after trimming.
pub(crate) fn ensure_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Name cannot be empty"));
    }
    Ok(())
}

/// Reject writes targeting a reserved virtual directory.
pub(crate) fn ensure_writable_target(path: &DrivePath) -> AppResult<()> {
    if let Some(dir) = VirtualDir::of_path(path) {
        return Err(AppError::validation(format!(
            "Cannot write to '{dir}'; navigate to a folder first"
        )));
    }
    Ok(())
}

/// Reject a slug already taken by a sibling (files and folders pooled),
/// optionally ignoring the row being renamed or moved.
pub(crate) async fn ensure_slug_available(
    files: &FileRepository,
    folders: &FolderRepository,
    directory: &DrivePath,
    slug: &str,
    exclude: Option<ItemId>,
) -> AppResult<()> {
    let sibling_folders = folders.find_by_path(directory).await?;
    let taken = sibling_folders
        .iter()
        .any(|folder| Some(folder.id) != exclude && folder.slug == slug);
    let taken = taken || {
        let sibling_files = files.find_by_path(directory).await?;
        sibling_files
            .iter()
            .any(|file| Some(file.id) != exclude && file.slug == slug)
    };

    if taken {
        return Err(AppError::validation(
            "An item with a similar name already exists in this location",
        ));
    }
    Ok(())
}
