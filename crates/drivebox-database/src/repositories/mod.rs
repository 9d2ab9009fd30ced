//! Repository implementations over the table store.
//!
//! Repositories own all row-level access; the structural primitives
//! that touch many rows at once (cascading rewrite, recursive delete)
//! live here so they run inside a single store transaction.

pub mod file;
pub mod folder;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::path::DrivePath;
use drivebox_core::types::ItemId;

use crate::store::Tables;

/// Re-derive a folder's `item_count` from its actual direct children.
///
/// `directory` is the folder's identity path. The drive root has no
/// backing row and directories under a deleted ancestor no longer
/// resolve; both recount to nothing.
pub(crate) fn recount_directory(tables: &mut Tables, directory: &DrivePath) -> AppResult<()> {
    if directory.is_empty() {
        return Ok(());
    }
    let Some(folder_id) = tables
        .folders
        .rows()
        .find(|folder| folder.identity_path() == *directory)
        .map(|folder| folder.id)
    else {
        return Ok(());
    };

    let folders = tables.folders.count(|folder| folder.path == *directory);
    let files = tables.files.count(|file| file.path == *directory);
    let actual = folders + files;

    tables.folders.update(folder_id, |folder| {
        folder.item_count = actual;
    })?;
    Ok(())
}

/// Rewrite the path prefix of every row under `old` to start with `new`
/// instead, preserving the remaining segments exactly.
pub(crate) fn rewrite_descendants(
    tables: &mut Tables,
    old: &DrivePath,
    new: &DrivePath,
) -> AppResult<()> {
    let folder_rewrites = collect_rewrites(
        tables.folders.rows().map(|folder| (folder.id, &folder.path)),
        old,
        new,
    )?;
    let file_rewrites = collect_rewrites(
        tables.files.rows().map(|file| (file.id, &file.path)),
        old,
        new,
    )?;

    for (id, path) in folder_rewrites {
        tables.folders.update(id, |folder| folder.path = path)?;
    }
    for (id, path) in file_rewrites {
        tables.files.update(id, |file| file.path = path)?;
    }
    Ok(())
}

fn collect_rewrites<'a>(
    rows: impl Iterator<Item = (ItemId, &'a DrivePath)>,
    old: &DrivePath,
    new: &DrivePath,
) -> AppResult<Vec<(ItemId, DrivePath)>> {
    rows.filter(|(_, path)| path.starts_with(old))
        .map(|(id, path)| {
            path.rewrite_prefix(old, new)
                .map(|rewritten| (id, rewritten))
                .ok_or_else(|| {
                    AppError::internal(format!("Path '{path}' lost its '{old}' prefix mid-rewrite"))
                })
        })
        .collect()
}
