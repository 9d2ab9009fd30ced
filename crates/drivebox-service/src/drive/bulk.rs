//! Bulk actions over a selection.
//!
//! Each selected item is processed independently: one failure is
//! recorded and does not stop the rest, and the final report enumerates
//! exactly which ids failed and why.

use std::sync::Arc;

use tracing::{info, warn};

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::types::path::DrivePath;
use drivebox_core::types::{ItemId, VirtualDir};
use drivebox_entity::item::{DriveItem, ItemKind};

use crate::drive::service::DriveService;
use crate::file::FileDownload;

/// Per-item outcome listing for a bulk operation.
#[derive(Debug, Default)]
pub struct BulkReport {
    /// Ids that were processed successfully.
    pub succeeded: Vec<ItemId>,
    /// Ids that failed, with the error for each.
    pub failed: Vec<(ItemId, AppError)>,
}

impl BulkReport {
    /// Whether every item succeeded.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, id: ItemId, result: AppResult<()>) {
        match result {
            Ok(()) => self.succeeded.push(id),
            Err(error) => {
                warn!(item_id = %id, error = %error, "Bulk operation item failed");
                self.failed.push((id, error));
            }
        }
    }
}

/// Collected payloads from a bulk download.
#[derive(Debug, Default)]
pub struct DownloadBatch {
    /// File payloads ready for export.
    pub files: Vec<FileDownload>,
    /// Folders in the selection, which single-file download skips.
    pub skipped_folders: u64,
    /// Ids that failed, with the error for each.
    pub failed: Vec<(ItemId, AppError)>,
}

/// Applies an action to every id in a selection.
#[derive(Debug, Clone)]
pub struct BulkService {
    /// The drive façade.
    drive: Arc<DriveService>,
}

impl BulkService {
    /// Creates a new bulk coordinator.
    pub fn new(drive: Arc<DriveService>) -> Self {
        Self { drive }
    }

    /// Move every selected item to `target`.
    ///
    /// Reserved virtual directories are rejected before any item is
    /// touched; per-item failures afterwards are isolated.
    pub async fn bulk_move(&self, ids: &[ItemId], target: &DrivePath) -> AppResult<BulkReport> {
        if let Some(dir) = VirtualDir::of_path(target) {
            return Err(AppError::validation(format!("Cannot move items to '{dir}'")));
        }

        let mut report = BulkReport::default();
        for &id in ids {
            let result = match self.drive.find_item(id).await {
                Ok(Some(item)) => self
                    .drive
                    .move_item(id, item.kind(), target)
                    .await
                    .map(|_| ()),
                Ok(None) => Err(AppError::not_found(format!("Item {id} not found"))),
                Err(error) => Err(error),
            };
            report.record(id, result);
        }

        info!(
            moved = report.succeeded.len(),
            failed = report.failed.len(),
            target = %target,
            "Bulk move finished"
        );
        Ok(report)
    }

    /// Delete every selected item; folders go recursively.
    pub async fn bulk_delete(&self, ids: &[ItemId]) -> BulkReport {
        let mut report = BulkReport::default();
        for &id in ids {
            let result = match self.drive.find_item(id).await {
                Ok(Some(item)) => self.drive.delete_item(id, item.kind()).await,
                Ok(None) => Err(AppError::not_found(format!("Item {id} not found"))),
                Err(error) => Err(error),
            };
            report.record(id, result);
        }

        info!(
            deleted = report.succeeded.len(),
            failed = report.failed.len(),
            "Bulk delete finished"
        );
        report
    }

    /// Collect download payloads for every selected file; folders are
    /// counted but skipped.
    pub async fn bulk_download(&self, ids: &[ItemId]) -> DownloadBatch {
        let mut batch = DownloadBatch::default();
        for &id in ids {
            match self.drive.find_item(id).await {
                Ok(Some(DriveItem::File(_))) => match self.drive.files().download(id).await {
                    Ok(payload) => batch.files.push(payload),
                    Err(error) => batch.failed.push((id, error)),
                },
                Ok(Some(DriveItem::Folder(_))) => batch.skipped_folders += 1,
                Ok(None) => batch
                    .failed
                    .push((id, AppError::not_found(format!("Item {id} not found")))),
                Err(error) => batch.failed.push((id, error)),
            }
        }
        batch
    }
}
