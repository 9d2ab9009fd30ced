//! # drivebox-service
//!
//! Business logic service layer for Drivebox. Each service orchestrates
//! the repositories to implement application-level use cases: the
//! file/folder stores, tree assembly, archive export, the cross-type
//! drive façade, and the selection/bulk coordinator.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references; there is no ambient
//! global store.

pub mod drive;
pub mod file;
pub mod folder;
mod validate;

pub use drive::{
    ActionOutcome, BulkReport, BulkService, DownloadBatch, DriveBrowser, DriveService,
    SelectionState,
};
pub use file::{FileDownload, FileService};
pub use folder::{
    ArchiveEntry, ArchiveManifest, ArchiveService, FolderService, FolderWithChildren, TreeService,
};
