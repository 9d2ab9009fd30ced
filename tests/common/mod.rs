//! Shared fixtures for the end-to-end tests.

use std::sync::Arc;

use bytes::Bytes;

use drivebox_core::types::path::DrivePath;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_database::store::DriveStore;
use drivebox_entity::file::{CreateFile, FileEntry};
use drivebox_entity::folder::{CreateFolder, FolderEntry};
use drivebox_service::{ArchiveService, DriveService, FileService, FolderService, TreeService};

/// A fully wired drive over an ephemeral store.
pub struct TestDrive {
    pub store: Arc<DriveStore>,
    pub drive: Arc<DriveService>,
}

impl TestDrive {
    /// Wire repositories and services over an in-memory store.
    pub fn new() -> Self {
        let store = Arc::new(DriveStore::in_memory());
        let file_repo = Arc::new(FileRepository::new(store.clone()));
        let folder_repo = Arc::new(FolderRepository::new(store.clone()));

        let files = Arc::new(FileService::new(file_repo.clone(), folder_repo.clone()));
        let folders = Arc::new(FolderService::new(folder_repo.clone(), file_repo.clone()));
        let tree = Arc::new(TreeService::new(folder_repo.clone(), file_repo.clone()));
        let archive = Arc::new(ArchiveService::new(folder_repo, file_repo));

        Self {
            store,
            drive: Arc::new(DriveService::new(files, folders, tree, archive)),
        }
    }

    /// Create a folder under `parent` and return it.
    pub async fn mkdir(&self, name: &str, parent: &[&str]) -> FolderEntry {
        self.drive
            .folders()
            .create(CreateFolder {
                name: name.to_string(),
                path: path(parent),
            })
            .await
            .expect("folder create should succeed")
    }

    /// Create a file with the given content under `parent`.
    pub async fn mkfile(&self, name: &str, content: &str, parent: &[&str]) -> FileEntry {
        self.drive
            .files()
            .create(CreateFile {
                name: name.to_string(),
                content: Bytes::from(content.to_string()),
                path: path(parent),
            })
            .await
            .expect("file create should succeed")
    }

    /// Current (files, folders) row counts.
    pub async fn row_counts(&self) -> (usize, usize) {
        self.store
            .read(|tables| (tables.files.len(), tables.folders.len()))
            .await
    }
}

/// Build a `DrivePath` from segment literals.
pub fn path(segments: &[&str]) -> DrivePath {
    DrivePath::new(segments.iter().copied()).expect("test path should be valid")
}
