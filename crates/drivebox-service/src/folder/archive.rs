//! Folder export layout.
//!
//! A folder export bundles every descendant file under its path
//! relative to the exported folder, with explicit placeholders for
//! descendant folders holding no files of their own. The layout is
//! handed to an [`ArchiveSink`]; compressing it into actual archive
//! bytes is outside the core.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::ArchiveSink;
use drivebox_core::types::path::DrivePath;
use drivebox_core::types::ItemId;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;

/// One entry of an export layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveEntry {
    /// A file, with its content.
    File {
        /// `/`-joined path relative to the exported folder.
        path: String,
        /// The raw content.
        content: Bytes,
    },
    /// A placeholder for a folder with no files directly inside it.
    Dir {
        /// `/`-joined path relative to the exported folder.
        path: String,
    },
}

impl ArchiveEntry {
    /// The entry's relative path.
    pub fn path(&self) -> &str {
        match self {
            Self::File { path, .. } | Self::Dir { path } => path,
        }
    }
}

/// A complete export layout for one folder.
#[derive(Debug, Clone)]
pub struct ArchiveManifest {
    /// Suggested archive file name (`<folder>.zip`).
    pub archive_name: String,
    /// Files first (by path), then directory placeholders (by path).
    pub entries: Vec<ArchiveEntry>,
}

/// Produces folder export layouts.
#[derive(Debug, Clone)]
pub struct ArchiveService {
    /// Folder repository.
    folders: Arc<FolderRepository>,
    /// File repository.
    files: Arc<FileRepository>,
}

impl ArchiveService {
    /// Creates a new archive service.
    pub fn new(folders: Arc<FolderRepository>, files: Arc<FileRepository>) -> Self {
        Self { folders, files }
    }

    /// Builds the export layout for a folder.
    pub async fn folder_manifest(&self, id: ItemId) -> AppResult<ArchiveManifest> {
        let folder = self
            .folders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;

        let base = folder.identity_path();
        let descendant_files = self.files.find_descendants(&base).await?;
        let descendant_folders = self.folders.find_descendants(&base).await?;

        let mut file_entries = Vec::with_capacity(descendant_files.len());
        for file in &descendant_files {
            let relative_dir = file
                .path
                .rewrite_prefix(&base, &DrivePath::root())
                .ok_or_else(|| {
                    AppError::internal(format!("File '{}' escaped the export prefix", file.name))
                })?;
            let path = if relative_dir.is_empty() {
                file.name.clone()
            } else {
                format!("{}/{}", relative_dir.encode(), file.name)
            };
            file_entries.push(ArchiveEntry::File {
                path,
                content: file.content.clone(),
            });
        }

        let mut dir_entries = Vec::new();
        for subfolder in &descendant_folders {
            let identity = subfolder.identity_path();
            let has_direct_files = descendant_files.iter().any(|file| file.path == identity);
            if has_direct_files {
                continue;
            }
            let relative = identity
                .rewrite_prefix(&base, &DrivePath::root())
                .ok_or_else(|| {
                    AppError::internal(format!(
                        "Folder '{}' escaped the export prefix",
                        subfolder.name
                    ))
                })?;
            if !relative.is_empty() {
                dir_entries.push(ArchiveEntry::Dir {
                    path: relative.encode(),
                });
            }
        }

        file_entries.sort_by(|a, b| a.path().cmp(b.path()));
        dir_entries.sort_by(|a, b| a.path().cmp(b.path()));
        file_entries.extend(dir_entries);

        Ok(ArchiveManifest {
            archive_name: format!("{}.zip", folder.name),
            entries: file_entries,
        })
    }

    /// Streams a folder's export layout into a sink.
    pub async fn export_folder(&self, id: ItemId, sink: &mut dyn ArchiveSink) -> AppResult<()> {
        let manifest = self.folder_manifest(id).await?;
        let entry_count = manifest.entries.len();

        for entry in manifest.entries {
            match entry {
                ArchiveEntry::File { path, content } => sink.put_file(&path, content).await?,
                ArchiveEntry::Dir { path } => sink.put_dir(&path).await?,
            }
        }

        info!(folder_id = %id, entries = entry_count, "Folder exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use drivebox_database::store::DriveStore;
    use drivebox_entity::file::{CreateFile, FileEntry};
    use drivebox_entity::folder::{CreateFolder, FolderEntry};

    struct MemorySink {
        files: Vec<String>,
        dirs: Vec<String>,
    }

    #[async_trait]
    impl ArchiveSink for MemorySink {
        async fn put_file(&mut self, path: &str, _content: Bytes) -> AppResult<()> {
            self.files.push(path.to_string());
            Ok(())
        }

        async fn put_dir(&mut self, path: &str) -> AppResult<()> {
            self.dirs.push(path.to_string());
            Ok(())
        }
    }

    async fn fixture() -> (ArchiveService, ItemId) {
        let store = Arc::new(DriveStore::in_memory());
        let folders = Arc::new(FolderRepository::new(store.clone()));
        let files = Arc::new(FileRepository::new(store));

        let export = folders
            .create(FolderEntry::create(CreateFolder {
                name: "Export".to_string(),
                path: DrivePath::root(),
            }))
            .await
            .unwrap();
        for (name, path) in [
            ("Filled", DrivePath::new(["Export"]).unwrap()),
            ("Empty", DrivePath::new(["Export"]).unwrap()),
        ] {
            folders
                .create(FolderEntry::create(CreateFolder {
                    name: name.to_string(),
                    path,
                }))
                .await
                .unwrap();
        }
        for (name, path) in [
            ("top.txt", DrivePath::new(["Export"]).unwrap()),
            ("inner.txt", DrivePath::new(["Export", "Filled"]).unwrap()),
        ] {
            files
                .create(FileEntry::create(CreateFile {
                    name: name.to_string(),
                    content: Bytes::from_static(b"data"),
                    path,
                }))
                .await
                .unwrap();
        }

        (ArchiveService::new(folders, files), export.id)
    }

    #[tokio::test]
    async fn test_manifest_layout() {
        let (archive, export_id) = fixture().await;
        let manifest = archive.folder_manifest(export_id).await.unwrap();

        assert_eq!(manifest.archive_name, "Export.zip");
        let paths: Vec<&str> = manifest.entries.iter().map(ArchiveEntry::path).collect();
        assert_eq!(paths, ["Filled/inner.txt", "top.txt", "Empty"]);
        assert!(matches!(manifest.entries[2], ArchiveEntry::Dir { .. }));
    }

    #[tokio::test]
    async fn test_export_streams_to_sink() {
        let (archive, export_id) = fixture().await;
        let mut sink = MemorySink {
            files: Vec::new(),
            dirs: Vec::new(),
        };

        archive.export_folder(export_id, &mut sink).await.unwrap();
        assert_eq!(sink.files, ["Filled/inner.txt", "top.txt"]);
        assert_eq!(sink.dirs, ["Empty"]);
    }
}
