//! CLI command definitions and dispatch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use clap::{Parser, Subcommand};

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::ArchiveSink;
use drivebox_core::types::path::DrivePath;
use drivebox_core::types::VirtualDir;
use drivebox_entity::file::CreateFile;
use drivebox_entity::folder::CreateFolder;
use drivebox_entity::item::{DriveItem, ItemKind};
use drivebox_service::{ArchiveService, DriveService};

use crate::output;

/// Drivebox — a path-indexed local drive store.
#[derive(Debug, Parser)]
#[command(name = "drivebox", version, about)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List items at a path (the drive root by default).
    Ls {
        /// Directory path, e.g. `Documents/Work`.
        path: Option<String>,
    },
    /// Print the folder hierarchy.
    Tree,
    /// Create a folder at the given path.
    Mkdir {
        /// Full path of the new folder, e.g. `Documents/Reports`.
        path: String,
    },
    /// Upload a local file into a drive directory.
    Put {
        /// Local file to upload.
        file: PathBuf,
        /// Destination directory (drive root by default).
        dest: Option<String>,
    },
    /// Export a file, or a whole folder as a directory layout.
    Get {
        /// Drive path of the file or folder.
        path: String,
        /// Local destination (defaults to the item's name).
        out: Option<PathBuf>,
    },
    /// Move an item into another directory.
    Mv {
        /// Drive path of the item to move.
        from: String,
        /// Destination directory.
        to: String,
    },
    /// Rename an item in place.
    Rename {
        /// Drive path of the item.
        path: String,
        /// The new name.
        new_name: String,
    },
    /// Delete an item; folders are deleted recursively.
    Rm {
        /// Drive path of the item.
        path: String,
    },
    /// Search both files and folders by name.
    Search {
        /// Substring to look for (case-insensitive).
        query: String,
    },
    /// Show drive statistics, or one folder's statistics.
    Stats {
        /// Folder path; omit for drive-wide numbers.
        path: Option<String>,
    },
    /// Toggle an item's favorite flag.
    Favorite {
        /// Drive path of the item.
        path: String,
    },
    /// List all items, most recently modified first.
    Recent,
    /// List favorite items.
    Starred,
    /// Populate an empty drive with demo content.
    Seed,
}

impl Cli {
    /// Run the selected command.
    pub async fn execute(
        self,
        drive: Arc<DriveService>,
        archive: Arc<ArchiveService>,
    ) -> AppResult<()> {
        match self.command {
            Commands::Ls { path } => {
                let path = parse_optional(path.as_deref())?;
                let items = drive.items_by_path(&path).await?;
                output::print_items(&items);
            }
            Commands::Tree => {
                let tree = drive.build_tree().await?;
                output::print_tree(&tree);
            }
            Commands::Mkdir { path } => {
                let (parent, name) = split_target(&path)?;
                let folder = drive
                    .folders()
                    .create(CreateFolder { name, path: parent })
                    .await?;
                println!("Created folder '{}'", folder.identity_path());
            }
            Commands::Put { file, dest } => {
                let dest = parse_optional(dest.as_deref())?;
                let name = file
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .ok_or_else(|| AppError::validation("Local path has no file name"))?;
                let content = Bytes::from(tokio::fs::read(&file).await?);

                let created = drive
                    .files()
                    .create(CreateFile {
                        name,
                        content,
                        path: dest,
                    })
                    .await?;
                println!(
                    "Uploaded '{}' ({})",
                    created.name,
                    output::format_size(created.size_bytes)
                );
            }
            Commands::Get { path, out } => match resolve_item(&drive, &path).await? {
                DriveItem::File(file) => {
                    let target = out.unwrap_or_else(|| PathBuf::from(&file.name));
                    tokio::fs::write(&target, &file.content).await?;
                    println!("Wrote {} to '{}'", output::format_size(file.size_bytes), target.display());
                }
                DriveItem::Folder(folder) => {
                    let target = out.unwrap_or_else(|| PathBuf::from(&folder.name));
                    let mut sink = DirSink::new(&target);
                    archive.export_folder(folder.id, &mut sink).await?;
                    println!("Exported folder '{}' to '{}'", folder.name, target.display());
                }
            },
            Commands::Mv { from, to } => {
                let item = resolve_item(&drive, &from).await?;
                let target = DrivePath::parse(&to)?;
                drive.move_item(item.id(), item.kind(), &target).await?;
                println!("Moved '{}' to '{}'", item.name(), target);
            }
            Commands::Rename { path, new_name } => {
                let item = resolve_item(&drive, &path).await?;
                let renamed = match item.kind() {
                    ItemKind::File => drive.files().rename(item.id(), &new_name).await?.name,
                    ItemKind::Folder => drive.folders().rename(item.id(), &new_name).await?.name,
                };
                println!("Renamed '{}' to '{renamed}'", item.name());
            }
            Commands::Rm { path } => match resolve_item(&drive, &path).await? {
                DriveItem::File(file) => {
                    drive.files().delete(file.id).await?;
                    println!("Deleted '{}'", file.name);
                }
                DriveItem::Folder(folder) => {
                    let removed = drive.folders().delete_recursive(folder.id).await?;
                    println!(
                        "Deleted '{}' ({} folders, {} files)",
                        folder.name, removed.folders, removed.files
                    );
                }
            },
            Commands::Search { query } => {
                let items = drive.search(&query).await?;
                output::print_items(&items);
            }
            Commands::Stats { path } => match path {
                None => {
                    let stats = drive.storage_stats().await?;
                    output::print_storage_stats(&stats);
                }
                Some(raw) => {
                    let identity = DrivePath::parse(&raw)?;
                    let folder = drive
                        .folders()
                        .get_by_identity(&identity)
                        .await?
                        .ok_or_else(|| AppError::not_found(format!("No folder at '{raw}'")))?;
                    let stats = drive.folders().get_stats(folder.id).await?;
                    output::print_folder_stats(&folder.name, &stats);
                }
            },
            Commands::Favorite { path } => {
                let item = resolve_item(&drive, &path).await?;
                let updated = drive.toggle_favorite(item.id(), item.kind()).await?;
                let state = if updated.is_favorite() { "starred" } else { "unstarred" };
                println!("{} '{}'", state, updated.name());
            }
            Commands::Recent => {
                let items = drive.get_all_recent().await?;
                output::print_items(&items);
            }
            Commands::Starred => {
                let items = drive.get_favorites().await?;
                output::print_items(&items);
            }
            Commands::Seed => seed(&drive).await?,
        }
        Ok(())
    }
}

/// Parse an optional directory argument, defaulting to the drive root.
fn parse_optional(raw: Option<&str>) -> AppResult<DrivePath> {
    match raw {
        Some(raw) => DrivePath::parse(raw),
        None => Ok(DrivePath::root()),
    }
}

/// Split a full path into (parent directory, leaf name).
fn split_target(raw: &str) -> AppResult<(DrivePath, String)> {
    let path = DrivePath::parse(raw)?;
    let name = path
        .leaf()
        .ok_or_else(|| AppError::validation("A name is required"))?
        .to_string();
    let parent = path.parent().unwrap_or_else(DrivePath::root);
    Ok((parent, name))
}

/// Resolve a drive path to the item living there.
async fn resolve_item(drive: &DriveService, raw: &str) -> AppResult<DriveItem> {
    let (parent, name) = split_target(raw)?;
    if VirtualDir::of_path(&parent).is_some() {
        return Err(AppError::validation(format!(
            "'{raw}' is inside a reserved view, not a stored location"
        )));
    }
    drive
        .items_by_path(&parent)
        .await?
        .into_iter()
        .find(|item| item.name() == name)
        .ok_or_else(|| AppError::not_found(format!("No item at '{raw}'")))
}

/// Writes an export layout into a local directory.
struct DirSink {
    root: PathBuf,
}

impl DirSink {
    fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }
}

#[async_trait]
impl ArchiveSink for DirSink {
    async fn put_file(&mut self, path: &str, content: Bytes) -> AppResult<()> {
        let full = self.root.join(path);
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&full, &content).await?;
        Ok(())
    }

    async fn put_dir(&mut self, path: &str) -> AppResult<()> {
        tokio::fs::create_dir_all(self.root.join(path)).await?;
        Ok(())
    }
}

/// Demo content for an empty drive.
async fn seed(drive: &DriveService) -> AppResult<()> {
    let stats = drive.storage_stats().await?;
    if stats.total_items > 0 {
        println!("Drive already has content, skipping seed");
        return Ok(());
    }

    for (name, parent) in [
        ("Documents", DrivePath::root()),
        ("Images", DrivePath::root()),
        ("Projects", DrivePath::root()),
        ("Work", DrivePath::parse("Documents")?),
        ("Personal", DrivePath::parse("Documents")?),
        ("Vacation Photos", DrivePath::parse("Images")?),
        ("Screenshots", DrivePath::parse("Images")?),
    ] {
        drive
            .folders()
            .create(CreateFolder {
                name: name.to_string(),
                path: parent,
            })
            .await?;
    }

    let files: [(&str, &str, bool); 11] = [
        ("Resume.pdf", "", true),
        ("Presentation.pptx", "", false),
        ("Budget.xlsx", "", false),
        ("Photo_2024.jpg", "", false),
        ("Notes.txt", "", false),
        ("Contract.pdf", "Documents", false),
        ("Invoice.docx", "Documents", false),
        ("Profile.jpg", "Images", true),
        ("Background.png", "Images", false),
        ("Website.zip", "Projects", false),
        ("App_Design.sketch", "Projects", true),
    ];
    for (name, parent, favorite) in files {
        let created = drive
            .files()
            .create(CreateFile {
                name: name.to_string(),
                content: Bytes::from(format!("placeholder content for {name}")),
                path: DrivePath::parse(parent)?,
            })
            .await?;
        if favorite {
            drive.toggle_favorite(created.id, ItemKind::File).await?;
        }
    }

    let stats = drive.storage_stats().await?;
    println!(
        "Seeded {} items ({} folders, {} files)",
        stats.total_items, stats.folder_count, stats.file_count
    );
    Ok(())
}
