//! Drivebox — path-indexed local drive store.
//!
//! Command-line entry point that wires the store, repositories, and
//! services together and dispatches one subcommand.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use drivebox_core::config::AppConfig;
use drivebox_core::error::AppError;
use drivebox_database::repositories::file::FileRepository;
use drivebox_database::repositories::folder::FolderRepository;
use drivebox_database::store::DriveStore;
use drivebox_service::{ArchiveService, DriveService, FileService, FolderService, TreeService};

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let cli = Cli::parse();
    if let Err(e) = run(config, cli).await {
        tracing::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().with_env_filter(filter).with_target(false).init();
        }
    }
}

/// Open the namespace store, wire the services, and run the command.
async fn run(config: AppConfig, cli: Cli) -> Result<(), AppError> {
    let namespace = config.namespace.resolve();
    tracing::debug!(namespace, "Opening drive store");

    let store = Arc::new(DriveStore::open(&config.store, &namespace).await?);

    let file_repo = Arc::new(FileRepository::new(store.clone()));
    let folder_repo = Arc::new(FolderRepository::new(store));

    let files = Arc::new(FileService::new(file_repo.clone(), folder_repo.clone()));
    let folders = Arc::new(FolderService::new(folder_repo.clone(), file_repo.clone()));
    let tree = Arc::new(TreeService::new(folder_repo.clone(), file_repo.clone()));
    let archive = Arc::new(ArchiveService::new(folder_repo, file_repo));

    let drive = Arc::new(DriveService::new(files, folders, tree, archive.clone()));

    cli.execute(drive, archive).await
}
