//! Folder operations: CRUD, structural mutations, tree assembly, and
//! archive export.

pub mod archive;
pub mod service;
pub mod tree;

pub use archive::{ArchiveEntry, ArchiveManifest, ArchiveService};
pub use service::{FolderService, FolderWithChildren};
pub use tree::TreeService;
