//! Folder entity and tree structures.

pub mod model;
pub mod tree;

pub use model::{CreateFolder, FolderEntry};
pub use tree::{FolderStats, FolderTreeNode};
