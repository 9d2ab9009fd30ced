//! Archive output boundary.
//!
//! Folder export produces a layout of file entries and empty-directory
//! placeholders; the component that turns that layout into actual
//! archive bytes (ZIP or otherwise) lives outside the core and receives
//! the layout through this trait.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Consumer of an archive layout.
///
/// Paths are `/`-joined and relative to the exported folder.
#[async_trait]
pub trait ArchiveSink: Send {
    /// Add a file at `path` with the given content.
    async fn put_file(&mut self, path: &str, content: Bytes) -> AppResult<()>;

    /// Add an explicit empty-directory placeholder at `path`.
    async fn put_dir(&mut self, path: &str) -> AppResult<()>;
}
