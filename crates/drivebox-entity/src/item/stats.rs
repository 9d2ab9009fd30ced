//! Drive-wide aggregate statistics.

use serde::{Deserialize, Serialize};

/// Aggregates across both tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageStats {
    /// Sum of all file sizes in bytes.
    pub total_size_bytes: u64,
    /// Number of files.
    pub file_count: u64,
    /// Number of folders.
    pub folder_count: u64,
    /// Files plus folders.
    pub total_items: u64,
}
