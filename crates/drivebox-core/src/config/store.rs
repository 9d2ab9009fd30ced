//! Table store configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Settings for the persistent table store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding namespace snapshots.
    #[serde(default = "default_data_root")]
    pub data_root: String,
    /// When true, nothing is written to disk (used by tests).
    #[serde(default)]
    pub ephemeral: bool,
}

impl StoreConfig {
    /// Snapshot file for a namespace.
    pub fn snapshot_path(&self, namespace: &str) -> PathBuf {
        PathBuf::from(&self.data_root).join(format!("drive-{namespace}.json"))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_root: default_data_root(),
            ephemeral: false,
        }
    }
}

fn default_data_root() -> String {
    "data".to_string()
}
