//! Storage namespace selection.
//!
//! Each namespace opens its own physical snapshot, so distinct devices
//! (or distinct configured ids) never see each other's drive. The core
//! is indifferent to how the id is derived.

use serde::{Deserialize, Serialize};

/// How the namespace id is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceStrategy {
    /// Use the configured `id` verbatim.
    #[default]
    Fixed,
    /// Derive the id from the machine's hostname.
    Machine,
}

/// Namespace selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// Selection strategy.
    #[serde(default)]
    pub strategy: NamespaceStrategy,
    /// Namespace id used by the `fixed` strategy.
    #[serde(default = "default_id")]
    pub id: String,
}

impl NamespaceConfig {
    /// Resolve the namespace id for this process.
    pub fn resolve(&self) -> String {
        match self.strategy {
            NamespaceStrategy::Fixed => self.id.clone(),
            NamespaceStrategy::Machine => std::env::var("HOSTNAME")
                .ok()
                .filter(|name| !name.is_empty())
                .unwrap_or_else(default_id),
        }
    }
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            strategy: NamespaceStrategy::Fixed,
            id: default_id(),
        }
    }
}

fn default_id() -> String {
    "local".to_string()
}
