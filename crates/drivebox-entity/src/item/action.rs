//! Item actions dispatched from the UI layer.

use serde::{Deserialize, Serialize};

/// An action the UI can request on a single item.
///
/// A closed set handled by exhaustive matching, so adding an action is a
/// compile-time-checked change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ItemAction {
    /// Toggle the favorite flag.
    Favorite,
    /// Delete the item (recursively for folders).
    Delete,
    /// Rename the item.
    Rename {
        /// The new display name.
        new_name: String,
    },
    /// Export the item's content.
    Download,
}
