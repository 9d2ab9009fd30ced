//! Sorting types for directory listings.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Flip the direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The attribute a directory listing is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Case-insensitive name order.
    #[default]
    Name,
    /// Last-modified timestamp, newest first by convention.
    Modified,
    /// Byte size, largest first by convention; folders sort as zero.
    Size,
    /// Item kind, files before folders.
    Kind,
}

impl SortKey {
    /// The direction a fresh listing uses for this key before the user
    /// flips it: timestamps and sizes read best largest/newest first.
    pub fn default_direction(self) -> SortDirection {
        match self {
            Self::Name | Self::Kind => SortDirection::Asc,
            Self::Modified | Self::Size => SortDirection::Desc,
        }
    }
}
