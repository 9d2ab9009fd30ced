//! Reserved virtual directories.
//!
//! These are navigation targets, not storage locations: `Recent` and
//! `Starred` are computed views over all items, `Trash` and
//! `Shared with me` list nothing. None of them may be the target of an
//! upload or a move.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::path::DrivePath;

/// A reserved navigation name that does not exist as a stored path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VirtualDir {
    /// All items, newest modification first.
    Recent,
    /// All items flagged as favorite.
    Starred,
    /// Placeholder; deletes are permanent, so this lists nothing.
    Trash,
    /// Placeholder; sharing is not part of the local store.
    SharedWithMe,
}

impl VirtualDir {
    /// All reserved names, in sidebar order.
    pub const ALL: [VirtualDir; 4] = [
        VirtualDir::Recent,
        VirtualDir::Starred,
        VirtualDir::Trash,
        VirtualDir::SharedWithMe,
    ];

    /// The display name used as the navigation segment.
    pub fn name(self) -> &'static str {
        match self {
            Self::Recent => "Recent",
            Self::Starred => "Starred",
            Self::Trash => "Trash",
            Self::SharedWithMe => "Shared with me",
        }
    }

    /// Match a segment name against the reserved set.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.name() == name)
    }

    /// The reserved root a path falls under, if any.
    ///
    /// Reservation is decided by the first segment, so nothing can be
    /// stored anywhere beneath a reserved name either.
    pub fn of_path(path: &DrivePath) -> Option<Self> {
        path.first().and_then(Self::from_name)
    }
}

impl fmt::Display for VirtualDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_root_detection() {
        let starred = DrivePath::new(["Starred"]).unwrap();
        let nested = DrivePath::new(["Recent", "x"]).unwrap();
        let plain = DrivePath::new(["Documents"]).unwrap();

        assert_eq!(VirtualDir::of_path(&starred), Some(VirtualDir::Starred));
        assert_eq!(VirtualDir::of_path(&nested), Some(VirtualDir::Recent));
        assert_eq!(VirtualDir::of_path(&plain), None);
        assert_eq!(VirtualDir::of_path(&DrivePath::root()), None);
    }

    #[test]
    fn test_shared_with_me_uses_spaced_name() {
        assert_eq!(
            VirtualDir::from_name("Shared with me"),
            Some(VirtualDir::SharedWithMe)
        );
    }
}
