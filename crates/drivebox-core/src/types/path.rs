//! The drive path codec.
//!
//! A [`DrivePath`] is an ordered sequence of segment names locating a
//! directory. Containment between rows is inferred by comparing these
//! sequences, so every comparison here is segment-wise: a folder named
//! `foo` is never treated as an ancestor of a sibling named `foo-bar`
//! even though `"foo-bar"` starts with the string `"foo"`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::result::AppResult;

/// Separator used by [`DrivePath::encode`] to build comparison keys.
pub const SEPARATOR: char = '/';

/// An ordered sequence of path segment names.
///
/// The empty path is the drive root. Segments never contain the
/// separator and are never empty; both are rejected at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrivePath(Vec<String>);

impl DrivePath {
    /// The drive root (empty segment sequence).
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Build a path from segments, validating each one.
    pub fn new<I, S>(segments: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        for segment in &segments {
            validate_segment(segment)?;
        }
        Ok(Self(segments))
    }

    /// Parse an encoded path string such as `"Documents/Work"`.
    ///
    /// Leading, trailing, and repeated separators are tolerated the way
    /// the encoded form tolerates them: empty segments are skipped.
    pub fn parse(encoded: &str) -> AppResult<Self> {
        Self::new(
            encoded
                .split(SEPARATOR)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string),
        )
    }

    /// Serialize to the canonical comparison key.
    pub fn encode(&self) -> String {
        self.0.join(&SEPARATOR.to_string())
    }

    /// The raw segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether this is the drive root.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first segment, if any.
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// The last segment, if any.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// The path with the last segment removed; `None` for the root.
    pub fn parent(&self) -> Option<DrivePath> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Append one segment without re-validation.
    ///
    /// Used to derive identity paths from stored names, which were
    /// validated as segments when the row was written.
    pub fn child(&self, name: &str) -> DrivePath {
        let mut segments = self.0.clone();
        segments.push(name.to_string());
        Self(segments)
    }

    /// Segment-wise prefix test. Equal paths count as a prefix.
    pub fn starts_with(&self, prefix: &DrivePath) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    /// Replace a leading `old` prefix with `new`, preserving the
    /// remaining segments exactly.
    ///
    /// Returns `None` when `old` is not a segment-wise prefix of `self`.
    pub fn rewrite_prefix(&self, old: &DrivePath, new: &DrivePath) -> Option<DrivePath> {
        if !self.starts_with(old) {
            return None;
        }
        let mut segments = new.0.clone();
        segments.extend_from_slice(&self.0[old.0.len()..]);
        Some(Self(segments))
    }
}

impl fmt::Display for DrivePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

/// Validate a single path segment (also applied to folder names, which
/// become segments of their descendants' paths).
pub fn validate_segment(segment: &str) -> AppResult<()> {
    if segment.trim().is_empty() {
        return Err(AppError::validation("Path segment cannot be empty"));
    }
    if segment.contains(SEPARATOR) {
        return Err(AppError::validation(format!(
            "Path segment '{segment}' may not contain '{SEPARATOR}'"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_root_is_empty() {
        assert_eq!(DrivePath::root().encode(), "");
    }

    #[test]
    fn test_parse_tolerates_extra_separators() {
        let path = DrivePath::parse("/Documents//Work/").unwrap();
        assert_eq!(path.segments(), ["Documents", "Work"]);
    }

    #[test]
    fn test_rejects_empty_segment() {
        assert!(DrivePath::new(["Documents", "  "]).is_err());
    }

    #[test]
    fn test_rejects_separator_in_segment() {
        assert!(DrivePath::new(["a/b"]).is_err());
    }

    #[test]
    fn test_starts_with_is_segment_wise() {
        let foo = DrivePath::new(["foo"]).unwrap();
        let foo_bar = DrivePath::new(["foo-bar"]).unwrap();
        let nested = DrivePath::new(["foo", "bar"]).unwrap();

        assert!(nested.starts_with(&foo));
        assert!(foo.starts_with(&foo));
        // "foo-bar" begins with the string "foo" but is not a descendant.
        assert!(!foo_bar.starts_with(&foo));
    }

    #[test]
    fn test_rewrite_prefix_preserves_remainder() {
        let path = DrivePath::new(["a", "b", "c"]).unwrap();
        let old = DrivePath::new(["a"]).unwrap();
        let new = DrivePath::new(["x", "a"]).unwrap();

        let rewritten = path.rewrite_prefix(&old, &new).unwrap();
        assert_eq!(rewritten.segments(), ["x", "a", "b", "c"]);
    }

    #[test]
    fn test_rewrite_prefix_requires_prefix() {
        let path = DrivePath::new(["a", "b"]).unwrap();
        let other = DrivePath::new(["z"]).unwrap();
        assert!(path.rewrite_prefix(&other, &DrivePath::root()).is_none());
    }

    #[test]
    fn test_parent_and_leaf() {
        let path = DrivePath::new(["a", "b"]).unwrap();
        assert_eq!(path.leaf(), Some("b"));
        assert_eq!(path.parent().unwrap().segments(), ["a"]);
        assert!(DrivePath::root().parent().is_none());
    }
}
