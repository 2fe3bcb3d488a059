//! Record identifiers.
//!
//! A [`RecordId`] is an opaque hierarchical path whose segments are joined
//! by `:`, e.g. `"foo:bar:baz"`. The last segment is the record's *name*,
//! everything before it is the *namespace*.

use serde::{Deserialize, Serialize};

/// Separator between path segments.
pub const SEGMENT_SEP: char = ':';

/// Hierarchical identifier of a record (a wiki page id, generalized).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Creates an identifier from a full path.
    pub fn new(path: impl Into<String>) -> Self {
        RecordId(path.into())
    }

    /// Returns the full path.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the last path segment.
    pub fn name(&self) -> &str {
        match self.0.rfind(SEGMENT_SEP) {
            Some(pos) => &self.0[pos + 1..],
            None => &self.0,
        }
    }

    /// Returns everything before the last segment, or `None` for root-level
    /// records.
    pub fn namespace(&self) -> Option<&str> {
        self.0.rfind(SEGMENT_SEP).map(|pos| &self.0[..pos])
    }

    /// Returns the path segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEGMENT_SEP)
    }

    /// Returns the namespace nesting depth (number of separators).
    pub fn depth(&self) -> usize {
        self.0.matches(SEGMENT_SEP).count()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(path: &str) -> Self {
        RecordId::new(path)
    }
}

impl From<String> for RecordId {
    fn from(path: String) -> Self {
        RecordId::new(path)
    }
}
