//! Per-record metadata as supplied by the host.

use std::collections::BTreeMap;

/// Metadata for one record, fetched from the host's metadata store.
///
/// Every field degrades gracefully: a missing creation timestamp is treated
/// as 0, a missing modification timestamp falls back to the creation
/// timestamp, and a missing title falls back to the record name. The
/// projector applies those defaults; this struct just carries what the host
/// knows.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// Display title, if the record has one.
    pub title: Option<String>,
    /// Creation timestamp, epoch seconds.
    pub created: Option<i64>,
    /// Last-modification timestamp, epoch seconds.
    pub modified: Option<i64>,
    /// Original author.
    pub creator: String,
    /// Everyone who has edited the record, in host order.
    pub contributors: Vec<String>,
    /// Abstract / description text (expensive for the host to produce).
    pub abstract_text: String,
    /// Outbound reference targets mapped to their "link resolves" flag.
    pub references: BTreeMap<String, bool>,
    /// Custom template fields, keyed by dotted path (`group:field`).
    pub custom: BTreeMap<String, String>,
}

impl Metadata {
    /// Looks up a metadata field by the key a display template would use.
    ///
    /// Well-known fields are matched first, then the custom map (which holds
    /// both plain and `group:field` dotted keys).
    pub fn field(&self, key: &str) -> Option<String> {
        match key {
            "title" => self.title.clone(),
            "creator" => Some(self.creator.clone()),
            "contributor" => Some(self.contributors.join(" ")),
            "abstract" => Some(self.abstract_text.clone()),
            _ => self.custom.get(key).cloned(),
        }
    }
}
