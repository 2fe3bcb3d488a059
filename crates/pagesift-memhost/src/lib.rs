//! In-memory pagesift host for tests, examples and prototyping.
//!
//! [`MemHost`] keeps a record catalog in a sorted map and implements every
//! host trait over it. The builder methods consume and return the host so a
//! fixture reads as one expression:
//!
//! ```rust
//! use pagesift_memhost::MemHost;
//!
//! let host = MemHost::new()
//!     .record("docs:intro")
//!     .record("docs:setup")
//!     .hidden("docs:draft");
//! ```
//!
//! Full-text search is a naive substring scan over each record's body and
//! name. Namespace resolution supports `.`-relative tokens against the
//! query context; anything else is taken as an absolute path.

use std::collections::BTreeMap;

use pagesift::{
    AccessControl, Context, Existence, Metadata, MetadataStore, RecordId, Resolver, SearchIndex,
};

#[derive(Debug, Clone)]
struct Record {
    meta: Metadata,
    body: String,
    hidden: bool,
    readable: bool,
}

impl Default for Record {
    fn default() -> Self {
        Record {
            meta: Metadata::default(),
            body: String::new(),
            hidden: false,
            readable: true,
        }
    }
}

/// An in-memory record collection implementing the pagesift host traits.
#[derive(Debug, Clone, Default)]
pub struct MemHost {
    records: BTreeMap<String, Record>,
    backlinks: BTreeMap<String, Vec<String>>,
}

impl MemHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record with default metadata.
    pub fn record(self, id: impl Into<String>) -> Self {
        self.record_with(id, Metadata::default())
    }

    /// Adds a record with explicit metadata.
    pub fn record_with(mut self, id: impl Into<String>, meta: Metadata) -> Self {
        self.records.insert(
            id.into(),
            Record {
                meta,
                ..Default::default()
            },
        );
        self
    }

    /// Sets a record's body text, used by full-text search.
    pub fn body(mut self, id: &str, text: impl Into<String>) -> Self {
        self.entry(id).body = text.into();
        self
    }

    /// Marks a record hidden: it exists but never matches a lookup.
    pub fn hidden(mut self, id: impl Into<String>) -> Self {
        self.entry(&id.into()).hidden = true;
        self
    }

    /// Marks a record unreadable for the current actor.
    pub fn unreadable(mut self, id: impl Into<String>) -> Self {
        self.entry(&id.into()).readable = false;
        self
    }

    /// Registers records linking to `id`.
    pub fn linked_from(mut self, id: impl Into<String>, sources: &[&str]) -> Self {
        self.backlinks
            .entry(id.into())
            .or_default()
            .extend(sources.iter().map(|s| s.to_string()));
        self
    }

    fn entry(&mut self, id: &str) -> &mut Record {
        self.records.entry(id.to_string()).or_default()
    }
}

impl Resolver for MemHost {
    /// `.` and `.:sub` resolve against the context's current namespace;
    /// every other token is absolute. The root namespace resolves to the
    /// empty string, which matches nothing downstream.
    fn resolve_namespace(&self, token: &str, ctx: &Context) -> String {
        let current = ctx.current.namespace().unwrap_or("");
        match token.strip_prefix('.') {
            Some("") => current.to_string(),
            Some(rest) => {
                let rest = rest.trim_start_matches(':');
                if current.is_empty() {
                    rest.to_string()
                } else {
                    format!("{current}:{rest}")
                }
            }
            None => token.trim_matches(':').to_string(),
        }
    }
}

impl SearchIndex for MemHost {
    fn search_text(&self, query: &str) -> Vec<RecordId> {
        self.records
            .iter()
            .filter(|(id, record)| record.body.contains(query) || id.contains(query))
            .map(|(id, _)| RecordId::new(id.clone()))
            .collect()
    }

    fn record_ids(&self) -> Vec<RecordId> {
        self.records
            .keys()
            .map(|id| RecordId::new(id.clone()))
            .collect()
    }
}

impl MetadataStore for MemHost {
    fn metadata(&self, id: &RecordId) -> Metadata {
        self.records
            .get(id.as_str())
            .map(|record| record.meta.clone())
            .unwrap_or_default()
    }

    fn backlinks(&self, ids: &[RecordId]) -> Vec<Vec<String>> {
        ids.iter()
            .map(|id| self.backlinks.get(id.as_str()).cloned().unwrap_or_default())
            .collect()
    }
}

impl AccessControl for MemHost {
    fn can_read(&self, id: &RecordId) -> bool {
        self.records
            .get(id.as_str())
            .map(|record| record.readable)
            .unwrap_or(false)
    }
}

impl Existence for MemHost {
    fn exists(&self, id: &RecordId) -> bool {
        self.records.contains_key(id.as_str())
    }

    fn is_hidden(&self, id: &RecordId) -> bool {
        self.records
            .get(id.as_str())
            .map(|record| record.hidden)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx_at(current: &str) -> Context {
        Context::new(RecordId::new(current), "start")
    }

    #[test]
    fn dot_tokens_resolve_against_the_current_namespace() {
        let host = MemHost::new();
        let ctx = ctx_at("work:reports:q3");
        assert_eq!(host.resolve_namespace(".", &ctx), "work:reports");
        assert_eq!(host.resolve_namespace(".:drafts", &ctx), "work:reports:drafts");
        assert_eq!(host.resolve_namespace("home", &ctx), "home");
        assert_eq!(host.resolve_namespace(":home:", &ctx), "home");
    }

    #[test]
    fn dot_at_the_root_resolves_to_nothing() {
        let host = MemHost::new();
        // resolution failure surfaces as the empty string
        assert_eq!(host.resolve_namespace(".", &ctx_at("rootpage")), "");
    }

    #[test]
    fn search_scans_bodies_and_identifiers() {
        let host = MemHost::new()
            .record("docs:intro")
            .body("docs:intro", "welcome aboard")
            .record("notes:misc");

        let hits = host.search_text("welcome");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].as_str(), "docs:intro");

        let hits = host.search_text("notes");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn flags_survive_building_order() {
        let host = MemHost::new().hidden("a:page").unreadable("a:other");
        assert!(host.is_hidden(&RecordId::new("a:page")));
        assert!(!host.can_read(&RecordId::new("a:other")));
        // hidden/unreadable builders create the record if it was not added
        assert!(host.exists(&RecordId::new("a:page")));
    }

    #[test]
    fn backlinks_come_back_in_request_order() {
        let host = MemHost::new()
            .record("a:one")
            .record("a:two")
            .linked_from("a:two", &["x:src", "y:src"]);
        let ids = [RecordId::new("a:one"), RecordId::new("a:two")];
        let links = host.backlinks(&ids);
        assert_eq!(links, vec![Vec::<String>::new(), vec!["x:src".to_string(), "y:src".to_string()]]);
    }
}
