//! Collaborator contracts the engine consumes.
//!
//! The engine owns none of the data it reports on. Each external concern is
//! a narrow trait; [`Host`] bundles them for pipeline entry points and is
//! blanket-implemented for anything providing all of them. Every method is
//! a read-only query, so hosts may serve concurrent pipeline runs without
//! coordination.

use crate::id::RecordId;
use crate::meta::Metadata;
use crate::options::Context;

/// Resolves relative namespace tokens to absolute namespace paths.
pub trait Resolver {
    /// Resolves a token from the query string against the current context.
    ///
    /// Best effort: an unresolvable token yields an empty string, which the
    /// caller treats the same as "no namespace".
    fn resolve_namespace(&self, token: &str, ctx: &Context) -> String;
}

/// The host's search index.
pub trait SearchIndex {
    /// Full-text search; returns matching record identifiers.
    fn search_text(&self, query: &str) -> Vec<RecordId>;

    /// The raw identifier catalog the pattern lookup scans.
    fn record_ids(&self) -> Vec<RecordId>;
}

/// The host's metadata store.
pub trait MetadataStore {
    /// Metadata for one record. Hosts return `Metadata::default()` for
    /// records they know nothing about.
    fn metadata(&self, id: &RecordId) -> Metadata;

    /// Backlink targets for a batch of records, parallel to `ids`.
    ///
    /// Called once per pipeline run for the whole batch, never per record.
    fn backlinks(&self, ids: &[RecordId]) -> Vec<Vec<String>>;
}

/// Read-permission checks for the current actor.
pub trait AccessControl {
    fn can_read(&self, id: &RecordId) -> bool;
}

/// Existence and visibility of records.
pub trait Existence {
    fn exists(&self, id: &RecordId) -> bool;
    fn is_hidden(&self, id: &RecordId) -> bool;
}

/// Everything a pipeline run needs from its host.
pub trait Host: Resolver + SearchIndex + MetadataStore + AccessControl + Existence {}

impl<T> Host for T where T: Resolver + SearchIndex + MetadataStore + AccessControl + Existence {}
