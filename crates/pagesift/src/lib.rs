//! Pagesift - query-and-report engine for hierarchical record collections.
//!
//! Pagesift evaluates a query against a host-provided record collection
//! (wiki pages, documentation trees, anything with colon-separated
//! hierarchical identifiers) and produces an ordered, optionally grouped
//! report. The pipeline is fixed:
//!
//! - **Select**: pattern lookup over identifiers (or host full-text search)
//! - **Validate**: start pages, namespace depth, host ACL
//! - **Project**: one row per record with the requested columns
//! - **Filter**: metadata predicates (regex or date range, with polarity)
//! - **Sort**: multi-key stable sort with per-key collation and direction
//! - **Group**: run-length headings over the sorted rows, hierarchical for
//!   namespaces
//!
//! The engine owns no data: hosts implement the narrow traits in [`host`]
//! and the pipeline reads through them.
//!
//! # Quick Start
//!
//! ```rust
//! use pagesift::{pipeline, Context, Options, Metadata, RecordId, ResultRow};
//!
//! // A host with two namespaces and no metadata to speak of.
//! struct Demo;
//!
//! impl pagesift::Resolver for Demo {
//!     fn resolve_namespace(&self, token: &str, _ctx: &Context) -> String {
//!         token.trim_matches(':').to_string()
//!     }
//! }
//! impl pagesift::SearchIndex for Demo {
//!     fn search_text(&self, _query: &str) -> Vec<RecordId> { Vec::new() }
//!     fn record_ids(&self) -> Vec<RecordId> {
//!         ["docs:intro", "docs:setup", "blog:intro"]
//!             .iter().map(|p| RecordId::new(*p)).collect()
//!     }
//! }
//! impl pagesift::MetadataStore for Demo {
//!     fn metadata(&self, _id: &RecordId) -> Metadata { Metadata::default() }
//!     fn backlinks(&self, ids: &[RecordId]) -> Vec<Vec<String>> {
//!         vec![Vec::new(); ids.len()]
//!     }
//! }
//! impl pagesift::AccessControl for Demo {
//!     fn can_read(&self, _id: &RecordId) -> bool { true }
//! }
//! impl pagesift::Existence for Demo {
//!     fn exists(&self, _id: &RecordId) -> bool { true }
//!     fn is_hidden(&self, _id: &RecordId) -> bool { false }
//! }
//!
//! let ctx = Context::new(RecordId::new("docs:index"), "start");
//! let opts = Options::default().sort_by("ns", "").sort_by("name", "").grouped();
//!
//! let outcome = pipeline::run(&Demo, &ctx, &opts, ".* @docs");
//! match outcome {
//!     pagesift::Outcome::Results { rows, count, sorted } => {
//!         assert_eq!(count, 2);
//!         assert!(sorted);
//!         assert!(matches!(&rows[0], ResultRow::Heading { label, .. } if label == "docs"));
//!     }
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! ```
//!
//! # Query Syntax
//!
//! A raw query mixes the name pattern with namespace filters:
//!
//! ```text
//! report @work ns:docs ^archive -ns:tmp
//! ```
//!
//! selects records whose name matches `report` (case-insensitive, `*`
//! expands to `.*`), inside `work` or `docs`, outside `archive` and `tmp`.
//! Exclusions always win over inclusions.

mod dates;
mod error;
mod filter;
mod group;
mod host;
mod id;
mod meta;
mod options;
mod project;
mod query;
mod row;
mod select;
mod sort;

pub mod pipeline;

// Re-export public API
pub use error::{Result, SiftError};
pub use filter::apply as filter_rows;
pub use group::{group_rows, GroupKey, GroupKind, ResultRow};
pub use host::{AccessControl, Existence, Host, MetadataStore, Resolver, SearchIndex};
pub use id::{RecordId, SEGMENT_SEP};
pub use meta::Metadata;
pub use options::{Context, Options, Snippet, SnippetKind};
pub use pipeline::Outcome;
pub use project::{build as project_records, Projection};
pub use query::{parse_namespace_query, ParsedQuery};
pub use row::{Cell, ColKey, DateBasis, DateKey, DateParts, Row, Value};
pub use select::{lookup, validate};
pub use sort::{compare_rows, natural_cmp, sort_rows, Collation, Dir, SortKey};
