//! The end-to-end run: select, validate, project, filter, sort, limit,
//! group.
//!
//! The stages are fixed and always execute in this order. The limit cuts
//! leaf rows strictly after sorting, so a capped run returns the top of the
//! ordering rather than an arbitrary subset, and grouping runs last over
//! the surviving rows.

use serde::Serialize;
use tracing::{debug, warn};

use crate::filter;
use crate::group::{self, ResultRow};
use crate::host::Host;
use crate::options::{Context, Options};
use crate::project;
use crate::query::{self, ParsedQuery};
use crate::row::ColKey;
use crate::select;
use crate::sort;

/// Columns every leaf row carries, in output order.
pub const LEAF_COLUMNS: [ColKey; 5] = [
    ColKey::Name,
    ColKey::Id,
    ColKey::Title,
    ColKey::Abstract,
    ColKey::Display,
];

/// What a pipeline run produced.
///
/// The three empty cases are distinct on purpose: a caller renders "no
/// matches", "all matches filtered out" and "bad pattern" differently.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Results {
        rows: Vec<ResultRow>,
        /// Number of leaf rows after the limit.
        count: usize,
        /// Whether a sort specification was applied; `false` means the rows
        /// kept selection order.
        sorted: bool,
    },
    /// Selection and validation left nothing.
    NoMatches,
    /// Selection matched, but every row failed a metadata filter.
    EmptyAfterFilter,
    /// The lookup pattern was not a valid regular expression.
    InvalidPattern { message: String },
}

impl Outcome {
    pub fn is_empty(&self) -> bool {
        !matches!(self, Outcome::Results { .. })
    }
}

/// Runs the whole pipeline for one query.
pub fn run<H>(host: &H, ctx: &Context, opts: &Options, raw_query: &str) -> Outcome
where
    H: Host + ?Sized,
{
    let ids = if opts.fulltext {
        host.search_text(raw_query.trim())
    } else {
        let mut parsed = if opts.full_regex {
            // the whole query is a regex over full paths, untouched
            ParsedQuery::bare(raw_query)
        } else {
            query::parse_namespace_query(raw_query, host, ctx)
        };
        // lazy shorthand: a bare "*" means everything
        if parsed.query == "*" {
            parsed.query = ".*".to_string();
        }
        match select::lookup(
            host,
            &parsed.query,
            opts.full_regex,
            &parsed.include,
            &parsed.exclude,
        ) {
            Ok(ids) => ids,
            Err(err) => {
                warn!(%err, "lookup pattern rejected");
                return Outcome::InvalidPattern {
                    message: err.to_string(),
                };
            }
        }
    };

    let ids = select::validate(host, ctx, ids, opts.hide_start, opts.max_depth);
    if ids.is_empty() {
        return Outcome::NoMatches;
    }
    debug!(matched = ids.len(), "selection complete");

    let projection = project::build(host, ctx, opts, &ids);
    let mut rows = filter::apply(projection.rows, &opts.filter);
    if rows.is_empty() {
        return Outcome::EmptyAfterFilter;
    }

    let sorted = sort::sort_rows(&mut rows, &projection.sort_keys);
    if opts.limit > 0 {
        rows.truncate(opts.limit);
    }
    let count = rows.len();
    debug!(count, sorted, "rows ready for grouping");

    let spec = if opts.group {
        projection.group_keys
    } else {
        Vec::new()
    };
    let rows = group::group_rows(host, ctx, &rows, &LEAF_COLUMNS, &spec);
    Outcome::Results {
        rows,
        count,
        sorted,
    }
}
