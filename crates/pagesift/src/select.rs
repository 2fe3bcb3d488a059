//! Record selection: pattern lookup and validation.
//!
//! The lookup scans the host's identifier catalog with a case-insensitive
//! regex over either the record name or the full path, after namespace
//! include/exclude filtering. Validation then applies the caller's
//! structural rules (start pages, depth) and the host's ACL.

use regex::RegexBuilder;

use crate::error::Result;
use crate::host::{AccessControl, Existence, SearchIndex};
use crate::id::RecordId;
use crate::options::Context;

/// Identifier-pattern search over the host catalog.
///
/// In full-path mode the pattern is matched against the entire identifier
/// and the namespace lists are ignored; otherwise excluded namespaces are
/// dropped first, then the catalog is narrowed to included ones, and the
/// pattern only sees record names. Hidden and non-existent records never
/// match. An invalid pattern is an error, distinct from an empty result.
pub fn lookup<H>(
    host: &H,
    pattern: &str,
    full_path: bool,
    include: &[String],
    exclude: &[String],
) -> Result<Vec<RecordId>>
where
    H: SearchIndex + Existence + ?Sized,
{
    let mut ids = host.record_ids();
    if !full_path {
        // order matters: exclusions win over inclusions
        ids = filter_namespaces(ids, exclude, true);
        ids = filter_namespaces(ids, include, false);
    }

    let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
    ids.retain(|id| {
        if !host.exists(id) || host.is_hidden(id) {
            return false;
        }
        let haystack = if full_path { id.as_str() } else { id.name() };
        regex.is_match(haystack)
    });
    Ok(ids)
}

/// Keeps or drops identifiers by namespace prefix. Empty namespace tokens
/// (failed resolutions) match nothing.
fn filter_namespaces(ids: Vec<RecordId>, namespaces: &[String], exclude: bool) -> Vec<RecordId> {
    if namespaces.is_empty() {
        return ids;
    }
    ids.into_iter()
        .filter(|id| {
            let hit = namespaces
                .iter()
                .filter(|ns| !ns.is_empty())
                .any(|ns| id.as_str().starts_with(&format!("{ns}:")));
            hit != exclude
        })
        .collect()
}

/// Post-selection validation: optionally drop start pages and records
/// nested too deeply, then enforce the host ACL.
pub fn validate<H>(
    host: &H,
    ctx: &Context,
    ids: Vec<RecordId>,
    hide_start: bool,
    max_depth: usize,
) -> Vec<RecordId>
where
    H: AccessControl + ?Sized,
{
    ids.into_iter()
        .filter(|id| {
            if hide_start && id.name() == ctx.start_name {
                return false;
            }
            if max_depth > 0 && id.depth() > max_depth {
                return false;
            }
            host.can_read(id)
        })
        .collect()
}
