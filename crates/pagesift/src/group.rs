//! Hierarchical grouping of sorted rows.
//!
//! The grouper walks already-sorted rows and inserts heading results
//! whenever a grouping column's value changes from the immediately
//! preceding row. Grouping is run-length: equal but non-adjacent values
//! produce separate headings, which is exactly what pre-sorted adjacency
//! calls for. Levels are independent; each keeps its own last-seen value.

use serde::Serialize;

use crate::dates;
use crate::host::{Existence, MetadataStore};
use crate::id::{RecordId, SEGMENT_SEP};
use crate::options::Context;
use crate::row::{ColKey, Row};

/// How a grouping column turns into headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// One heading per change of value.
    Heading,
    /// One heading per changed namespace path segment.
    Namespace,
}

/// One level of the group specification, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupKey {
    pub key: ColKey,
    pub kind: GroupKind,
    /// Spelled-out date format for heading labels, when date spelling is on
    /// and the column is date-derived.
    pub word_format: Option<String>,
}

/// One entry of the grouped output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultRow {
    /// A record at level 0, carrying the requested columns in caller order.
    Leaf { columns: Vec<String> },
    /// A synthetic group boundary at level >= 1.
    Heading {
        level: usize,
        label: String,
        /// The namespace's start page, when the heading refers to one that
        /// exists.
        target: Option<RecordId>,
        /// Display-title override taken from the target's metadata.
        title: Option<String>,
    },
}

impl ResultRow {
    pub fn is_heading(&self) -> bool {
        matches!(self, ResultRow::Heading { .. })
    }

    /// Heading nesting depth; leaves are level 0.
    pub fn level(&self) -> usize {
        match self {
            ResultRow::Leaf { .. } => 0,
            ResultRow::Heading { level, .. } => *level,
        }
    }
}

/// Walks sorted rows and emits leaves interleaved with group headings.
///
/// With an empty specification every row becomes one leaf, unchanged and
/// in order. Otherwise each row is preceded by the headings of every level
/// whose value changed, outermost first, so parent headings always appear
/// before child headings.
pub fn group_rows<H>(
    host: &H,
    ctx: &Context,
    rows: &[Row],
    columns: &[ColKey],
    spec: &[GroupKey],
) -> Vec<ResultRow>
where
    H: MetadataStore + Existence + ?Sized,
{
    let mut results = Vec::with_capacity(rows.len());
    let mut last_seen: Vec<String> = vec![String::new(); spec.len()];

    for row in rows {
        for (level, group_key) in spec.iter().enumerate() {
            let current = row.cell(&group_key.key).to_text();
            if current == last_seen[level] {
                continue;
            }
            let previous = std::mem::replace(&mut last_seen[level], current.clone());
            match group_key.kind {
                GroupKind::Heading => {
                    results.push(heading(row, group_key, level, current));
                }
                GroupKind::Namespace => {
                    namespace_headings(host, ctx, level, &previous, &current, &mut results);
                }
            }
        }
        let columns = columns
            .iter()
            .map(|key| row.cell(key).to_text())
            .collect();
        results.push(ResultRow::Leaf { columns });
    }
    results
}

fn heading(row: &Row, group_key: &GroupKey, level: usize, value: String) -> ResultRow {
    let label = match (&group_key.word_format, row.real_date) {
        (Some(format), Some(stamp)) => dates::format_stamp(stamp, format),
        _ => value,
    };
    ResultRow::Heading {
        level: level + 1,
        label,
        target: None,
        title: None,
    }
}

/// Emits one heading per namespace segment from the point where the
/// current path diverges from the previous one. Once segments differ, all
/// deeper segments of the current path emit too: their previous context is
/// no longer valid.
fn namespace_headings<H>(
    host: &H,
    ctx: &Context,
    level: usize,
    previous: &str,
    current: &str,
    results: &mut Vec<ResultRow>,
) where
    H: MetadataStore + Existence + ?Sized,
{
    let current_segs: Vec<&str> = split_path(current);
    let previous_segs: Vec<&str> = split_path(previous);

    let diverge = current_segs
        .iter()
        .enumerate()
        .position(|(i, seg)| previous_segs.get(i) != Some(seg))
        .unwrap_or(current_segs.len());

    for (i, segment) in current_segs.iter().enumerate().skip(diverge) {
        let path = current_segs[..=i].join(&SEGMENT_SEP.to_string());
        let start_id = RecordId::new(format!("{path}{SEGMENT_SEP}{}", ctx.start_name));
        let (target, title) = if host.exists(&start_id) {
            let title = host.metadata(&start_id).title;
            (Some(start_id), title)
        } else {
            (None, None)
        };
        results.push(ResultRow::Heading {
            level: level + i + 1,
            label: (*segment).to_string(),
            target,
            title,
        });
    }
}

fn split_path(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split(SEGMENT_SEP).collect()
    }
}
