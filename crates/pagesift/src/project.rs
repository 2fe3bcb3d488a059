//! Record projection: turns matched identifiers into rows and derives the
//! sort and group tables.
//!
//! Metadata fetches are the expensive part of a run, so the projector
//! touches the store once per record, fetches abstracts only when a
//! requested column needs them, and resolves backlinks for the whole batch
//! with a single bulk lookup.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::dates;
use crate::filter::split_polarity;
use crate::group::{GroupKey, GroupKind};
use crate::host::MetadataStore;
use crate::id::RecordId;
use crate::meta::Metadata;
use crate::options::{Context, Options};
use crate::row::{Cell, ColKey, DateBasis, Row};
use crate::sort::{Collation, Dir, SortKey};

/// Everything the projector hands to the rest of the pipeline.
#[derive(Debug)]
pub struct Projection {
    /// One row per input identifier, in input order.
    pub rows: Vec<Row>,
    /// Sort specification derived from the caller's sort options.
    pub sort_keys: Vec<SortKey>,
    /// Group specification in sort-key order, non-groupable keys skipped.
    pub group_keys: Vec<GroupKey>,
}

/// Builds one row per identifier plus the sort/group tables.
pub fn build<H>(host: &H, ctx: &Context, opts: &Options, ids: &[RecordId]) -> Projection
where
    H: MetadataStore + ?Sized,
{
    let columns = requested_columns(opts);
    let from_title = title_requested(opts);
    let want_abstract = opts.snippet.wants_abstract();

    // formats are per distinct key, never per row
    let date_formats = date_format_table(&columns, opts.spell_date);
    let date_basis = pick_date_basis(&columns);

    // one bulk lookup for the whole batch
    let backlinks = columns
        .contains(&ColKey::Backlinks)
        .then(|| host.backlinks(ids));

    let mut rows = Vec::with_capacity(ids.len());
    for (index, id) in ids.iter().enumerate() {
        let meta = host.metadata(id);
        let created = meta.created.unwrap_or(0);
        let modified = meta.modified.unwrap_or(created);

        let mut row = Row::new(id.clone());
        row.title = meta
            .title
            .clone()
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| row.name.clone());
        if want_abstract {
            row.abstract_text = meta.abstract_text.clone();
        }
        row.real_date = date_basis.map(|basis| match basis {
            DateBasis::Created => created,
            DateBasis::Modified => modified,
        });

        for key in &columns {
            let cell = match key {
                // fixed-schema columns already exist
                ColKey::Id | ColKey::Name | ColKey::Title | ColKey::Abstract | ColKey::Display => {
                    continue
                }
                ColKey::Prefix(len) => {
                    let source = if from_title { &row.title } else { &row.name };
                    Cell::Text(lower_prefix(source, *len as usize))
                }
                ColKey::Ns => Cell::Text(match id.namespace() {
                    Some(ns) => ns.to_string(),
                    None => format!("[{}]", ctx.start_name),
                }),
                ColKey::Creator => Cell::Text(meta.creator.clone()),
                ColKey::Contributor => Cell::Text(meta.contributors.join(" ")),
                ColKey::Mdate => Cell::Stamp(modified),
                ColKey::Cdate => Cell::Stamp(created),
                ColKey::Links => Cell::Text(join_flagged(&meta.references)),
                ColKey::Backlinks => Cell::Text(
                    backlinks
                        .as_ref()
                        .and_then(|all| all.get(index))
                        .map(|targets| targets.join(" "))
                        .unwrap_or_default(),
                ),
                ColKey::DateGroup(_) => {
                    let (group_format, _) = &date_formats[key];
                    let stamp = row.real_date.unwrap_or(0);
                    Cell::Text(dates::format_stamp(stamp, group_format))
                }
                ColKey::Custom(name) => Cell::Text(meta.field(name).unwrap_or_default()),
            };
            row.set(key.clone(), cell);
        }

        row.display = render_display(&row, &meta, created, modified, opts);
        rows.push(row);
    }

    let (sort_keys, group_keys) = sort_table(opts, &date_formats);
    Projection {
        rows,
        sort_keys,
        group_keys,
    }
}

/// Sort columns first, then filter-only columns, deduplicated, in caller
/// order.
fn requested_columns(opts: &Options) -> Vec<ColKey> {
    let mut keys: Vec<ColKey> = Vec::new();
    let sort_keys = opts.sort.iter().map(|(key, _)| key.as_str());
    let filter_keys = opts.filter.iter().map(|(key, _)| split_polarity(key).0);
    for name in sort_keys.chain(filter_keys) {
        let key = ColKey::parse(name);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}

fn title_requested(opts: &Options) -> bool {
    requested_columns(opts).contains(&ColKey::Title)
}

type DateFormats = BTreeMap<ColKey, (String, Option<String>)>;

fn date_format_table(columns: &[ColKey], spell_date: bool) -> DateFormats {
    let mut formats = DateFormats::new();
    for key in columns {
        if let ColKey::DateGroup(date_key) = key {
            let group_format = dates::group_format(&date_key.parts);
            let word_format = spell_date
                .then(|| dates::word_format(&group_format))
                .flatten()
                .map(str::to_string);
            formats.insert(key.clone(), (group_format, word_format));
        }
    }
    formats
}

/// The shared per-row instant follows created-based columns when any are
/// requested, modified-based ones otherwise.
fn pick_date_basis(columns: &[ColKey]) -> Option<DateBasis> {
    let mut basis = None;
    for key in columns {
        if let ColKey::DateGroup(date_key) = key {
            match date_key.basis {
                DateBasis::Created => return Some(DateBasis::Created),
                DateBasis::Modified => basis = Some(DateBasis::Modified),
            }
        }
    }
    basis
}

fn lower_prefix(text: &str, count: usize) -> String {
    text.to_lowercase().chars().take(count).collect()
}

fn join_flagged(references: &BTreeMap<String, bool>) -> String {
    references
        .iter()
        .filter(|(_, resolves)| **resolves)
        .map(|(target, _)| target.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolves the display template against row columns and metadata.
fn render_display(row: &Row, meta: &Metadata, created: i64, modified: i64, opts: &Options) -> String {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    let placeholder = PLACEHOLDER.get_or_init(|| Regex::new(r"\{(.+?)\}").expect("literal regex"));

    let template = opts.display.as_str();
    if placeholder.is_match(template) {
        return placeholder
            .replace_all(template, |caps: &regex::Captures<'_>| {
                let key = &caps[1];
                match placeholder_value(row, meta, key, created, modified) {
                    Some(value) => {
                        if key.contains("date") && !value.is_empty() {
                            // raw timestamps render with the display format
                            match value.parse::<i64>() {
                                Ok(stamp) => dates::format_stamp(stamp, &opts.date_format),
                                Err(_) => value,
                            }
                        } else {
                            value
                        }
                    }
                    // unresolved placeholders stay visible
                    None => caps[0].to_string(),
                }
            })
            .into_owned();
    }

    // a bare template names a column to copy; unknown columns fall back to
    // the record name
    let cell = row.cell(&ColKey::parse(template));
    if cell.is_missing() {
        row.name.clone()
    } else {
        cell.to_text()
    }
}

fn placeholder_value(
    row: &Row,
    meta: &Metadata,
    key: &str,
    created: i64,
    modified: i64,
) -> Option<String> {
    let cell = row.cell(&ColKey::parse(key));
    if !cell.is_missing() {
        return Some(cell.to_text());
    }
    if let Some(value) = meta.field(key) {
        return Some(value);
    }
    match key {
        "mdate" => Some(modified.to_string()),
        "cdate" => Some(created.to_string()),
        _ => None,
    }
}

/// Derives the sort table and, from the same pass, the group table.
///
/// Direction defaults differ by column family: identifier/text-like
/// columns ascend, dates and everything else descend. Identifiers, titles
/// and exact dates never group; `ns` groups as a namespace; everything
/// else groups as a heading.
fn sort_table(opts: &Options, date_formats: &DateFormats) -> (Vec<SortKey>, Vec<GroupKey>) {
    let mut sort_keys = Vec::new();
    let mut group_keys = Vec::new();
    for (key_name, dir_expr) in &opts.sort {
        let key = ColKey::parse(key_name);
        let dir = direction_for(&key, dir_expr);
        let collation = collation_for(&key, opts.case_sort, opts.nat_sort);
        if let Some(kind) = group_kind_for(&key) {
            let word_format = match kind {
                GroupKind::Heading => date_formats
                    .get(&key)
                    .and_then(|(_, word)| word.clone()),
                GroupKind::Namespace => None,
            };
            group_keys.push(GroupKey {
                key: key.clone(),
                kind,
                word_format,
            });
        }
        sort_keys.push(SortKey::new(key, collation, dir));
    }
    (sort_keys, group_keys)
}

fn direction_for(key: &ColKey, expr: &str) -> Dir {
    match expr {
        "a" | "asc" => Dir::Asc,
        "d" | "desc" => Dir::Desc,
        _ => match key {
            ColKey::Prefix(_)
            | ColKey::Name
            | ColKey::Title
            | ColKey::Id
            | ColKey::Ns
            | ColKey::Creator
            | ColKey::Contributor => Dir::Asc,
            _ => Dir::Desc,
        },
    }
}

fn collation_for(key: &ColKey, case_sort: bool, nat_sort: bool) -> Collation {
    match key {
        ColKey::Mdate | ColKey::Cdate => Collation::Numeric,
        _ => match (case_sort, nat_sort) {
            (true, true) => Collation::Natural,
            (true, false) => Collation::Text,
            (false, true) => Collation::NaturalFold,
            (false, false) => Collation::TextFold,
        },
    }
}

fn group_kind_for(key: &ColKey) -> Option<GroupKind> {
    match key {
        // no duplicates to group: identifiers, titles, exact dates
        ColKey::Mdate | ColKey::Cdate | ColKey::Name | ColKey::Title | ColKey::Id => None,
        ColKey::Ns => Some(GroupKind::Namespace),
        _ => Some(GroupKind::Heading),
    }
}
