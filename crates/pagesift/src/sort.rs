//! Multi-key stable sorting of rows.
//!
//! A sort specification is an ordered list of [`SortKey`]s. The composite
//! comparator evaluates keys left to right and returns the first nonzero
//! per-key comparison, scaled by the key's direction; rows whose full key
//! tuple ties keep their original relative order (the underlying sort is
//! stable).

use std::cmp::Ordering;

use crate::row::{ColKey, Row, Value};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering: `Asc` keeps it, `Desc`
    /// reverses it.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison semantics for one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collation {
    /// Both sides cast to integers.
    Numeric,
    /// Byte/codepoint ordering, case-sensitive.
    Text,
    /// Case folded before comparing.
    TextFold,
    /// Embedded digit runs compare by value, case-sensitive.
    Natural,
    /// Natural with case folding.
    NaturalFold,
}

/// One entry of a sort specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub key: ColKey,
    pub collation: Collation,
    pub dir: Dir,
}

impl SortKey {
    pub fn new(key: ColKey, collation: Collation, dir: Dir) -> Self {
        SortKey {
            key,
            collation,
            dir,
        }
    }
}

/// Compares two rows over the full sort specification.
pub fn compare_rows(left: &Row, right: &Row, keys: &[SortKey]) -> Ordering {
    for sort_key in keys {
        let a = left.cell(&sort_key.key);
        let b = right.cell(&sort_key.key);
        let ordering = compare_cells(&a, &b, sort_key.collation);
        if ordering != Ordering::Equal {
            return sort_key.dir.apply(ordering);
        }
    }
    Ordering::Equal
}

fn compare_cells(a: &Value<'_>, b: &Value<'_>, collation: Collation) -> Ordering {
    match collation {
        Collation::Numeric => a.to_stamp().cmp(&b.to_stamp()),
        Collation::Text => a.to_text().cmp(&b.to_text()),
        Collation::TextFold => a.to_text().to_lowercase().cmp(&b.to_text().to_lowercase()),
        Collation::Natural => natural_cmp(&a.to_text(), &b.to_text()),
        Collation::NaturalFold => {
            natural_cmp(&a.to_text().to_lowercase(), &b.to_text().to_lowercase())
        }
    }
}

/// Sorts rows in place by the specification.
///
/// Returns `false` (and leaves the rows untouched) when the specification
/// is empty; callers treat that as "unsorted output", not as a failure of
/// the pipeline.
pub fn sort_rows(rows: &mut [Row], keys: &[SortKey]) -> bool {
    if keys.is_empty() {
        return false;
    }
    rows.sort_by(|a, b| compare_rows(a, b, keys));
    true
}

/// Natural string comparison: digit runs compare as numbers, everything
/// else by codepoint. `page2` sorts before `page10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (mut i, mut j) = (0, 0);

    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            let run_a = digit_run(&a, &mut i);
            let run_b = digit_run(&b, &mut j);
            // shorter run of significant digits is the smaller number
            let ordering = run_a
                .len()
                .cmp(&run_b.len())
                .then_with(|| run_a.cmp(run_b));
            if ordering != Ordering::Equal {
                return ordering;
            }
        } else {
            let ordering = a[i].cmp(&b[j]);
            if ordering != Ordering::Equal {
                return ordering;
            }
            i += 1;
            j += 1;
        }
    }
    (a.len() - i).cmp(&(b.len() - j))
}

/// Consumes a digit run starting at `pos` and returns it without leading
/// zeros.
fn digit_run<'a>(chars: &'a [char], pos: &mut usize) -> &'a [char] {
    let start = *pos;
    while *pos < chars.len() && chars[*pos].is_ascii_digit() {
        *pos += 1;
    }
    let run = &chars[start..*pos];
    let significant = run.iter().position(|c| *c != '0').unwrap_or(run.len());
    &run[significant..]
}
