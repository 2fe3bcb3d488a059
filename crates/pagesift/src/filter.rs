//! Metadata filtering of projected rows.
//!
//! Each filter entry names a column and an expression. Keys prefixed with
//! `^` or `!` exclude matches instead of including them. Columns whose key
//! contains `date` take a `start->end` range expression; everything else is
//! a case-respecting regex over the column's text. Entries compose as AND:
//! each one narrows the surviving row set, in order.

use regex::Regex;

use crate::dates;
use crate::row::{ColKey, Row};

/// One compiled filter entry.
#[derive(Debug, Clone)]
enum Predicate {
    DateRange {
        begin: Option<i64>,
        end: Option<i64>,
    },
    Pattern(Option<Regex>),
}

impl Predicate {
    fn matches(&self, row: &Row, key: &ColKey) -> bool {
        let value = row.cell(key);
        match self {
            Predicate::DateRange { begin, end } => dates::in_range(value.to_stamp(), *begin, *end),
            // an uncompilable pattern matches nothing
            Predicate::Pattern(Some(regex)) => regex.is_match(&value.to_text()),
            Predicate::Pattern(None) => false,
        }
    }
}

/// Applies the filter specification, preserving the order of survivors.
///
/// A row is dropped by an entry when its column is absent, or when the
/// predicate result (after exclude polarity) is false. An empty
/// specification returns the rows unchanged.
pub fn apply(mut rows: Vec<Row>, filters: &[(String, String)]) -> Vec<Row> {
    for (raw_key, expr) in filters {
        let (key_name, exclude) = split_polarity(raw_key);
        let key = ColKey::parse(key_name);
        let predicate = if key_name.contains("date") {
            let (begin, end) = dates::parse_range(expr);
            Predicate::DateRange { begin, end }
        } else {
            Predicate::Pattern(Regex::new(expr).ok())
        };

        rows.retain(|row| {
            if !row.has(&key) {
                return false;
            }
            predicate.matches(row, &key) != exclude
        });
    }
    rows
}

/// Strips the exclude marker off a filter key.
pub fn split_polarity(raw_key: &str) -> (&str, bool) {
    match raw_key.strip_prefix(['^', '!']) {
        Some(rest) => (rest, true),
        None => (raw_key, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::RecordId;
    use crate::row::Cell;

    fn creator_row(name: &str, creator: &str) -> Row {
        let mut row = Row::new(RecordId::new(name));
        row.set(ColKey::Creator, Cell::Text(creator.into()));
        row
    }

    fn dated_row(name: &str, mdate: i64) -> Row {
        let mut row = Row::new(RecordId::new(name));
        row.set(ColKey::Mdate, Cell::Stamp(mdate));
        row
    }

    fn spec(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_specification_is_identity() {
        let rows = vec![creator_row("a", "alice"), creator_row("b", "bob")];
        let names: Vec<String> = rows.iter().map(|r| r.name.clone()).collect();
        let kept = apply(rows, &[]);
        let kept_names: Vec<String> = kept.iter().map(|r| r.name.clone()).collect();
        assert_eq!(kept_names, names);
    }

    #[test]
    fn regex_filter_is_case_respecting() {
        let rows = vec![creator_row("a", "Alice"), creator_row("b", "alice")];
        let kept = apply(rows, &spec(&[("creator", "^alice")]));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "b");
    }

    #[test]
    fn exclude_polarity_inverts_the_match() {
        let rows = vec![creator_row("a", "alice"), creator_row("b", "bob")];
        let kept = apply(rows, &spec(&[("^creator", "alice")]));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "b");

        let rows = vec![creator_row("a", "alice"), creator_row("b", "bob")];
        let kept = apply(rows, &spec(&[("!creator", "alice")]));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn missing_column_drops_the_row_regardless_of_polarity() {
        let rows = vec![creator_row("a", "alice"), Row::new(RecordId::new("bare"))];
        let kept = apply(rows, &spec(&[("^creator", "nobody")]));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "a");
    }

    #[test]
    fn date_range_filter_uses_the_raw_timestamp() {
        let jun_2020 = 1_592_179_200;
        let rows = vec![
            dated_row("inside", jun_2020),
            dated_row("before", 1_262_304_000),  // 2010
            dated_row("after", 1_750_000_000),   // 2025
        ];
        let kept = apply(rows, &spec(&[("mdate", "2020-01-01->2020-12-31")]));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "inside");
    }

    #[test]
    fn unbounded_range_matches_everything_up_to_the_bound() {
        let rows = vec![dated_row("old", 1000), dated_row("new", 2_000_000_000)];
        let kept = apply(rows, &spec(&[("mdate", "->2020-12-31")]));
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "old");
    }

    #[test]
    fn entries_compose_as_and() {
        let mut row_a = creator_row("a", "alice");
        row_a.set(ColKey::Mdate, Cell::Stamp(1_592_179_200));
        let mut row_b = creator_row("b", "alice");
        row_b.set(ColKey::Mdate, Cell::Stamp(1000));

        let kept = apply(
            vec![row_a, row_b],
            &spec(&[("creator", "alice"), ("mdate", "2020-01-01->")]),
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name, "a");
    }

    #[test]
    fn invalid_pattern_matches_nothing() {
        let rows = vec![creator_row("a", "alice")];
        let kept = apply(rows, &spec(&[("creator", "(unclosed")]));
        assert!(kept.is_empty());

        // under exclude polarity that keeps everything with the column
        let rows = vec![creator_row("a", "alice")];
        let kept = apply(rows, &spec(&[("^creator", "(unclosed")]));
        assert_eq!(kept.len(), 1);
    }
}
