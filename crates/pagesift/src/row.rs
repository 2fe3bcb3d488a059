//! The working row: one record with its derived columns.
//!
//! A [`Row`] has a fixed schema for the columns every pipeline run needs
//! (`id`, `name`, `title`, `abstract`, `display`) plus an open map for the
//! optional columns a caller requests for sorting, filtering or grouping.
//! Columns are addressed by [`ColKey`], a closed enumeration with a
//! `Custom` escape hatch for metadata fields the engine does not know.

use std::collections::BTreeMap;

use crate::id::RecordId;

/// Which raw timestamp a date-grouping column is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateBasis {
    /// The record's creation timestamp (`c*` keys).
    Created,
    /// The record's modification timestamp (`m*` keys).
    Modified,
}

/// The calendar components a date-grouping column displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DateParts {
    pub year: bool,
    pub month: bool,
    pub day: bool,
}

impl DateParts {
    fn from_key(rest: &str) -> Option<Self> {
        let parts = DateParts {
            year: rest.contains("year"),
            month: rest.contains("month"),
            day: rest.contains("day"),
        };
        (parts.year || parts.month || parts.day).then_some(parts)
    }
}

/// A `c*`/`m*` date-grouping column key, e.g. `cyear` or `mmonth-day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey {
    pub basis: DateBasis,
    pub parts: DateParts,
}

/// Addressable column of a [`Row`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColKey {
    Id,
    Name,
    Title,
    Abstract,
    Display,
    /// Truncated lowercase prefix of title-or-name; the payload is the
    /// prefix length (1–3 for `a`/`ab`/`abc`).
    Prefix(u8),
    Ns,
    Creator,
    Contributor,
    Mdate,
    Cdate,
    Links,
    Backlinks,
    DateGroup(DateKey),
    /// Any other metadata field, kept under its user-facing key.
    Custom(String),
}

impl ColKey {
    /// Parses a user-facing column key.
    pub fn parse(key: &str) -> ColKey {
        match key {
            "id" => ColKey::Id,
            "name" => ColKey::Name,
            "title" => ColKey::Title,
            "abstract" => ColKey::Abstract,
            "display" => ColKey::Display,
            "a" => ColKey::Prefix(1),
            "ab" => ColKey::Prefix(2),
            "abc" => ColKey::Prefix(3),
            "ns" => ColKey::Ns,
            "creator" => ColKey::Creator,
            "contributor" => ColKey::Contributor,
            "mdate" => ColKey::Mdate,
            "cdate" => ColKey::Cdate,
            "links" => ColKey::Links,
            "backlinks" => ColKey::Backlinks,
            _ => match Self::parse_date_key(key) {
                Some(date) => ColKey::DateGroup(date),
                None => ColKey::Custom(key.to_string()),
            },
        }
    }

    fn parse_date_key(key: &str) -> Option<DateKey> {
        let basis = match key.chars().next()? {
            'c' => DateBasis::Created,
            'm' => DateBasis::Modified,
            _ => return None,
        };
        let parts = DateParts::from_key(&key[1..])?;
        Some(DateKey { basis, parts })
    }

    /// Whether this column holds a date-derived value.
    pub fn is_date(&self) -> bool {
        matches!(self, ColKey::Mdate | ColKey::Cdate | ColKey::DateGroup(_))
    }
}

/// Owned cell stored in a row's optional-column map.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Stamp(i64),
}

/// Borrowed view of a row cell, returned by [`Row::cell`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    Text(&'a str),
    Stamp(i64),
    Missing,
}

impl<'a> Value<'a> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// The cell rendered as text; timestamps use their decimal form and a
    /// missing cell is empty.
    pub fn to_text(&self) -> String {
        match self {
            Value::Text(s) => (*s).to_string(),
            Value::Stamp(n) => n.to_string(),
            Value::Missing => String::new(),
        }
    }

    /// The cell as a raw timestamp, parsing textual digits if needed.
    pub fn to_stamp(&self) -> i64 {
        match self {
            Value::Stamp(n) => *n,
            Value::Text(s) => s.parse().unwrap_or(0),
            Value::Missing => 0,
        }
    }
}

/// One record with its derived sortable/filterable columns.
///
/// Built once by the projector and treated as read-only afterwards: the
/// filter drops whole rows, the sorter reorders them, and the grouper only
/// reads them.
#[derive(Debug, Clone)]
pub struct Row {
    pub id: RecordId,
    pub name: String,
    pub title: String,
    pub abstract_text: String,
    pub display: String,
    /// Shared raw timestamp for every date-grouping column of this row, so
    /// that sort and group operate on the same instant.
    pub real_date: Option<i64>,
    extras: BTreeMap<ColKey, Cell>,
}

impl Row {
    /// Creates a row for an identifier, pre-filling the name column.
    pub fn new(id: RecordId) -> Self {
        let name = id.name().to_string();
        Row {
            id,
            name,
            title: String::new(),
            abstract_text: String::new(),
            display: String::new(),
            real_date: None,
            extras: BTreeMap::new(),
        }
    }

    /// Stores an optional column.
    pub fn set(&mut self, key: ColKey, cell: Cell) {
        self.extras.insert(key, cell);
    }

    /// Looks up any column, fixed or optional.
    pub fn cell(&self, key: &ColKey) -> Value<'_> {
        match key {
            ColKey::Id => Value::Text(self.id.as_str()),
            ColKey::Name => Value::Text(&self.name),
            ColKey::Title => Value::Text(&self.title),
            ColKey::Abstract => Value::Text(&self.abstract_text),
            ColKey::Display => Value::Text(&self.display),
            _ => match self.extras.get(key) {
                Some(Cell::Text(s)) => Value::Text(s),
                Some(Cell::Stamp(n)) => Value::Stamp(*n),
                None => Value::Missing,
            },
        }
    }

    /// Whether the column exists on this row.
    pub fn has(&self, key: &ColKey) -> bool {
        !self.cell(key).is_missing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fixed_keys() {
        assert_eq!(ColKey::parse("name"), ColKey::Name);
        assert_eq!(ColKey::parse("ns"), ColKey::Ns);
        assert_eq!(ColKey::parse("abc"), ColKey::Prefix(3));
        assert_eq!(ColKey::parse("backlinks"), ColKey::Backlinks);
    }

    #[test]
    fn parses_date_group_keys() {
        let key = ColKey::parse("cyear");
        assert_eq!(
            key,
            ColKey::DateGroup(DateKey {
                basis: DateBasis::Created,
                parts: DateParts {
                    year: true,
                    month: false,
                    day: false
                },
            })
        );

        let key = ColKey::parse("mmonth-day");
        assert_eq!(
            key,
            ColKey::DateGroup(DateKey {
                basis: DateBasis::Modified,
                parts: DateParts {
                    year: false,
                    month: true,
                    day: true
                },
            })
        );
    }

    #[test]
    fn unknown_keys_become_custom() {
        assert_eq!(ColKey::parse("project:status"), ColKey::Custom("project:status".into()));
        // starts with 'c' but has no date component
        assert_eq!(ColKey::parse("category"), ColKey::Custom("category".into()));
    }

    #[test]
    fn cell_resolves_fixed_and_optional_columns() {
        let mut row = Row::new(RecordId::new("wiki:page"));
        row.title = "Page".into();
        row.set(ColKey::Creator, Cell::Text("alice".into()));
        row.set(ColKey::Mdate, Cell::Stamp(1500));

        assert_eq!(row.cell(&ColKey::Name), Value::Text("page"));
        assert_eq!(row.cell(&ColKey::Title), Value::Text("Page"));
        assert_eq!(row.cell(&ColKey::Creator), Value::Text("alice"));
        assert_eq!(row.cell(&ColKey::Mdate), Value::Stamp(1500));
        assert!(row.cell(&ColKey::Links).is_missing());
    }

    #[test]
    fn value_conversions() {
        assert_eq!(Value::Stamp(42).to_text(), "42");
        assert_eq!(Value::Text("42").to_stamp(), 42);
        assert_eq!(Value::Text("n/a").to_stamp(), 0);
        assert_eq!(Value::Missing.to_text(), "");
    }
}
