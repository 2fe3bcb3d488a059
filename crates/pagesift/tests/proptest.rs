//! Property-based tests for pagesift using proptest.

use std::cmp::Ordering;

use proptest::prelude::*;

use pagesift::{
    filter_rows, natural_cmp, sort_rows, Cell, ColKey, Collation, Dir, RecordId, Row, SortKey,
};

// ============================================================================
// Test helpers
// ============================================================================

fn creator_row(index: usize, creator: &str, mdate: i64) -> Row {
    let mut row = Row::new(RecordId::new(format!("ns:p{index}")));
    row.set(ColKey::Creator, Cell::Text(creator.to_string()));
    row.set(ColKey::Mdate, Cell::Stamp(mdate));
    row
}

// Strategy for (creator, mdate) pairs with plenty of collisions
fn row_data_strategy() -> impl Strategy<Value = (String, i64)> {
    ("[a-d]{1,3}".prop_map(String::from), 0i64..5)
}

fn build_rows(data: &[(String, i64)]) -> Vec<Row> {
    data.iter()
        .enumerate()
        .map(|(i, (creator, mdate))| creator_row(i, creator, *mdate))
        .collect()
}

fn positions(rows: &[Row]) -> Vec<usize> {
    rows.iter()
        .map(|row| row.name[1..].parse().unwrap())
        .collect()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Sorting must never add, drop or duplicate rows.
    #[test]
    fn sort_permutes_the_input(
        data in prop::collection::vec(row_data_strategy(), 0..60),
    ) {
        let mut rows = build_rows(&data);
        let keys = [SortKey::new(ColKey::Creator, Collation::TextFold, Dir::Asc)];
        sort_rows(&mut rows, &keys);

        let mut seen = positions(&rows);
        seen.sort_unstable();
        let expected: Vec<usize> = (0..data.len()).collect();
        prop_assert_eq!(seen, expected);
    }

    /// Rows whose full key tuple ties must keep their original order.
    #[test]
    fn sort_is_stable_for_equal_tuples(
        data in prop::collection::vec(row_data_strategy(), 0..60),
    ) {
        let mut rows = build_rows(&data);
        let keys = [
            SortKey::new(ColKey::Mdate, Collation::Numeric, Dir::Asc),
            SortKey::new(ColKey::Creator, Collation::Text, Dir::Asc),
        ];
        sort_rows(&mut rows, &keys);

        for pair in rows.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let same_tuple = a.cell(&ColKey::Mdate).to_stamp() == b.cell(&ColKey::Mdate).to_stamp()
                && a.cell(&ColKey::Creator).to_text() == b.cell(&ColKey::Creator).to_text();
            if same_tuple {
                let pos_a: usize = a.name[1..].parse().unwrap();
                let pos_b: usize = b.name[1..].parse().unwrap();
                prop_assert!(pos_a < pos_b, "stable sort violated: equal rows reordered");
            }
        }
    }

    /// Reversing the direction of a single-key sort reverses equal-free
    /// orderings and never changes the row set.
    #[test]
    fn desc_is_the_reverse_collation_of_asc(
        data in prop::collection::vec(row_data_strategy(), 2..40),
    ) {
        let mut asc = build_rows(&data);
        let mut desc = build_rows(&data);
        sort_rows(&mut asc, &[SortKey::new(ColKey::Mdate, Collation::Numeric, Dir::Asc)]);
        sort_rows(&mut desc, &[SortKey::new(ColKey::Mdate, Collation::Numeric, Dir::Desc)]);

        let ascending: Vec<i64> = asc.iter().map(|r| r.cell(&ColKey::Mdate).to_stamp()).collect();
        let mut reversed: Vec<i64> = desc.iter().map(|r| r.cell(&ColKey::Mdate).to_stamp()).collect();
        reversed.reverse();
        prop_assert_eq!(ascending, reversed);
    }

    /// A filter can only shrink the row set, and survivors keep their order.
    #[test]
    fn filter_never_grows_the_set(
        data in prop::collection::vec(row_data_strategy(), 0..60),
        pattern in "[a-d]{1,2}",
    ) {
        let rows = build_rows(&data);
        let before = positions(&rows);
        let spec = vec![("creator".to_string(), pattern)];
        let kept = filter_rows(rows, &spec);

        prop_assert!(kept.len() <= before.len());
        let after = positions(&kept);
        let mut iter = before.iter();
        for pos in &after {
            prop_assert!(iter.any(|p| p == pos), "filter reordered survivors");
        }
    }

    /// An empty filter specification is the identity.
    #[test]
    fn empty_filter_is_identity(
        data in prop::collection::vec(row_data_strategy(), 0..60),
    ) {
        let rows = build_rows(&data);
        let before = positions(&rows);
        let kept = filter_rows(rows, &[]);
        prop_assert_eq!(positions(&kept), before);
    }

    /// Opposite polarities of the same filter partition the row set.
    #[test]
    fn polarity_partitions_the_set(
        data in prop::collection::vec(row_data_strategy(), 0..60),
        pattern in "[a-d]",
    ) {
        let total = data.len();
        let keep = vec![("creator".to_string(), pattern.clone())];
        let drop = vec![("^creator".to_string(), pattern)];

        let kept = filter_rows(build_rows(&data), &keep);
        let dropped = filter_rows(build_rows(&data), &drop);
        prop_assert_eq!(kept.len() + dropped.len(), total);
    }

    /// Natural comparison is a total order consistent with equality of the
    /// normalized digit runs.
    #[test]
    fn natural_cmp_is_antisymmetric(a in "[a-z0-9]{0,8}", b in "[a-z0-9]{0,8}") {
        let forward = natural_cmp(&a, &b);
        let backward = natural_cmp(&b, &a);
        prop_assert_eq!(forward, backward.reverse());
        if a == b {
            prop_assert_eq!(forward, Ordering::Equal);
        }
    }

    /// Numeric runs compare by magnitude whatever their padding.
    #[test]
    fn natural_cmp_orders_numbers_by_value(x in 0u32..10_000, y in 0u32..10_000) {
        let a = format!("page{x:06}");
        let b = format!("page{y}");
        prop_assert_eq!(natural_cmp(&a, &b), x.cmp(&y));
    }
}

// ============================================================================
// Additional edge case tests
// ============================================================================

#[test]
fn empty_sort_specification_reports_unsorted() {
    let mut rows = vec![creator_row(0, "b", 2), creator_row(1, "a", 1)];
    assert!(!sort_rows(&mut rows, &[]));
    assert_eq!(positions(&rows), vec![0, 1]);
}

#[test]
fn filter_on_missing_column_empties_the_set() {
    let rows = vec![creator_row(0, "a", 1)];
    let spec = vec![("contributor".to_string(), ".*".to_string())];
    assert!(filter_rows(rows, &spec).is_empty());
}
