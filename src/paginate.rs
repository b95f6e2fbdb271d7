//! Fixed-size windows over a table's rows.

use crate::record::{Table, TripRecord};

/// Rows per page.
pub const PAGE_SIZE: usize = 5;

/// Returns up to [`PAGE_SIZE`] records starting at `offset`, and the offset of
/// the following page.
///
/// The next offset always advances by [`PAGE_SIZE`], even for a short or empty
/// page. Offsets past the end yield an empty page.
pub fn next_page(table: &Table, offset: usize) -> (&[TripRecord], usize) {
    let records = table.records();
    let start = offset.min(records.len());
    let end = offset.saturating_add(PAGE_SIZE).min(records.len());
    (&records[start..end], offset.saturating_add(PAGE_SIZE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::test_support::trip;

    fn table_of(n: usize) -> Table {
        Table::new(
            (0..n)
                .map(|i| trip("2017-01-01 09:00:00", i as f64, "A", "B"))
                .collect(),
        )
    }

    #[test]
    fn test_pages_over_seven_rows() {
        let table = table_of(7);

        let (rows, offset) = next_page(&table, 0);
        assert_eq!(rows.len(), 5);
        assert_eq!(offset, 5);

        let (rows, offset) = next_page(&table, offset);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].duration_secs, 5.0);
        assert_eq!(offset, 10);

        let (rows, offset) = next_page(&table, offset);
        assert!(rows.is_empty());
        assert_eq!(offset, 15);
    }

    #[test]
    fn test_page_of_empty_table() {
        let table = Table::default();
        let (rows, offset) = next_page(&table, 0);
        assert!(rows.is_empty());
        assert_eq!(offset, 5);
    }

    #[test]
    fn test_page_at_huge_offset() {
        let table = table_of(3);
        let (rows, offset) = next_page(&table, usize::MAX);
        assert!(rows.is_empty());
        assert_eq!(offset, usize::MAX);
    }
}
