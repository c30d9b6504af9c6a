//! Forward paging over raw dataset rows.

use crate::loader::{Dataset, Row};

pub const PAGE_SIZE: usize = 5;

/// Hands out consecutive pages of [`PAGE_SIZE`] rows. Past the end every page is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawPager {
    offset: usize,
}

impl RawPager {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn next_page<'a>(&mut self, dataset: &'a Dataset) -> &'a [Row] {
        let rows = dataset.rows();
        let start = self.offset.min(rows.len());
        let end = self.offset.saturating_add(PAGE_SIZE).min(rows.len());
        self.offset = self.offset.saturating_add(PAGE_SIZE);
        &rows[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{Schema, Trip};
    use chrono::NaiveDate;

    fn dataset(n: usize) -> Dataset {
        let start = NaiveDate::from_ymd_opt(2017, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let trips = (0..n).map(|i| Trip {
            start_time: start,
            end_time: start,
            duration: i as f64,
            start_station: "A".to_string(),
            end_station: "B".to_string(),
            user_type: "Subscriber".to_string(),
            gender: None,
            birth_year: None,
        });
        Dataset::new(Schema::default(), trips)
    }

    #[test]
    fn test_pages_cover_all_rows() {
        for n in [0, 1, 4, 5, 6, 12] {
            let ds = dataset(n);
            let mut pager = RawPager::default();
            let mut seen = Vec::new();
            let mut non_empty = 0;
            for _ in 0..10 {
                let page = pager.next_page(&ds);
                assert!(page.len() <= PAGE_SIZE);
                if !page.is_empty() {
                    non_empty += 1;
                }
                seen.extend(page.iter().map(Row::index));
            }
            assert_eq!(non_empty, n.div_ceil(PAGE_SIZE), "rows = {n}");
            assert_eq!(seen, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_past_the_end_stays_empty() {
        let ds = dataset(3);
        let mut pager = RawPager::default();
        assert_eq!(pager.next_page(&ds).len(), 3);
        assert!(pager.next_page(&ds).is_empty());
        assert!(pager.next_page(&ds).is_empty());
        assert_eq!(pager.offset(), 15);
    }
}
