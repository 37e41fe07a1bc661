pub mod types;

pub use types::{ExpenseFilter, FuelFilter, MileageFilter, OrderFilter};

use serde::Serialize;

/// Paging portion of a list filter. Every list filter implements this
/// explicitly; page 0 means "unset" and limit 0 means "return all rows".
pub trait Paginated {
    fn page(&self) -> i32;
    fn limit(&self) -> i32;

    /// Requested page with the defaulting rule applied; never below 1.
    fn effective_page(&self) -> i32 {
        effective_page(self.page())
    }

    fn offset(&self) -> i64 {
        let page = self.effective_page();

        if page <= 1 || self.limit() <= 0 {
            0
        } else {
            self.limit() as i64 * (page as i64 - 1)
        }
    }
}

pub fn effective_page(page: i32) -> i32 {
    if page > 0 {
        page
    } else {
        1
    }
}

/// Number of the last page for a result set of `total` rows. The -0.5
/// correction keeps a total that is an exact multiple of the limit from
/// spilling an empty trailing page; an empty set still has one page.
pub fn last_page(filter: &impl Paginated, total: i64) -> i32 {
    let mut last = 1;
    if filter.limit() > 0 {
        last += ((total as f32 - 0.5) / filter.limit() as f32) as i32;
    }

    last
}

pub fn is_out_of_range(page: i32, last: i32) -> bool {
    page < 1 || page > last
}

/// List handlers reject the whole request when this holds, rather than
/// returning an empty page.
pub fn page_out_of_range(filter: &impl Paginated, total: i64) -> bool {
    is_out_of_range(filter.effective_page(), last_page(filter, total))
}

/// Paging metadata echoed with every list response.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PaginationMeta {
    pub current: i32,
    pub last: i32,
}

impl PaginationMeta {
    pub fn new(filter: &impl Paginated, total: i64) -> Self {
        Self {
            current: filter.effective_page(),
            last: last_page(filter, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pager {
        page: i32,
        limit: i32,
    }

    impl Paginated for Pager {
        fn page(&self) -> i32 {
            self.page
        }

        fn limit(&self) -> i32 {
            self.limit
        }
    }

    #[test]
    fn last_page_with_limit_three() {
        let cases = [(1, 1), (2, 1), (3, 1), (4, 2), (5, 2), (6, 2), (7, 3)];

        for (total, want) in cases {
            let f = Pager { page: 1, limit: 3 };
            assert_eq!(last_page(&f, total), want, "total={total}");
        }
    }

    #[test]
    fn unbounded_limit_means_single_page_and_zero_offset() {
        for total in [0, 1, 10, 1000] {
            let f = Pager { page: 5, limit: 0 };
            assert_eq!(last_page(&f, total), 1);
            assert_eq!(f.offset(), 0);
        }
    }

    #[test]
    fn exact_multiple_does_not_spill_an_extra_page() {
        let f = Pager { page: 1, limit: 5 };
        assert_eq!(last_page(&f, 10), 2);
        assert_eq!(last_page(&f, 15), 3);
    }

    #[test]
    fn non_positive_page_is_treated_as_first() {
        assert_eq!(effective_page(0), 1);
        assert_eq!(effective_page(-3), 1);
        assert_eq!(effective_page(2), 2);

        let f = Pager { page: 0, limit: 10 };
        assert_eq!(f.effective_page(), 1);
        assert_eq!(f.offset(), 0);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let f = Pager { page: 4, limit: 25 };
        assert_eq!(f.offset(), 75);

        let f = Pager { page: 1, limit: 25 };
        assert_eq!(f.offset(), 0);
    }

    #[test]
    fn first_page_of_an_empty_set_is_in_range() {
        let f = Pager { page: 0, limit: 10 };
        assert!(!page_out_of_range(&f, 0));

        let f = Pager { page: 1, limit: 0 };
        assert!(!page_out_of_range(&f, 0));
    }

    #[test]
    fn pages_beyond_the_last_are_out_of_range() {
        // limit=3, total=7 -> three pages
        for page in 1..=3 {
            let f = Pager { page, limit: 3 };
            assert!(!page_out_of_range(&f, 7), "page={page}");
        }

        let f = Pager { page: 4, limit: 3 };
        assert!(page_out_of_range(&f, 7));
    }

    #[test]
    fn meta_reports_effective_values() {
        let meta = PaginationMeta::new(&Pager { page: 0, limit: 0 }, 42);
        assert_eq!(meta.current, 1);
        assert_eq!(meta.last, 1);

        let meta = PaginationMeta::new(&Pager { page: 2, limit: 3 }, 7);
        assert_eq!(meta.current, 2);
        assert_eq!(meta.last, 3);
    }
}
