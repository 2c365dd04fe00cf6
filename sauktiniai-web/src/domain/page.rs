//! Pagination over the list endpoint.

use serde::Serialize;

/// Number of rows per list page.
pub const PAGE_SIZE: u32 = 100;

/// A zero-based page index into a browse listing.
///
/// Offsets derived from a `Page` are always multiples of the page size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Page(pub u32);

impl Page {
    /// The first page.
    pub const FIRST: Page = Page(0);

    /// Row offset of this page, or `None` if it does not fit in a `u32`.
    pub fn offset(self, page_size: u32) -> Option<u32> {
        self.0.checked_mul(page_size)
    }

    /// The following page.
    pub fn next(self) -> Page {
        Page(self.0.saturating_add(1))
    }

    /// The preceding page, or `None` on the first page.
    pub fn prev(self) -> Option<Page> {
        self.0.checked_sub(1).map(Page)
    }

    /// Whether this is the first page.
    pub fn is_first(self) -> bool {
        self.0 == 0
    }

    /// Whether no rows exist beyond this page.
    pub fn is_last(self, total: u64, page_size: u32) -> bool {
        (u64::from(self.0) + 1) * u64::from(page_size) >= total
    }
}

/// Number of pages needed to show `total` rows.
pub fn page_count(total: u64, page_size: u32) -> u64 {
    total.div_ceil(u64::from(page_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_page_times_size() {
        assert_eq!(Page(0).offset(PAGE_SIZE), Some(0));
        assert_eq!(Page(1).offset(PAGE_SIZE), Some(100));
        assert_eq!(Page(7).offset(PAGE_SIZE), Some(700));
    }

    #[test]
    fn offset_overflow_has_no_offset() {
        assert_eq!(Page(u32::MAX).offset(PAGE_SIZE), None);
        assert_eq!(Page(u32::MAX / PAGE_SIZE + 1).offset(PAGE_SIZE), None);
        assert_eq!(
            Page(u32::MAX / PAGE_SIZE).offset(PAGE_SIZE),
            Some(u32::MAX / PAGE_SIZE * PAGE_SIZE)
        );
    }

    #[test]
    fn prev_on_first_page() {
        assert_eq!(Page::FIRST.prev(), None);
        assert_eq!(Page(3).prev(), Some(Page(2)));
    }

    #[test]
    fn last_page_boundaries() {
        assert!(!Page(0).is_last(250, PAGE_SIZE));
        assert!(!Page(1).is_last(250, PAGE_SIZE));
        assert!(Page(2).is_last(250, PAGE_SIZE));
        assert!(Page(0).is_last(100, PAGE_SIZE));
        assert!(Page(0).is_last(0, PAGE_SIZE));
    }

    #[test]
    fn page_counts() {
        assert_eq!(page_count(0, PAGE_SIZE), 0);
        assert_eq!(page_count(100, PAGE_SIZE), 1);
        assert_eq!(page_count(101, PAGE_SIZE), 2);
        assert_eq!(page_count(250, PAGE_SIZE), 3);
    }
}
