/// Fixed-size page arithmetic shared by every listing surface.
///
/// Every feed and listing in the service pages with the same contract:
/// pages are 1-based and hold at most [`PAGE_SIZE`] items; a missing or
/// unparsable page number falls back to page 1; a page number past the end
/// is clamped to the last page instead of failing. The last page holds the
/// remainder (11 of 13 items puts 3 items on page 2).
use serde::{Deserialize, Serialize};

/// Items per page, fixed across all views.
pub const PAGE_SIZE: i64 = 10;

/// Query-string carrier for the page number.
///
/// The raw value stays a string so that `?page=abc` degrades to page 1
/// rather than failing extraction.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

impl PageQuery {
    pub fn requested(&self) -> u32 {
        sanitize(self.page.as_deref())
    }
}

/// Parse a raw page parameter; absent, unparsable, or < 1 becomes page 1.
pub fn sanitize(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

/// A resolved page: which page to fetch and the LIMIT/OFFSET to fetch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub number: u32,
    pub total_pages: u32,
    pub limit: i64,
    pub offset: i64,
}

/// Resolve a raw page parameter against a total item count.
///
/// Clamps to the last available page; never errors on out-of-range input.
pub fn resolve(raw: Option<&str>, total_items: i64) -> PageSpec {
    let requested = sanitize(raw);
    let total_pages = total_pages(total_items);
    let number = requested.min(total_pages);

    PageSpec {
        number,
        total_pages,
        limit: PAGE_SIZE,
        offset: (number as i64 - 1) * PAGE_SIZE,
    }
}

/// Number of pages needed for `total_items`; an empty set still has one
/// (empty) page, matching the clamped-not-failed contract.
pub fn total_pages(total_items: i64) -> u32 {
    if total_items <= 0 {
        1
    } else {
        ((total_items + PAGE_SIZE - 1) / PAGE_SIZE) as u32
    }
}

/// One page of items plus the metadata a listing surface renders.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u32,
    pub total_pages: u32,
    pub total_items: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, spec: PageSpec, total_items: i64) -> Self {
        Self {
            items,
            number: spec.number,
            total_pages: spec.total_pages,
            total_items,
            has_next: spec.number < spec.total_pages,
            has_previous: spec.number > 1,
        }
    }

    /// Re-shape the items while keeping the page metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            total_pages: self.total_pages,
            total_items: self.total_items,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thirteen_items_paginate_as_ten_plus_three() {
        let first = resolve(Some("1"), 13);
        assert_eq!(first.number, 1);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.limit, 10);
        assert_eq!(first.offset, 0);

        let second = resolve(Some("2"), 13);
        assert_eq!(second.number, 2);
        assert_eq!(second.offset, 10);

        // The slice the second page's LIMIT/OFFSET selects holds the remainder.
        let items: Vec<i64> = (0..13).collect();
        let window: Vec<i64> = items
            .iter()
            .skip(second.offset as usize)
            .take(second.limit as usize)
            .copied()
            .collect();
        assert_eq!(window.len(), 3);
    }

    #[test]
    fn out_of_range_pages_clamp_to_the_last_page() {
        let spec = resolve(Some("99"), 13);
        assert_eq!(spec.number, 2);
        assert_eq!(spec.offset, 10);
    }

    #[test]
    fn missing_or_invalid_pages_default_to_one() {
        assert_eq!(sanitize(None), 1);
        assert_eq!(sanitize(Some("")), 1);
        assert_eq!(sanitize(Some("abc")), 1);
        assert_eq!(sanitize(Some("0")), 1);
        assert_eq!(sanitize(Some("-3")), 1);
        assert_eq!(sanitize(Some(" 2 ")), 2);
    }

    #[test]
    fn empty_sets_still_have_one_page() {
        let spec = resolve(None, 0);
        assert_eq!(spec.number, 1);
        assert_eq!(spec.total_pages, 1);
        assert_eq!(spec.offset, 0);
    }

    #[test]
    fn exact_multiples_have_no_trailing_page() {
        assert_eq!(total_pages(20), 2);
        assert_eq!(total_pages(21), 3);
    }

    #[test]
    fn page_envelope_tracks_neighbours() {
        let spec = resolve(Some("2"), 25);
        let page = Page::new(vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10], spec, 25);
        assert!(page.has_next);
        assert!(page.has_previous);

        let last = Page::new(vec![1, 2, 3, 4, 5], resolve(Some("3"), 25), 25);
        assert!(!last.has_next);
        assert!(last.has_previous);
    }
}
