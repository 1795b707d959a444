//! Indicator table pagination

use std::ops::{Range, RangeInclusive};

/// Rows per indicator page
pub const PAGE_SIZE: usize = 3;

/// Current page over a fixed number of rows.
///
/// Pages are 1-based. With zero rows there are zero pages; the current
/// page stays at 1 and both directions are disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: usize,
    total_items: usize,
}

impl Pager {
    pub fn new(total_items: usize) -> Self {
        Self {
            current: 1,
            total_items,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(PAGE_SIZE)
    }

    /// Page numbers to offer as buttons: current page plus one neighbour
    /// on each side, cut at the edges. Empty when there are no pages.
    pub fn window(&self) -> RangeInclusive<usize> {
        let start = self.current.saturating_sub(1).max(1);
        let end = (self.current + 1).min(self.total_pages());
        start..=end
    }

    pub fn prev_disabled(&self) -> bool {
        self.current <= 1
    }

    pub fn next_disabled(&self) -> bool {
        self.current >= self.total_pages()
    }

    pub fn prev(&mut self) {
        if !self.prev_disabled() {
            self.current -= 1;
        }
    }

    pub fn next(&mut self) {
        if !self.next_disabled() {
            self.current += 1;
        }
    }

    /// Jump to a page. Out-of-range numbers are clamped.
    pub fn select(&mut self, page: usize) {
        self.current = page.clamp(1, self.total_pages().max(1));
    }

    /// Slice bounds of the rows on the current page
    pub fn visible_range(&self) -> Range<usize> {
        let start = ((self.current - 1) * PAGE_SIZE).min(self.total_items);
        let end = (self.current * PAGE_SIZE).min(self.total_items);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(p: &Pager) -> Vec<usize> {
        p.window().collect()
    }

    #[test]
    fn test_total_pages() {
        for (n, pages) in [(0, 0), (1, 1), (3, 1), (4, 2), (6, 2), (7, 3), (10, 4)] {
            assert_eq!(Pager::new(n).total_pages(), pages, "n = {}", n);
        }
    }

    #[test]
    fn test_seven_rows() {
        let mut p = Pager::new(7);
        assert_eq!(window(&p), vec![1, 2]);
        assert_eq!(p.visible_range().len(), 3);

        p.next();
        assert_eq!(window(&p), vec![1, 2, 3]);

        p.next();
        assert_eq!(p.current(), 3);
        assert_eq!(window(&p), vec![2, 3]);
        assert_eq!(p.visible_range(), 6..7);
    }

    #[test]
    fn test_boundaries_disable_controls() {
        let mut p = Pager::new(7);
        assert!(p.prev_disabled());
        assert!(!p.next_disabled());

        p.prev();
        assert_eq!(p.current(), 1);

        p.select(3);
        assert!(!p.prev_disabled());
        assert!(p.next_disabled());

        p.next();
        assert_eq!(p.current(), 3);
    }

    #[test]
    fn test_single_page() {
        let p = Pager::new(2);
        assert!(p.prev_disabled());
        assert!(p.next_disabled());
        assert_eq!(window(&p), vec![1]);
        assert_eq!(p.visible_range(), 0..2);
    }

    #[test]
    fn test_empty() {
        let mut p = Pager::new(0);
        assert_eq!(p.total_pages(), 0);
        assert!(window(&p).is_empty());
        assert!(p.prev_disabled());
        assert!(p.next_disabled());
        assert!(p.visible_range().is_empty());

        p.next();
        p.select(5);
        assert_eq!(p.current(), 1);
    }

    #[test]
    fn test_select_clamps() {
        let mut p = Pager::new(7);
        p.select(2);
        assert_eq!(p.current(), 2);
        p.select(99);
        assert_eq!(p.current(), 3);
        p.select(0);
        assert_eq!(p.current(), 1);
    }
}
