//! Highest printed page number, for the "of N" part of the page label

use log::debug;

use crate::viewer::Viewer;

/// Largest printed page number in the document, computed lazily.
///
/// Leaves whose printed number does not parse (front matter such as
/// `n1`, roman numerals) are skipped. The value is cached against the
/// leaf count it was computed for, so a book that grows after the first
/// label request gets rescanned.
#[derive(Debug, Default)]
pub struct MaxPageNum {
    cached: Option<(usize, u32)>,
}

impl MaxPageNum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, viewer: &dyn Viewer) -> u32 {
        let num_leafs = viewer.leaf_count();
        match self.cached {
            Some((leafs, max)) if leafs == num_leafs => max,
            _ => {
                let max = scan_max_page_num(viewer);
                debug!("Max printed page number over {num_leafs} leaves: {max}");
                self.cached = Some((num_leafs, max));
                max
            }
        }
    }

    /// Forces a rescan on the next request
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn is_computed(&self) -> bool {
        self.cached.is_some()
    }
}

/// Parses a printed page number as a page count, if it is one.
///
/// Only plain non-negative integers that fit a `u32` count. Fractions,
/// exponents, hex and out-of-range values are skipped, so they never raise
/// the total.
pub fn parse_page_num(page_num: &str) -> Option<u32> {
    page_num.trim().parse().ok()
}

/// Scans every leaf once; 0 when no leaf carries a numeric page number
pub fn scan_max_page_num(viewer: &dyn Viewer) -> u32 {
    (0..viewer.leaf_count())
        .filter_map(|i| parse_page_num(&viewer.printed_page_number(i)))
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::{Leaf, LeafBook};

    fn book(labels: &[&str]) -> LeafBook {
        LeafBook::new("t", labels.iter().map(|l| Leaf::numbered(*l)).collect())
    }

    #[test]
    fn test_unnumbered_leaves_are_ignored() {
        let book = book(&["n1", "n2", "3", "4", "7"]);
        assert_eq!(scan_max_page_num(&book), 7);
    }

    #[test]
    fn test_comparison_is_numeric() {
        let book = book(&["7", "10", "9"]);
        assert_eq!(scan_max_page_num(&book), 10);
    }

    #[test]
    fn test_no_numeric_pages_gives_zero() {
        let book = book(&["n0", "iv", "", "Plate 3"]);
        assert_eq!(scan_max_page_num(&book), 0);
    }

    #[test]
    fn test_memo_is_reused_until_leaf_count_changes() {
        let mut book = book(&["1", "2"]);
        let mut max = MaxPageNum::new();
        assert!(!max.is_computed());
        assert_eq!(max.get(&book), 2);
        assert!(max.is_computed());

        book.extend_leaves([Leaf::numbered("3"), Leaf::numbered("12")]);
        assert_eq!(max.get(&book), 12);
    }

    #[test]
    fn test_invalidate_forces_rescan() {
        let book = book(&["5"]);
        let mut max = MaxPageNum::new();
        assert_eq!(max.get(&book), 5);
        max.invalidate();
        assert!(!max.is_computed());
        assert_eq!(max.get(&book), 5);
    }

    #[test]
    fn test_whitespace_around_numbers_is_accepted() {
        assert_eq!(parse_page_num(" 12 "), Some(12));
        assert_eq!(parse_page_num("n12"), None);
        assert_eq!(parse_page_num("-3"), None);
    }

    #[test]
    fn test_non_integer_numbers_do_not_count() {
        for label in ["3.5", "1e2", "0x1F", "99999999999"] {
            assert_eq!(parse_page_num(label), None, "{label}");
        }
        let book = book(&["1", "2", "3.5", "1e2"]);
        assert_eq!(scan_max_page_num(&book), 2);
    }
}
