//! Current-page label shown under the scrubber
//!
//! A leaf either carries a printed page number ("Page 5 of 20") or is
//! unnumbered front matter, marked by a leading `n`, in which case its
//! position among all leaves is shown instead ("3 / 10").

use std::fmt;

/// Leading marker of a printed page number that means "unnumbered"
pub const UNNUMBERED_MARKER: char = 'n';

/// Separator used around the slash in HTML output
pub const HTML_NBSP: &str = "&nbsp;";

/// Separator used around the slash in plain-text output
pub const NBSP: &str = "\u{00A0}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLabel {
    /// Leaf with a printed page number; `max_page_num == 0` means no total is known
    Printed { page_num: String, max_page_num: u32 },
    /// Unnumbered leaf, shown as its 1-based position out of `num_leafs`
    Position { index: usize, num_leafs: usize },
}

impl PageLabel {
    /// Builds the label for leaf `index`.
    ///
    /// Only the first character of `page_num` is inspected, so an empty
    /// string counts as a printed number and yields `"Page "`.
    pub fn new(index: usize, num_leafs: usize, page_num: &str, max_page_num: u32) -> Self {
        if page_num.starts_with(UNNUMBERED_MARKER) {
            Self::Position { index, num_leafs }
        } else {
            Self::Printed {
                page_num: page_num.to_string(),
                max_page_num,
            }
        }
    }

    /// Markup form, with `&nbsp;` around the slash of positional labels
    pub fn to_html(&self) -> String {
        self.render(HTML_NBSP)
    }

    fn render(&self, sep: &str) -> String {
        match self {
            Self::Printed {
                page_num,
                max_page_num,
            } => {
                let mut label = format!("Page {page_num}");
                if *max_page_num != 0 {
                    label.push_str(&format!(" of {max_page_num}"));
                }
                label
            }
            Self::Position { index, num_leafs } => {
                format!("{}{sep}/{sep}{num_leafs}", index + 1)
            }
        }
    }
}

/// Plain text with non-breaking spaces, for terminals
impl fmt::Display for PageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(NBSP))
    }
}

/// HTML label for a leaf, see [`PageLabel`]
pub fn format_nav_page_num(
    index: usize,
    num_leafs: usize,
    page_num: &str,
    max_page_num: u32,
) -> String {
    PageLabel::new(index, num_leafs, page_num, max_page_num).to_html()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unnumbered_leaf_shows_position() {
        assert_eq!(format_nav_page_num(2, 10, "n3", 20), "3&nbsp;/&nbsp;10");
    }

    #[test]
    fn test_printed_page_with_total() {
        assert_eq!(format_nav_page_num(4, 10, "5", 20), "Page 5 of 20");
    }

    #[test]
    fn test_zero_max_drops_suffix() {
        assert_eq!(format_nav_page_num(4, 10, "5", 0), "Page 5");
    }

    #[test]
    fn test_empty_page_num_is_treated_as_printed() {
        assert_eq!(format_nav_page_num(0, 3, "", 0), "Page ");
        assert_eq!(format_nav_page_num(0, 3, "", 7), "Page  of 7");
    }

    #[test]
    fn test_only_first_char_is_inspected() {
        // "iv" and "N1" do not start with the lowercase marker
        assert_eq!(format_nav_page_num(0, 5, "iv", 0), "Page iv");
        assert_eq!(format_nav_page_num(0, 5, "N1", 0), "Page N1");
        assert_eq!(format_nav_page_num(0, 5, "nope", 9), "1&nbsp;/&nbsp;5");
    }

    #[test]
    fn test_plain_text_uses_non_breaking_spaces() {
        let label = PageLabel::new(2, 10, "n3", 0);
        assert_eq!(label.to_string(), "3\u{00A0}/\u{00A0}10");
        assert_eq!(PageLabel::new(0, 1, "12", 40).to_string(), "Page 12 of 40");
    }

    #[test]
    fn test_every_index_yields_page_or_slash() {
        let labels = ["n1", "n2", "1", "2", "", "n"];
        for (index, page_num) in labels.iter().enumerate() {
            let s = format_nav_page_num(index, labels.len(), page_num, 2);
            assert!(!s.is_empty());
            assert!(s.contains("Page ") || s.contains('/'), "{s:?}");
        }
    }
}
