//! The viewer the navbar drives, and an in-memory book implementing it

use std::fs;
use std::path::Path;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::NavbarError;

/// What the navbar needs from the document viewer that owns the
/// authoritative current leaf.
///
/// Whenever the viewer changes its index on its own (keyboard, swipe,
/// search jump) the host must call [`crate::navbar::Navbar::update_nav_index`]
/// exactly once, so the scrubber follows without re-triggering navigation.
pub trait Viewer {
    fn leaf_count(&self) -> usize;

    fn current_index(&self) -> usize;

    /// Commands a page change. May settle later, but must eventually
    /// become the value returned by [`Viewer::current_index`].
    fn navigate_to_index(&mut self, index: usize);

    /// Printed page label; a leading `n` marks an unnumbered leaf
    fn printed_page_number(&self, index: usize) -> String;

    /// Deprecated page-type passthrough. Not used for labels.
    fn page_kind(&self, _index: usize) -> Option<String> {
        None
    }
}

/// How many leaves one flip advances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageLayout {
    #[default]
    OnePage,
    TwoPage,
}

impl PageLayout {
    pub fn flip_step(self) -> usize {
        match self {
            PageLayout::OnePage => 1,
            PageLayout::TwoPage => 2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_num: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
}

impl Leaf {
    pub fn numbered(page_num: impl Into<String>) -> Self {
        Self {
            page_num: Some(page_num.into()),
            page_type: None,
        }
    }

    pub fn unnumbered() -> Self {
        Self::default()
    }
}

/// On-disk description of a book: a title and its leaves in order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookDescription {
    #[serde(default)]
    pub title: String,
    pub leaves: Vec<Leaf>,
}

/// In-memory viewer over a fixed list of leaves
#[derive(Debug, Clone)]
pub struct LeafBook {
    title: String,
    leaves: Vec<Leaf>,
    current: usize,
    layout: PageLayout,
}

impl LeafBook {
    pub fn new(title: impl Into<String>, leaves: Vec<Leaf>) -> Self {
        Self {
            title: title.into(),
            leaves,
            current: 0,
            layout: PageLayout::default(),
        }
    }

    /// Book of `leaves` leaves whose first `front_matter` are unnumbered;
    /// the remaining ones are printed 1, 2, 3...
    pub fn synthetic(leaves: usize, front_matter: usize) -> Self {
        let leaves = (0..leaves)
            .map(|i| {
                if i < front_matter {
                    Leaf::unnumbered()
                } else {
                    Leaf::numbered((i - front_matter + 1).to_string())
                }
            })
            .collect();
        Self::new("Untitled", leaves)
    }

    /// Loads a [`BookDescription`]; `.json` files are read as JSON, anything else as YAML
    pub fn from_path(path: &Path) -> Result<Self, NavbarError> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let description: BookDescription = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        if description.leaves.is_empty() {
            return Err(NavbarError::document(format!(
                "{} has no leaves",
                path.display()
            )));
        }

        info!(
            "Loaded {:?} with {} leaves from {path:?}",
            description.title,
            description.leaves.len()
        );
        Ok(Self::new(description.title, description.leaves))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn layout(&self) -> PageLayout {
        self.layout
    }

    pub fn set_layout(&mut self, layout: PageLayout) {
        self.layout = layout;
    }

    /// Appends leaves, as when the rest of a book finishes loading
    pub fn extend_leaves(&mut self, leaves: impl IntoIterator<Item = Leaf>) {
        self.leaves.extend(leaves);
    }

    pub fn flip_left(&mut self) {
        let target = self.current.saturating_sub(self.layout.flip_step());
        self.navigate_to_index(target);
    }

    pub fn flip_right(&mut self) {
        let target = self.current + self.layout.flip_step();
        self.navigate_to_index(target);
    }
}

impl Viewer for LeafBook {
    fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    fn current_index(&self) -> usize {
        self.current
    }

    fn navigate_to_index(&mut self, index: usize) {
        let last = self.leaves.len().saturating_sub(1);
        if index > last {
            warn!("Navigation to leaf {index} past the end, clamping to {last}");
        }
        let index = index.min(last);
        if index != self.current {
            debug!("Viewer moving from leaf {} to {index}", self.current);
        }
        self.current = index;
    }

    fn printed_page_number(&self, index: usize) -> String {
        self.leaves
            .get(index)
            .and_then(|leaf| leaf.page_num.clone())
            .unwrap_or_else(|| format!("n{index}"))
    }

    fn page_kind(&self, index: usize) -> Option<String> {
        self.leaves.get(index).and_then(|leaf| leaf.page_type.clone())
    }
}
