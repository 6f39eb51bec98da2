//! Bottom navigation bar of the viewer
//!
//! Holds the scrubber, the current-page label and the button strip, and
//! keeps the scrubber in step with the viewer's current leaf.

pub mod controls;
pub mod max_page;
pub mod page_label;
pub mod position_sync;

use log::debug;

use crate::error::NavbarError;
use crate::viewer::Viewer;

pub use controls::{ControlOption, ControlsConfig, NavbarAction, NavbarButton};
pub use max_page::MaxPageNum;
pub use page_label::{PageLabel, format_nav_page_num};
pub use position_sync::{ControlEvent, PositionControl, PositionSync, SyncOutcome, SyncState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarMode {
    /// Full bar: scrubber, label and every control
    Desktop,
    /// Compact bar for embedding: title and flip/fullscreen buttons only
    Embed,
}

#[derive(Debug, Clone, Default)]
pub struct NavbarOptions {
    pub title: Option<String>,
    pub controls: ControlsConfig,
}

pub struct Navbar<V: Viewer> {
    viewer: V,
    mode: NavbarMode,
    title: Option<String>,
    buttons: Vec<NavbarButton>,
    // None in embed mode
    sync: Option<PositionSync>,
    max_page_num: MaxPageNum,
    label: Option<PageLabel>,
}

impl<V: Viewer> Navbar<V> {
    /// Builds the full navbar over the viewer's leaves, positioned at its
    /// current leaf. Fails if the viewer has no leaves.
    pub fn init(viewer: V, options: NavbarOptions) -> Result<Self, NavbarError> {
        let sync = PositionSync::initialize(viewer.leaf_count(), viewer.current_index())?;
        let current = sync.value();
        let mut navbar = Self {
            viewer,
            mode: NavbarMode::Desktop,
            title: options.title,
            buttons: controls::desktop_buttons(&options.controls),
            sync: Some(sync),
            max_page_num: MaxPageNum::new(),
            label: None,
        };
        navbar.update_nav_page_num(current);
        Ok(navbar)
    }

    /// Builds the embedded navbar, which has no scrubber or label
    pub fn init_embed(viewer: V, book_title: impl Into<String>) -> Self {
        Self {
            viewer,
            mode: NavbarMode::Embed,
            title: Some(book_title.into()),
            buttons: controls::embed_buttons(),
            sync: None,
            max_page_num: MaxPageNum::new(),
            label: None,
        }
    }

    /// Rebuilds the scrubber for the viewer's current leaf count and drops
    /// the cached max page number
    pub fn reinit(&mut self) -> Result<(), NavbarError> {
        self.max_page_num.invalidate();
        if self.mode == NavbarMode::Embed {
            return Ok(());
        }
        let sync =
            PositionSync::initialize(self.viewer.leaf_count(), self.viewer.current_index())?;
        let current = sync.value();
        self.sync = Some(sync);
        self.update_nav_page_num(current);
        Ok(())
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    /// Mutable viewer access. Page changes made through it must be
    /// followed by [`Navbar::update_nav_index`].
    pub fn viewer_mut(&mut self) -> &mut V {
        &mut self.viewer
    }

    pub fn into_viewer(self) -> V {
        self.viewer
    }

    pub fn mode(&self) -> NavbarMode {
        self.mode
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn buttons(&self) -> &[NavbarButton] {
        &self.buttons
    }

    pub fn position(&self) -> Option<&PositionControl> {
        self.sync.as_ref().map(PositionSync::control)
    }

    pub fn sync_state(&self) -> Option<SyncState> {
        self.sync.as_ref().map(PositionSync::state)
    }

    /// Label currently displayed
    pub fn label(&self) -> Option<&PageLabel> {
        self.label.as_ref()
    }

    pub fn label_html(&self) -> Option<String> {
        self.label.as_ref().map(PageLabel::to_html)
    }

    /// Label for leaf `index`. Scans the document for its highest page
    /// number on first use.
    pub fn nav_page_num_label(&mut self, index: usize) -> PageLabel {
        let page_num = self.viewer.printed_page_number(index);
        let max_page_num = self.max_page_num.get(&self.viewer);
        PageLabel::new(index, self.viewer.leaf_count(), &page_num, max_page_num)
    }

    /// Refreshes the displayed label for leaf `index`
    pub fn update_nav_page_num(&mut self, index: usize) {
        if self.mode == NavbarMode::Embed {
            return;
        }
        let label = self.nav_page_num_label(index);
        self.label = Some(label);
    }

    /// Moves the scrubber to `index`, or to the viewer's current leaf,
    /// without navigating
    pub fn update_nav_index(&mut self, index: Option<usize>) {
        let index = index.unwrap_or_else(|| self.viewer.current_index());
        let Some(sync) = self.sync.as_mut() else {
            return;
        };
        let outcome = sync.set_index_programmatically(index);
        self.apply(outcome);
    }

    /// Slide notification from an external control
    pub fn on_slide(&mut self, value: usize) {
        if let Some(sync) = self.sync.as_mut() {
            let outcome = sync.on_dragging(value);
            self.apply(outcome);
        }
    }

    /// Change notification from an external control
    pub fn on_change(&mut self, value: usize) {
        if let Some(sync) = self.sync.as_mut() {
            let outcome = sync.on_drag_committed(value);
            self.apply(outcome);
        }
    }

    /// User drags the scrubber handle to `value`
    pub fn drag_to(&mut self, value: usize) {
        if let Some(sync) = self.sync.as_mut() {
            let outcome = sync.drag_to(value);
            self.apply(outcome);
        }
    }

    /// User releases the scrubber handle
    pub fn release_drag(&mut self) {
        let outcome = self.sync.as_mut().and_then(PositionSync::release);
        if let Some(outcome) = outcome {
            self.apply(outcome);
        }
    }

    fn apply(&mut self, outcome: SyncOutcome) {
        self.update_nav_page_num(outcome.index());
        if let Some(index) = outcome.navigation() {
            debug!("Navbar navigating viewer to leaf {index}");
            self.viewer.navigate_to_index(index);
        }
    }
}
