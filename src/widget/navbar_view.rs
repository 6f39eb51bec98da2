//! Terminal rendering of the navbar
//!
//! Desktop bar, three rows:
//!
//! ```text
//! Title ━━━━━━━━━●──────────────────── ▾
//!       Page 12 of 240
//!  ◀  ▶  ▯  ▯▯  ▦  −  +  ⛶
//! ```
//!
//! The embedded bar is a single row with the title and three buttons.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::Widget,
};

use crate::navbar::{Navbar, NavbarAction, NavbarMode, PositionControl};
use crate::theme::Base16Palette;
use crate::viewer::Viewer;

/// Rows taken by the desktop bar
pub const DESKTOP_HEIGHT: u16 = 3;
/// Rows taken by the embedded bar
pub const EMBED_HEIGHT: u16 = 1;

const BUTTON_GAP: u16 = 2;
const TRACK_FILLED: &str = "━";
const TRACK_EMPTY: &str = "─";
const TRACK_HANDLE: &str = "●";

pub fn bar_height(mode: NavbarMode) -> u16 {
    match mode {
        NavbarMode::Desktop => DESKTOP_HEIGHT,
        NavbarMode::Embed => EMBED_HEIGHT,
    }
}

fn text_width(s: &str) -> u16 {
    Span::raw(s).width() as u16
}

/// What sits under a mouse position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarHit {
    Track,
    Button(NavbarAction),
}

/// Screen regions of a rendered navbar, kept for mouse hit-testing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavbarLayout {
    pub title: Option<Rect>,
    pub track: Option<Rect>,
    pub label: Option<Rect>,
    pub buttons: Vec<(Rect, NavbarAction)>,
}

impl NavbarLayout {
    pub fn compute<V: Viewer>(navbar: &Navbar<V>, area: Rect) -> Self {
        if area.width == 0 || area.height == 0 {
            return Self::default();
        }
        match navbar.mode() {
            NavbarMode::Desktop => Self::desktop(navbar, area),
            NavbarMode::Embed => Self::embed(navbar, area),
        }
    }

    fn desktop<V: Viewer>(navbar: &Navbar<V>, area: Rect) -> Self {
        let mut layout = Self::default();

        let title_width = navbar
            .title()
            .map(|t| (text_width(t) + 1).min(area.width / 3))
            .unwrap_or(0);
        if title_width > 0 {
            layout.title = Some(Rect::new(area.x, area.y, title_width - 1, 1));
        }

        // Toggle handle in the top right corner
        let toggle_width = text_width(NavbarAction::ToggleToolbars.glyph());
        let toggle_x = area.right().saturating_sub(toggle_width);
        layout.buttons.push((
            Rect::new(toggle_x, area.y, toggle_width, 1),
            NavbarAction::ToggleToolbars,
        ));

        let track_x = area.x + title_width;
        let track_width = toggle_x.saturating_sub(track_x).saturating_sub(1);
        if track_width > 0 {
            layout.track = Some(Rect::new(track_x, area.y, track_width, 1));
            if area.height > 1 {
                layout.label = Some(Rect::new(track_x, area.y + 1, track_width, 1));
            }
        }

        if area.height > 2 {
            let y = area.y + 2;
            let mut x = area.x + 1;
            for button in navbar.buttons() {
                let width = text_width(button.action.glyph());
                if x + width > area.right() {
                    break;
                }
                layout.buttons.push((Rect::new(x, y, width, 1), button.action));
                x += width + BUTTON_GAP;
            }
        }
        layout
    }

    fn embed<V: Viewer>(navbar: &Navbar<V>, area: Rect) -> Self {
        let mut layout = Self::default();

        let widths: Vec<u16> = navbar
            .buttons()
            .iter()
            .map(|b| text_width(b.action.glyph()))
            .collect();
        let buttons_width: u16 =
            widths.iter().sum::<u16>() + BUTTON_GAP * widths.len().saturating_sub(1) as u16;
        let mut x = area.right().saturating_sub(buttons_width + 1).max(area.x);
        for (button, width) in navbar.buttons().iter().zip(widths) {
            if x + width > area.right() {
                break;
            }
            layout
                .buttons
                .push((Rect::new(x, area.y, width, 1), button.action));
            x += width + BUTTON_GAP;
        }

        let title_end = layout
            .buttons
            .first()
            .map(|(rect, _)| rect.x)
            .unwrap_or(area.right());
        let title_width = title_end.saturating_sub(area.x + 2);
        if navbar.title().is_some() && title_width > 0 {
            layout.title = Some(Rect::new(area.x + 1, area.y, title_width, 1));
        }
        layout
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<NavbarHit> {
        let contains = |rect: &Rect| {
            column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
        };
        if self.track.as_ref().is_some_and(contains) {
            return Some(NavbarHit::Track);
        }
        self.buttons
            .iter()
            .find(|(rect, _)| contains(rect))
            .map(|(_, action)| NavbarHit::Button(*action))
    }

    /// Slider value under `column`; columns outside the track clamp to its ends
    pub fn track_value(&self, control: &PositionControl, column: u16) -> Option<usize> {
        let track = self.track?;
        let span = track.width.saturating_sub(1);
        if span == 0 {
            return Some(control.min());
        }
        let offset = column.saturating_sub(track.x).min(span);
        Some(control.value_at_ratio(f64::from(offset) / f64::from(span)))
    }

    /// Column of the handle for the control's current value
    pub fn handle_column(&self, control: &PositionControl) -> Option<u16> {
        let track = self.track?;
        let span = track.width.saturating_sub(1);
        Some(track.x + (control.ratio() * f64::from(span)).round() as u16)
    }
}

pub struct NavbarView<'a, V: Viewer> {
    navbar: &'a Navbar<V>,
    palette: &'a Base16Palette,
}

impl<'a, V: Viewer> NavbarView<'a, V> {
    pub fn new(navbar: &'a Navbar<V>, palette: &'a Base16Palette) -> Self {
        Self { navbar, palette }
    }
}

impl<V: Viewer> Widget for NavbarView<'_, V> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        if area.is_empty() {
            return;
        }
        let palette = self.palette;
        buf.set_style(area, Style::default().bg(palette.base_01).fg(palette.base_05));

        let layout = NavbarLayout::compute(self.navbar, area);

        if let (Some(rect), Some(title)) = (layout.title, self.navbar.title()) {
            buf.set_stringn(
                rect.x,
                rect.y,
                title,
                rect.width as usize,
                Style::default()
                    .fg(palette.base_06)
                    .add_modifier(Modifier::BOLD),
            );
        }

        if let (Some(track), Some(control)) = (layout.track, self.navbar.position()) {
            let handle = layout.handle_column(control).unwrap_or(track.x);
            for x in track.x..track.right() {
                let (symbol, color) = match x.cmp(&handle) {
                    std::cmp::Ordering::Less => (TRACK_FILLED, palette.base_0d),
                    std::cmp::Ordering::Equal => (TRACK_HANDLE, palette.base_0a),
                    std::cmp::Ordering::Greater => (TRACK_EMPTY, palette.base_03),
                };
                buf.set_string(x, track.y, symbol, Style::default().fg(color));
            }
        }

        if let (Some(rect), Some(label)) = (layout.label, self.navbar.label()) {
            buf.set_stringn(
                rect.x,
                rect.y,
                label.to_string(),
                rect.width as usize,
                Style::default().fg(palette.base_05),
            );
        }

        for (rect, action) in &layout.buttons {
            buf.set_string(
                rect.x,
                rect.y,
                action.glyph(),
                Style::default().fg(palette.base_0c),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navbar::NavbarOptions;
    use crate::theme::ThemeId;
    use crate::viewer::LeafBook;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol())
            .collect::<String>()
    }

    fn desktop(leaves: usize, title: Option<&str>) -> Navbar<LeafBook> {
        Navbar::init(
            LeafBook::synthetic(leaves, 0),
            NavbarOptions {
                title: title.map(str::to_string),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_desktop_render_shows_track_label_and_buttons() {
        let navbar = desktop(11, Some("Book"));
        let area = Rect::new(0, 0, 40, DESKTOP_HEIGHT);
        let mut buf = Buffer::empty(area);
        NavbarView::new(&navbar, ThemeId::OceanicNext.palette()).render(area, &mut buf);

        let top = row(&buf, 0);
        assert!(top.starts_with("Book "), "{top:?}");
        assert!(top.contains(TRACK_HANDLE));
        assert!(row(&buf, 1).contains("Page 1 of 11"));
        let buttons = row(&buf, 2);
        assert!(buttons.contains(NavbarAction::FlipLeft.glyph()));
        assert!(buttons.contains(NavbarAction::ZoomIn.glyph()));
    }

    #[test]
    fn test_handle_sits_at_track_ends() {
        let mut navbar = desktop(5, None);
        let area = Rect::new(0, 0, 30, DESKTOP_HEIGHT);
        let layout = NavbarLayout::compute(&navbar, area);
        let track = layout.track.unwrap();

        let control = navbar.position().unwrap().clone();
        assert_eq!(layout.handle_column(&control), Some(track.x));

        navbar.update_nav_index(Some(4));
        let control = navbar.position().unwrap().clone();
        assert_eq!(layout.handle_column(&control), Some(track.right() - 1));
    }

    #[test]
    fn test_track_value_maps_columns_to_leaves() {
        let navbar = desktop(11, None);
        let area = Rect::new(0, 0, 30, DESKTOP_HEIGHT);
        let layout = NavbarLayout::compute(&navbar, area);
        let track = layout.track.unwrap();
        let control = navbar.position().unwrap();

        assert_eq!(layout.track_value(control, track.x), Some(0));
        assert_eq!(layout.track_value(control, track.right() - 1), Some(10));
        assert_eq!(layout.track_value(control, track.right() + 5), Some(10));
        assert_eq!(layout.hit(track.x + 1, track.y), Some(NavbarHit::Track));
    }

    #[test]
    fn test_button_hit_testing() {
        let navbar = desktop(3, None);
        let area = Rect::new(0, 10, 40, DESKTOP_HEIGHT);
        let layout = NavbarLayout::compute(&navbar, area);

        let (rect, action) = layout.buttons[1];
        assert_eq!(action, NavbarAction::FlipLeft);
        assert_eq!(
            layout.hit(rect.x, rect.y),
            Some(NavbarHit::Button(NavbarAction::FlipLeft))
        );
        assert_eq!(
            layout.hit(area.right() - 1, area.y),
            Some(NavbarHit::Button(NavbarAction::ToggleToolbars))
        );
        assert_eq!(layout.hit(0, 0), None);
    }

    #[test]
    fn test_embed_render_has_title_and_three_buttons() {
        let navbar = Navbar::init_embed(LeafBook::synthetic(3, 0), "Embedded");
        let area = Rect::new(0, 0, 40, EMBED_HEIGHT);
        let layout = NavbarLayout::compute(&navbar, area);
        assert!(layout.track.is_none());
        assert_eq!(layout.buttons.len(), 3);

        let mut buf = Buffer::empty(area);
        NavbarView::new(&navbar, ThemeId::CatppuccinMocha.palette()).render(area, &mut buf);
        assert!(row(&buf, 0).contains("Embedded"));
    }
}
