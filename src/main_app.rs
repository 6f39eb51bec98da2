use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, info};
use ratatui::{
    Frame, Terminal,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::event_source::EventSource;
use crate::navbar::{Navbar, NavbarAction, NavbarMode, NavbarOptions};
use crate::settings::Settings;
use crate::theme::{Base16Palette, ThemeId};
use crate::viewer::{LeafBook, PageLayout, Viewer};
use crate::widget::navbar_view::{NavbarHit, NavbarLayout, NavbarView, bar_height};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
}

pub struct App {
    pub navbar: Navbar<LeafBook>,
    palette: &'static Base16Palette,
    pub toolbars_visible: bool,
    pub fullscreen: bool,
    pub thumbnail: bool,
    pub zoom_steps: i32,
    pub status: Option<String>,
    // Regions from the last draw, for mouse hit-testing
    navbar_layout: NavbarLayout,
    dragging: bool,
}

impl App {
    pub fn new(mut book: LeafBook, settings: &Settings, start: Option<usize>) -> Result<Self> {
        if let Some(start) = start {
            book.navigate_to_index(start);
        }

        let navbar = if settings.embed {
            let title = book.title().to_string();
            Navbar::init_embed(book, title)
        } else {
            Navbar::init(
                book,
                NavbarOptions {
                    title: settings.navbar_title.clone(),
                    controls: settings.controls.clone(),
                },
            )?
        };
        info!(
            "Navbar ready in {:?} mode over {} leaves",
            navbar.mode(),
            navbar.viewer().leaf_count()
        );

        Ok(Self {
            navbar,
            palette: ThemeId::from_name(&settings.theme).palette(),
            toolbars_visible: true,
            fullscreen: false,
            thumbnail: false,
            zoom_steps: 0,
            status: None,
            navbar_layout: NavbarLayout::default(),
            dragging: false,
        })
    }

    pub fn navbar_layout(&self) -> &NavbarLayout {
        &self.navbar_layout
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let area = f.area();
        let navbar_height = if self.toolbars_visible {
            bar_height(self.navbar.mode()).min(area.height)
        } else {
            0
        };
        let [page_area, bar_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(navbar_height)]).areas(area);

        self.draw_page(f, page_area);

        if self.toolbars_visible {
            self.navbar_layout = NavbarLayout::compute(&self.navbar, bar_area);
            f.render_widget(NavbarView::new(&self.navbar, self.palette), bar_area);
        } else {
            self.navbar_layout = NavbarLayout::default();
        }
    }

    fn draw_page(&self, f: &mut Frame, area: Rect) {
        let viewer = self.navbar.viewer();
        let index = viewer.current_index();
        let palette = self.palette;

        let layout = match viewer.layout() {
            PageLayout::OnePage => "one page",
            PageLayout::TwoPage => "two pages",
        };
        let mut lines = vec![
            Line::from(Span::styled(
                format!("Leaf {} of {}", index + 1, viewer.leaf_count()),
                Style::default()
                    .fg(palette.base_06)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "Printed page: {}",
                viewer.printed_page_number(index)
            )),
            Line::from(format!(
                "View: {layout}, zoom {:+}{}{}",
                self.zoom_steps,
                if self.fullscreen { ", fullscreen" } else { "" },
                if self.thumbnail { ", thumbnails" } else { "" },
            )),
        ];
        if let Some(status) = &self.status {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                status.clone(),
                Style::default().fg(palette.base_0a),
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.base_03))
            .title(viewer.title().to_string());
        f.render_widget(
            Paragraph::new(lines)
                .block(block)
                .style(Style::default().fg(palette.base_05).bg(palette.base_00)),
            area,
        );
    }

    /// Moves the viewer and lets the scrubber follow
    pub fn jump_to(&mut self, index: usize) {
        self.navbar.viewer_mut().navigate_to_index(index);
        self.navbar.update_nav_index(None);
    }

    pub fn perform(&mut self, action: NavbarAction) {
        debug!("Navbar action {action:?}");
        match action {
            NavbarAction::FlipLeft => {
                self.navbar.viewer_mut().flip_left();
                self.navbar.update_nav_index(None);
            }
            NavbarAction::FlipRight => {
                self.navbar.viewer_mut().flip_right();
                self.navbar.update_nav_index(None);
            }
            NavbarAction::OnePage => {
                self.navbar.viewer_mut().set_layout(PageLayout::OnePage);
                self.thumbnail = false;
            }
            NavbarAction::TwoPage => {
                self.navbar.viewer_mut().set_layout(PageLayout::TwoPage);
                self.thumbnail = false;
            }
            NavbarAction::Thumbnail => self.thumbnail = !self.thumbnail,
            NavbarAction::ZoomOut => self.zoom_steps -= 1,
            NavbarAction::ZoomIn => self.zoom_steps += 1,
            NavbarAction::Fullscreen => self.fullscreen = !self.fullscreen,
            NavbarAction::ToggleToolbars => {
                // The release would be dropped once the bar is hidden
                if self.dragging {
                    self.dragging = false;
                    self.navbar.release_drag();
                }
                self.toolbars_visible = !self.toolbars_visible;
            }
        }
        self.status = Some(action.default_label().to_string());
    }

    pub fn handle_event(&mut self, event: &Event) -> Option<AppAction> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(*key),
            Event::Mouse(mouse) => {
                self.handle_mouse(*mouse);
                None
            }
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<AppAction> {
        let last = self.navbar.viewer().leaf_count().saturating_sub(1);
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(AppAction::Quit),
            KeyCode::Char('h') | KeyCode::Left => self.perform(NavbarAction::FlipLeft),
            KeyCode::Char('l') | KeyCode::Right => self.perform(NavbarAction::FlipRight),
            KeyCode::Char('g') | KeyCode::Home => self.jump_to(0),
            KeyCode::Char('G') | KeyCode::End => self.jump_to(last),
            KeyCode::Char('1') => self.perform(NavbarAction::OnePage),
            KeyCode::Char('2') => self.perform(NavbarAction::TwoPage),
            KeyCode::Char('t') => self.perform(NavbarAction::Thumbnail),
            KeyCode::Char('+') | KeyCode::Char('=') => self.perform(NavbarAction::ZoomIn),
            KeyCode::Char('-') => self.perform(NavbarAction::ZoomOut),
            KeyCode::Char('f') => self.perform(NavbarAction::Fullscreen),
            KeyCode::Tab => self.perform(NavbarAction::ToggleToolbars),
            _ => {}
        }
        None
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        // Layout may be stale until the next draw
        if !self.toolbars_visible {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.navbar_layout.hit(mouse.column, mouse.row) {
                    Some(NavbarHit::Track) => {
                        self.dragging = true;
                        self.drag_scrubber(mouse.column);
                    }
                    Some(NavbarHit::Button(action)) => self.perform(action),
                    None => {}
                }
            }
            MouseEventKind::Drag(MouseButton::Left) if self.dragging => {
                self.drag_scrubber(mouse.column);
            }
            MouseEventKind::Up(MouseButton::Left) if self.dragging => {
                self.dragging = false;
                self.navbar.release_drag();
            }
            _ => {}
        }
    }

    fn drag_scrubber(&mut self, column: u16) {
        if self.navbar.mode() != NavbarMode::Desktop {
            return;
        }
        let value = self
            .navbar
            .position()
            .and_then(|control| self.navbar_layout.track_value(control, column));
        if let Some(value) = value {
            self.navbar.drag_to(value);
        }
    }
}

pub fn run_app_with_event_source<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_source: &mut dyn EventSource,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let tick_rate = Duration::from_millis(50);
    loop {
        terminal.draw(|f| app.draw(f))?;

        if !event_source.poll(tick_rate)? {
            continue;
        }
        // Drain whatever is queued before redrawing
        let mut events_processed = 0;
        loop {
            let event = event_source.read()?;
            events_processed += 1;
            if app.handle_event(&event) == Some(AppAction::Quit) {
                info!("Quit requested");
                return Ok(());
            }
            // Mouse hit-testing needs a fresh layout after each click
            if matches!(event, Event::Mouse(_))
                || events_processed >= 50
                || !event_source.poll(Duration::from_millis(0))?
            {
                break;
            }
        }
    }
}
