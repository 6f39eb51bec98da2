// Export modules for use in tests
pub mod error;
pub mod event_source;
pub mod main_app;
pub mod navbar;
pub mod panic_handler;
pub mod settings;
pub mod theme;
pub mod viewer;
pub mod widget;

pub mod test_utils;

pub use error::NavbarError;
pub use main_app::{App, AppAction, run_app_with_event_source};
pub use navbar::{Navbar, NavbarAction, NavbarMode, NavbarOptions, PageLabel};
pub use viewer::{LeafBook, Viewer};
