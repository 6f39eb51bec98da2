use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use simplelog::{Config, LevelFilter, WriteLogger};

use pagebar::event_source::TerminalEventSource;
use pagebar::panic_handler::initialize_panic_handler;
use pagebar::settings::load_settings;
use pagebar::{App, LeafBook, run_app_with_event_source};

#[derive(Parser, Debug)]
#[command(name = "pagebar")]
#[command(about = "Page through a document with a scrubber navbar")]
struct Cli {
    /// Book description (.yaml or .json) listing the leaves
    #[arg(long, value_name = "FILE")]
    document: Option<PathBuf>,

    /// Leaves of the generated book when no document is given
    #[arg(long, default_value_t = 120)]
    leaves: usize,

    /// Unnumbered leaves at the start of the generated book
    #[arg(long, default_value_t = 4)]
    front_matter: usize,

    /// Leaf to open at
    #[arg(long)]
    start: Option<usize>,

    /// Use the compact embedded bar
    #[arg(long)]
    embed: bool,

    /// Navbar title
    #[arg(long)]
    title: Option<String>,

    /// Settings file instead of the per-user one
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, value_name = "FILE", default_value = "pagebar.log")]
    log_file: PathBuf,

    /// Overrides the log level from the settings file
    #[arg(long)]
    log_level: Option<LevelFilter>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref());
    if cli.embed {
        settings.embed = true;
    }
    if cli.title.is_some() {
        settings.navbar_title = cli.title.clone();
    }

    let level = cli.log_level.unwrap_or_else(|| settings.log_level_filter());
    WriteLogger::init(
        level,
        Config::default(),
        File::create(&cli.log_file)
            .with_context(|| format!("creating log file {}", cli.log_file.display()))?,
    )?;

    info!("Starting pagebar");

    let book = match &cli.document {
        Some(path) => LeafBook::from_path(path)
            .with_context(|| format!("loading document {}", path.display()))?,
        None => LeafBook::synthetic(cli.leaves, cli.front_matter),
    };
    let mut app = App::new(book, &settings, cli.start)?;

    initialize_panic_handler();

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app_with_event_source(&mut terminal, &mut app, &mut TerminalEventSource);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Application error: {err:?}");
        println!("{err:?}");
    }

    info!("Shutting down pagebar");
    Ok(())
}
