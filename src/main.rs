//! h5pad - a terminal-based HDF5 / netCDF-4 viewer.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use h5pad::app::App;
use h5pad::config::{Theme, ViewerConfig};
use h5pad::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Theme::GruvboxDark,
            ThemeArg::Light => Theme::GruvboxLight,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "h5pad", version)]
#[command(about = "A terminal-based HDF5 / netCDF-4 viewer", long_about = None)]
struct Args {
    /// Path to the HDF5 / netCDF-4 file to open
    file: Option<PathBuf>,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Log filter directive, e.g. "h5pad=trace"
    #[arg(long, default_value = "debug")]
    log_filter: String,

    /// Most page labels offered by the page selector
    #[arg(long, default_value_t = 100)]
    max_pages: usize,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeArg::Dark)]
    theme: ThemeArg,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::try_new(&args.log_filter)?)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting h5pad");
    }

    // Validate path if provided
    if let Some(ref path) = args.file {
        if !path.is_file() {
            eprintln!("Error: File not found: {}", path.display());
            std::process::exit(1);
        }
    }

    let config = ViewerConfig {
        max_pages: args.max_pages,
        theme: args.theme.into(),
        ..ViewerConfig::default()
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let app = App::new(args.file, config);
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    if args.log.is_some() {
        tracing::info!("h5pad exited");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        // Path prompt - handle separately
        if app.path_input.is_active() {
            match key.code {
                KeyCode::Enter => app.submit_path_input(),
                KeyCode::Esc => app.path_input.cancel(),
                KeyCode::Backspace => app.path_input.backspace(),
                KeyCode::Char(c) => app.path_input.input(c),
                _ => {},
            }
            continue;
        }

        match (key.modifiers, key.code) {
            // Quit
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(()),
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(()),

            // Movement
            (KeyModifiers::NONE, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                app.move_up();
            },
            (KeyModifiers::NONE, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                app.move_down();
            },
            (KeyModifiers::NONE, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('h')) => {
                app.move_left();
            },
            (KeyModifiers::NONE, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
                app.move_right();
            },
            (KeyModifiers::NONE, KeyCode::Home) => app.move_home(),
            (KeyModifiers::NONE, KeyCode::End) => app.move_end(),
            (KeyModifiers::NONE, KeyCode::Tab) => app.toggle_focus(),

            // Navigation
            (KeyModifiers::NONE, KeyCode::Enter) => app.activate(),
            (KeyModifiers::NONE, KeyCode::Backspace) | (KeyModifiers::NONE, KeyCode::Char('u')) => {
                app.go_up();
            },
            (KeyModifiers::NONE, KeyCode::Char('b')) => app.back(),
            (KeyModifiers::NONE, KeyCode::Char('f')) => app.forward(),
            (KeyModifiers::NONE, KeyCode::Char('g')) => app.start_path_input(),

            // Pages
            (KeyModifiers::NONE, KeyCode::Char(']'))
            | (KeyModifiers::NONE, KeyCode::PageDown) => app.next_page(),
            (KeyModifiers::NONE, KeyCode::Char('['))
            | (KeyModifiers::NONE, KeyCode::PageUp) => app.prev_page(),

            // Attribute table scrolling
            (KeyModifiers::SHIFT, KeyCode::Char('J')) => app.explorer.scroll_down(),
            (KeyModifiers::SHIFT, KeyCode::Char('K')) => app.explorer.scroll_up(),

            (KeyModifiers::SHIFT, KeyCode::Char('T')) => app.cycle_theme(),
            (KeyModifiers::NONE, KeyCode::Esc) => app.clear_error(),

            _ => {},
        }
    }
}
