mod app;
mod archive;
mod backend;
mod clipboard;
mod config;
mod constants;
mod editor;
mod event;
mod logger;
mod mirror;
mod panels;
mod state;
mod theme;
mod ui;
mod xdg_dirs;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use app::App;
use backend::DirBackend;
use config::Config;

/// Parsed command line: the files to load and flags
struct CliArgs {
    files: Vec<String>,
    read_only: bool,
}

fn parse_args() -> Option<CliArgs> {
    let mut files = Vec::new();
    let mut read_only = false;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--read-only" | "-r" => read_only = true,
            "--help" | "-h" => {
                println!("Usage: confedit [--read-only] [FILE ...]");
                println!();
                println!("Edit a set of files with per-file revert and a single commit.");
                println!();
                println!("  -r, --read-only   open the archive without editing");
                println!("  -h, --help        print this help");
                return None;
            }
            other => files.push(other.to_string()),
        }
    }

    Some(CliArgs { files, read_only })
}

fn main() -> Result<()> {
    let Some(args) = parse_args() else {
        return Ok(());
    };

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config: {}. Using defaults.", e);
        Config::default()
    });

    let root = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let backend = Box::new(DirBackend::new(root, args.files));

    // Build the application before touching the terminal so load
    // errors print normally
    let mut app = App::new(config, backend, args.read_only)?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run application
    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Print error if there was one
    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
