// jobdeck: terminal overview of the jobs in a Dagit workspace.
// Parses arguments, sets up logging and the terminal, then runs the app loop.

mod app;
mod cache;
mod cli;
mod config;
mod error;
mod graphql;
mod logging;
mod overview;
mod state;
mod ui;

use std::io;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use app::App;
use cli::Cli;
use config::Config;
use error::{JobdeckError, Result};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config_path {
        match Config::resolve_path(cli.config.as_deref()) {
            Some(path) => println!("{}", path.display()),
            None => return Err(JobdeckError::Other("no config directory available".into())),
        }
        return Ok(());
    }

    let config = Config::from_cli(&cli)?;
    if let Some(log_path) = cache::paths::log_path() {
        logging::init(&log_path, &config.log_level)?;
    }
    tracing::info!(endpoint = %config.endpoint, interval = config.refresh_interval_secs, "starting");

    let mut app = App::new(&config)?;

    // Restore the terminal before the default hook prints the panic.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = app.run(&mut terminal);

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("exiting");
    result.map_err(JobdeckError::from)
}
