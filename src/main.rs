//! fitdex - Browse exercises from the terminal
//!
//! A terminal UI application for browsing exercises by body part or
//! equipment, reading instructions, finding related videos and chatting with
//! a fitness assistant.

use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use fitdex::app::App;
use fitdex::cli::{Cli, StartupConfig};
use fitdex::config::Config;
use fitdex::logging::init_tracing;
use fitdex::ui;
use fitdex::worker::{try_recv, Services, Worker};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let startup_config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let config = Config::from_cli(&cli);
    if let Some(ref path) = config.log_file {
        if !init_tracing(path) {
            eprintln!("Warning: could not open log file {}", path.display());
        }
    }
    info!(
        start_screen = ?startup_config.start_screen,
        exercisedb_key = config.rapidapi_key.is_some(),
        youtube_key = config.youtube_key.is_some(),
        gemini_key = config.gemini_key.is_some(),
        "Starting fitdex"
    );

    let services = Services::from_config(&config);
    let chat_has_key = services.chat.has_key();
    let (worker, mut events) = Worker::new(services);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_startup_config(startup_config, chat_has_key);

    // Main event loop
    loop {
        for request in app.take_requests() {
            worker.dispatch(request);
        }

        while let Some(event) = try_recv(&mut events) {
            app.apply(event);
        }

        terminal.draw(|f| ui::render(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("Shutting down");

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
