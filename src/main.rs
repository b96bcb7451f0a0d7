mod api;
mod app;
mod config;
mod credentials;
mod error;
mod keymap;
mod session;
#[cfg(test)]
mod test_support;
mod ui;
mod view;

use api::ApiClient;
use app::App;
use clap::{Parser, Subcommand};
use config::{AppConfig, AppPaths};
use credentials::{CredentialStore, FileKeyStorage};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use keymap::KeyContext;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use ui::key_overlay::KeyInputResult;

/// Terminal browser for The Movie Database catalog
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the config file (defaults to the per-user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API key to validate and store before starting
    #[arg(short = 'k', long)]
    api_key: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the TUI explorer (default)
    Run,
    /// Validate an API key and store it
    SetKey {
        /// TMDB API key (v3)
        key: String,
    },
    /// Remove the stored API key
    ClearKey,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let paths = AppPaths::discover()?;
    init_logging(&paths.log_file())?;

    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file());
    let config = AppConfig::load(&config_path)?;
    if cli.config.is_none() && !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            log::warn!("Could not write default config to {}: {}", config_path.display(), e);
        }
    }
    log::info!("Starting with config {}", config_path.display());

    let client = ApiClient::new(&config)?;
    let mut credentials = CredentialStore::new(Box::new(FileKeyStorage::new(paths.key_file())));

    match cli.command.unwrap_or(Commands::Run) {
        Commands::SetKey { key } => {
            if credentials.validate_and_store(&client, key.trim()).await {
                println!("API key is set and valid. Stored at {}", paths.key_file().display());
            } else {
                eprintln!("Error: Invalid API key. Please check and try again.");
                std::process::exit(1);
            }
        }
        Commands::ClearKey => {
            credentials.clear()?;
            println!("Stored API key removed.");
        }
        Commands::Run => {
            if let Some(key) = cli.api_key {
                if !credentials.validate_and_store(&client, key.trim()).await {
                    eprintln!("Warning: the API key given on the command line was rejected.");
                }
            }

            let mut app = App::new(config, client, credentials);
            app.start();

            // Init terminal
            let mut terminal = ratatui::init();

            let size = terminal.size()?;
            app.update_layout(size.width);

            // Main loop
            let result = run_app(&mut terminal, &mut app).await;

            // Restore terminal
            ratatui::restore();

            if let Err(e) = result {
                log::error!("Terminal loop failed: {}", e);
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// Send log output to `path`; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

async fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        if app.should_quit {
            return Ok(());
        }

        // Poll for events with a 100ms timeout so fetch results show up promptly
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        handle_key(app, key);
                    }
                }
                Event::Resize(width, _) => {
                    app.update_layout(width);
                }
                _ => {}
            }
        }

        app.drain_messages();
        app.tick(Instant::now());
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if let Some(overlay) = app.key_overlay.as_mut() {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            app.should_quit = true;
            return;
        }
        match overlay.handle_key(key) {
            Some(KeyInputResult::Submit(candidate)) => app.submit_api_key(candidate),
            Some(KeyInputResult::Cancel) => app.should_quit = true,
            None => {}
        }
        return;
    }

    let context = if app.show_help {
        KeyContext::Help
    } else if app.detail.is_some() {
        KeyContext::Detail
    } else {
        KeyContext::Browse
    };
    if let Some(command) = keymap::command_for(context, key) {
        app.dispatch(command);
    }
}
