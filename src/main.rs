mod action;
mod app;
mod carousel;
mod catalog;
mod cli;
mod config;
mod error;
mod event;
mod listing;
mod pokeapi;
mod tui;
mod types;
mod ui;

use std::fs::File;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::Action;
use crate::app::App;
use crate::catalog::Catalog;
use crate::cli::Cli;
use crate::config::Config;
use crate::event::Event;
use crate::pokeapi::PokeApi;
use crate::tui::EventHandler;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    tui::install_panic_hook();

    let config = Config::resolve(&cli)?;
    tracing::debug!(?config, "resolved config");

    let catalog: Arc<dyn Catalog> = Arc::new(PokeApi::new(&config.api)?);

    // Run the application
    let result = run(catalog, &config).await;

    // Restore terminal
    tui::restore()?;

    result
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    match open_log_file(cli)? {
        Some(file) => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

/// `--log-file` if given (failure to create it is fatal), otherwise the
/// default log file. stderr is only used when the default can't be created.
fn open_log_file(cli: &Cli) -> std::io::Result<Option<File>> {
    if let Some(path) = &cli.log_file {
        return File::create(path).map(Some);
    }

    let Some(path) = config::default_log_path() else {
        return Ok(None);
    };
    let created = path
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|()| File::create(&path));
    Ok(created.ok())
}

async fn run(catalog: Arc<dyn Catalog>, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(catalog, config, action_tx.clone());

    // The list is fetched exactly once
    action_tx.send(Action::LoadList)?;

    let tick_rate = Duration::from_millis(250);
    let render_rate = Duration::from_millis(16); // ~60fps
    let mut events = EventHandler::new(tick_rate, render_rate);

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
