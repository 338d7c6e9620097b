mod app;
mod config;
mod logging;
mod net;
mod ui;

use crate::app::action::Action;
use crate::app::event::AppEvent;
use crate::app::handler;
use crate::app::state::*;
use crate::logging::TranscriptLogger;
use crate::net::manager::ConnectionManager;
use crate::ui::theme::Theme;
use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::io;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Game server host
    #[arg(long)]
    host: Option<String>,
    /// Game server port
    #[arg(long)]
    port: Option<u16>,
    /// Character to log in as
    #[arg(long)]
    character: Option<String>,
    /// Config file (default: <config dir>/playhud/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Diagnostics log file
    #[arg(long)]
    log: Option<String>,
    /// Start offline; use /connect to join
    #[arg(long)]
    no_connect: bool,
    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    write_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let mut cfg = config::load_config(&config_path)?;
    if let Some(host) = cli.host {
        cfg.server.host = host;
    }
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }
    if let Some(character) = cli.character {
        cfg.server.character = character;
    }
    if cli.no_connect {
        cfg.server.auto_connect = false;
    }

    if cli.write_config {
        config::save_config(&cfg, &config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    logging::init_tracing(&cfg.logging, cli.log.as_deref())?;
    info!(config = %config_path.display(), "starting");

    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        original_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, cfg).await;

    restore_terminal()?;

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    cfg: config::AppConfig,
) -> Result<()> {
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<AppEvent>();

    let theme = Theme::from_config(&cfg.theme);
    let mut state = AppState::new(cfg.clone());
    let mut connections = ConnectionManager::new(event_tx.clone());
    let mut transcript = TranscriptLogger::new(&cfg.logging);

    let size = terminal.size()?;
    state.viewport = Rect::new(0, 0, size.width, size.height);

    // Spawn terminal input task
    let term_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if term_tx.send(AppEvent::Terminal(event)).is_err() {
                break;
            }
        }
    });

    // Spawn tick task (20 FPS = 50ms)
    let tick_tx = event_tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_millis(50));
        loop {
            interval.tick().await;
            if tick_tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    state.system_message(format!("Welcome, {}.", state.character_name));
    state.system_message("Type /help for keys and commands.".to_string());
    if cfg.server.auto_connect {
        dispatch(&mut state, &mut connections, Action::Connect).await;
    } else {
        state.system_message("Offline. Use /connect to join the game.".to_string());
    }

    terminal.draw(|f| ui::render(f, &state, &theme))?;

    // Main event loop
    while let Some(event) = event_rx.recv().await {
        let actions = handler::handle_event(&mut state, event);

        for action in actions {
            dispatch(&mut state, &mut connections, action).await;
        }

        if state.active_connection.is_none() && connections.current_id().is_some() {
            connections.clear();
        }

        for line in state.new_lines.drain(..) {
            transcript.log_line(&state.character_name, &line);
        }

        if state.should_quit {
            break;
        }

        // Conditional render (only if dirty)
        if state.dirty {
            terminal.draw(|f| ui::render(f, &state, &theme))?;
            state.dirty = false;
        }
    }

    Ok(())
}

/// Apply one action against the connection, reporting failures in the output
/// log rather than aborting the session.
async fn dispatch(state: &mut AppState, connections: &mut ConnectionManager, action: Action) {
    debug!(?action, "dispatch");
    match action {
        Action::Send { command } => {
            state.echo_line(command.clone());
            if let Err(e) = connections.send(&command) {
                state.error_message(format!("Send failed: {}", e));
            }
        }
        Action::Connect => {
            let server = state.config.server.clone();
            state.connection = ConnectionStatus::Connecting;
            state.system_message(format!("Connecting to {}:{}...", server.host, server.port));
            match connections
                .connect(&server.host, server.port, &state.character_name)
                .await
            {
                Ok(id) => state.active_connection = Some(id),
                Err(e) => {
                    state.connection = ConnectionStatus::Disconnected;
                    state.active_connection = None;
                    state.error_message(format!("Connection failed: {:#}", e));
                }
            }
        }
        Action::Disconnect => {
            connections.disconnect();
            state.active_connection = None;
            state.connection = ConnectionStatus::Disconnected;
            state.system_message("Disconnected.".to_string());
        }
        Action::Quit => {
            connections.disconnect();
            state.should_quit = true;
        }
    }
}
