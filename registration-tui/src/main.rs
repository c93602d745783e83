mod app;
mod editor;
mod error;
mod paths;
mod terminal;
mod toast;
mod view;
mod widgets;

use std::fs;
use std::fs::File;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::Event;
use crossterm::event::EventStream;
use crossterm::event::KeyEventKind;
use futures::StreamExt;
use log::LevelFilter;
use log::debug;
use log::error;
use log::info;
use registration_lib::RegistrationApi;
use registration_lib::RegistrationClient;
use registration_lib::config::Config;
use registration_lib::model::FilePayload;
use registration_lib::validation::ValidationContext;
use simplelog::WriteLogger;
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::App;
use crate::app::AppEvent;
use crate::app::Command;
use crate::error::AppError;
use crate::terminal::TerminalGuard;
use crate::view::Viewport;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;
    init_logging(config.log_level())?;
    info!("Starting registration form against {}", config.base_uri());

    let client = RegistrationClient::from_config(&config)?;
    let api: Arc<dyn RegistrationApi> = Arc::new(client);

    let mut terminal = TerminalGuard::new()?;
    let result = event_loop(&mut terminal, api).await;
    info!("Shutting down");
    result
}

fn init_logging(level: LevelFilter) -> Result<(), AppError> {
    paths::rotate_logs();
    let Some(path) = paths::log_file() else {
        return Ok(());
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let log_file = File::create(&path)?;
    WriteLogger::init(level, simplelog::Config::default(), log_file)?;
    debug!("Logging to {}", path.display());
    Ok(())
}

async fn event_loop(
    terminal: &mut TerminalGuard,
    api: Arc<dyn RegistrationApi>,
) -> Result<(), AppError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut app = App::new(Instant::now());
    let mut events = EventStream::new();
    let mut viewport = Viewport::new(terminal.height()?);

    spawn_liveness_check(api.clone(), tx.clone());

    loop {
        let now = Instant::now();
        let cx = ValidationContext::now();
        viewport.set_height(terminal.height()?);
        terminal.draw(&view::render(&app, &cx, now, &mut viewport))?;

        let deadline = app.next_deadline(now);
        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if let Some(command) = app.handle_key(key, &cx, Instant::now()) {
                        run_command(command, &api, &tx);
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => error!("Event stream error: {}", e),
                None => break,
            },
            Some(event) = rx.recv() => app.handle_event(event, Instant::now()),
            _ = sleep_until_optional(deadline) => app.tick(Instant::now()),
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}

fn spawn_liveness_check(api: Arc<dyn RegistrationApi>, tx: UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let result = api.is_live().await;
        let _ = tx.send(AppEvent::Live(result));
    });
}

fn run_command(command: Command, api: &Arc<dyn RegistrationApi>, tx: &UnboundedSender<AppEvent>) {
    let tx = tx.clone();
    match command {
        Command::Submit(payload) => {
            let api = api.clone();
            tokio::spawn(async move {
                let result = api.register(payload).await;
                let _ = tx.send(AppEvent::Submitted(result));
            });
        }
        Command::LoadFile {
            index,
            path,
            ticket,
        } => {
            tokio::spawn(async move {
                let result = FilePayload::from_path(&path).await;
                let _ = tx.send(AppEvent::FileLoaded {
                    index,
                    path,
                    ticket,
                    result,
                });
            });
        }
    }
}

async fn sleep_until_optional(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline.into()).await,
        None => std::future::pending().await,
    }
}
