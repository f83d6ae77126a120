#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use flappypipes::app::App;
use flappypipes::components::Input;
use flappypipes::config::{Config, loader};
use flappypipes::ui;
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

fn main() -> Result<()> {
    // Create log file and redirect stderr to it
    let log_path = "flappypipes.log";
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_path)
        .with_context(|| format!("failed to create log file {log_path}"))?;

    // Redirect stderr to the log file
    let stderr_fd = std::io::stderr().as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: both descriptors are open for the duration of the call
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    // Configure the logger to use stderr (which is now redirected to our file)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Flappy Pipes");

    let config = match loader::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            // Continue with default configuration
            Config::default()
        }
    };
    Config::install(config.clone());

    let render_rate = Duration::from_millis(config.timing.render_tick_ms);
    let game_tick_rate = Duration::from_millis(config.timing.game_tick_ms);
    let app = App::new(config)?;

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, render_rate, game_tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Game error: {err:?}");
        return Err(err);
    }

    info!("Bye");
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    render_rate: Duration,
    game_tick_rate: Duration,
) -> Result<()> {
    let mut last_render = Instant::now();
    let mut last_game_tick = Instant::now();

    // Drop anything typed before the game started
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    loop {
        if last_render.elapsed() >= render_rate {
            terminal.draw(|f| ui::render(f, &app))?;
            last_render = Instant::now();
        }

        if last_game_tick.elapsed() >= game_tick_rate {
            last_game_tick = Instant::now();
            app.on_tick();
        }

        if app.should_quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(2))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                debug!("Key event: {key:?}");

                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
                    KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') => {
                        app.world.resource_mut::<Input>().flap = true;
                    }
                    KeyCode::Char('r') => app.world.resource_mut::<Input>().reset = true,
                    KeyCode::Char('c') => match Config::force_reload() {
                        Ok(config) => {
                            if let Err(e) = app.apply_config(config) {
                                error!("Config not applied: {e:#}");
                            }
                        }
                        Err(e) => error!("Config reload failed: {e}"),
                    },
                    KeyCode::Char('d') => {
                        let next = app.difficulty.next();
                        if let Err(e) = app.set_difficulty(next) {
                            error!("Difficulty change failed: {e:#}");
                        }
                    }
                    _ => {}
                }
            }
        }
    }
}
