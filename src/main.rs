//! Terminal runner (default binary).
//!
//! Polls crossterm input until the next tick, feeds intents and elapsed time
//! to the game, and redraws through the framebuffer renderer when something
//! changed.

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};
use log::info;

use tile_tetris::core::{Game, GameSnapshot};
use tile_tetris::input::{should_quit, InputHandler};
use tile_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tile_tetris::types::{Intent, TICK_MS};
use tile_tetris::{Settings, SettingsStore};

#[derive(Debug, Parser)]
#[command(name = "tile-tetris")]
#[command(about = "Falling-block puzzle game for the terminal")]
struct Args {
    /// Seed for the piece generator (overrides the settings file).
    #[arg(long)]
    seed: Option<u32>,

    /// Settings file (defaults to $TILE_TETRIS_CONFIG or the XDG config dir).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings to the settings file and exit.
    #[arg(long, default_value_t = false)]
    write_config: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr; redirect it when raising the level during play.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let store = match &args.config {
        Some(path) => SettingsStore::at(path),
        None => SettingsStore::from_env(),
    };
    let mut settings = store.load();
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    if args.write_config {
        store.save(&settings)?;
        println!("wrote {}", store.path().display());
        return Ok(());
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, settings);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, settings: Settings) -> Result<()> {
    let mut game = Game::with_config(settings.game, settings.seed.unwrap_or_else(clock_seed));
    info!("session started with seed {}", game.seed());

    let view = GameView::default();
    let mut input = InputHandler::new().with_release_events(term.reports_key_release());
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_update = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            game.snapshot_into(&mut snap);
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_update.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(intent) = input.handle_key_event(key) {
                        if intent == Intent::Reset {
                            // The session forgets held keys; so does the tracker.
                            input.reset();
                        }
                        game.apply_intent(intent);
                        dirty = true;
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        for intent in input.update() {
            game.apply_intent(intent);
        }

        let elapsed = last_update.elapsed();
        if elapsed >= tick {
            last_update = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            dirty |= game.update(elapsed_ms);
        }
    }
}
