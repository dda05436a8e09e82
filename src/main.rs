//! Terminal memory game runner (default binary).
//!
//! Crossterm input, the framebuffer renderer, and an optional JSON control
//! adapter. The engine clock follows wall time in `TICK_MS` steps.

use std::time::{Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use tui_memory::adapter::Adapter;
use tui_memory::core::{GameSnapshot, MemoryGame};
use tui_memory::input::{handle_key_event, should_quit, BoardCursor, InputAction};
use tui_memory::term::{AdapterStatusView, FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_memory::types::{GameAction, GamePhase};
use tui_memory::{logging, AppConfig, FrameClock};

fn main() -> Result<()> {
    let mut config = AppConfig::from_env()?;
    let args: Vec<String> = std::env::args().skip(1).collect();
    config.apply_args(&args)?;

    if let Some(path) = &config.log_path {
        logging::init(path)?;
    }

    let seed = config.seed.unwrap_or_else(clock_seed);
    let game = MemoryGame::new(config.difficulty, config.language, seed)?;
    info!(seed, difficulty = config.difficulty.as_str(), language = config.language.as_str(), "starting");

    let adapter = Adapter::start_from_env()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game, adapter);

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

fn run(term: &mut TerminalRenderer, mut game: MemoryGame, mut adapter: Option<Adapter>) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut last_sent = GameSnapshot::default();
    game.snapshot_into(&mut snap);

    let mut cursor = BoardCursor::new(snap.grid_cols as usize, snap.cards.len());
    let mut generation = game.generation();

    let mut clock = FrameClock::new(Instant::now());

    loop {
        // Render.
        game.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let status = adapter.as_ref().map(|a| {
            let st = a.status();
            AdapterStatusView {
                client_count: st.client_count,
                controller_id: st.controller_id,
            }
        });
        view.render_into_with_adapter(&snap, Some(cursor.index()), status.as_ref(), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = clock.timeout(Instant::now());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        apply_input(&mut game, &mut cursor, action)?;
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if let Some(ms) = clock.advance(Instant::now()) {
            game.tick(ms);
        }

        // Adapter commands.
        if let Some(adapter) = adapter.as_mut() {
            while let Some(cmd) = adapter.try_recv() {
                adapter.handle(&mut game, &cmd);
            }
        }

        // New board: reset the cursor to the new shape.
        if game.generation() != generation {
            generation = game.generation();
            let config = game.config();
            cursor = BoardCursor::new(config.grid_cols as usize, game.cards().len());
        }

        // Observations only when something changed.
        let last_event = game.take_last_event();
        if let Some(adapter) = adapter.as_mut() {
            game.snapshot_into(&mut snap);
            if snap != last_sent {
                adapter.broadcast(&snap, last_event);
                last_sent.clone_from(&snap);
            }
        }
    }
}

/// Apply a key action to the session.
///
/// Engine no-ops (a face-up card, the lock-out after a mismatch) are silent.
fn apply_input(game: &mut MemoryGame, cursor: &mut BoardCursor, action: InputAction) -> Result<()> {
    match action {
        InputAction::Move(dir) => cursor.move_dir(dir),
        InputAction::Flip => {
            if let Some(card) = game.cards().get(cursor.index()) {
                let id = card.id;
                game.apply_action(GameAction::SelectCard(id))?;
            }
        }
        InputAction::NewGame => {
            let action = if game.phase() == GamePhase::Won {
                GameAction::PlayAgain
            } else {
                GameAction::NewGame
            };
            game.apply_action(action)?;
        }
        InputAction::Difficulty(level) => {
            game.apply_action(GameAction::SetDifficulty(level))?;
        }
        InputAction::ToggleLanguage => {
            let language = game.language().toggle();
            game.apply_action(GameAction::SetLanguage(language))?;
        }
    }
    Ok(())
}
