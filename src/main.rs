//! Terminal Tetris 2048 runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `term`.
//! Configuration comes from `TETRIS2048_*` environment variables.

use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use tetris_2048::core::{GameSnapshot, GameState, GameStatus};
use tetris_2048::input::{
    handle_key_event, is_menu_key, is_start_key, menu_difficulty, should_quit,
};
use tetris_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetris_2048::types::{GameAction, TICK_MS};
use tetris_2048::{RunConfig, SessionLog};

type Journal = SessionLog<BufWriter<File>>;

fn main() -> Result<()> {
    let config = RunConfig::from_env();
    for warning in &config.warnings {
        eprintln!("[tetris-2048] {}", warning);
    }

    let journal = match &config.log_path {
        Some(path) => Some(SessionLog::open(path)?),
        None => None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, journal);

    // Always try to restore terminal state.
    let _ = term.exit();

    let game = result?;
    eprintln!(
        "[tetris-2048] {} after {} pieces, score {} (seed {})",
        game.status().as_str(),
        game.pieces_locked(),
        game.score(),
        game.seed()
    );
    Ok(())
}

/// Tracks what the journal has been told about the current episode.
struct Session {
    game: GameState,
    journal: Option<Journal>,
    open: bool,
}

impl Session {
    fn begin(&mut self) -> Result<()> {
        self.game.start();
        if let Some(journal) = self.journal.as_mut() {
            journal.session_start(&self.game)?;
        }
        self.open = true;
        Ok(())
    }

    fn end(&mut self, result: &'static str) -> Result<()> {
        if !self.open {
            return Ok(());
        }
        self.open = false;
        if let Some(journal) = self.journal.as_mut() {
            journal.session_end(&self.game, result)?;
        }
        Ok(())
    }

    /// Journal any lock from the last step and close the episode when it finishes.
    fn observe(&mut self) -> Result<()> {
        if let Some(locked) = self.game.take_last_lock() {
            if let Some(journal) = self.journal.as_mut() {
                journal.lock(&self.game, &locked)?;
            }
        }
        if self.open && self.game.status().is_finished() {
            self.open = false;
            if let Some(journal) = self.journal.as_mut() {
                journal.session_finished(&self.game)?;
            }
        }
        Ok(())
    }

    /// Returns false when the player asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if should_quit(key) {
            self.end("quit")?;
            return Ok(false);
        }

        if self.game.status() == GameStatus::NotStarted {
            if key.kind != KeyEventKind::Press {
                return Ok(true);
            }
            if let Some(difficulty) = menu_difficulty(key) {
                self.game.set_difficulty(difficulty);
            } else if is_start_key(key) {
                self.begin()?;
            }
            return Ok(true);
        }

        if is_menu_key(key) {
            self.end("abandoned")?;
            self.game.reset();
            return Ok(true);
        }

        match handle_key_event(key) {
            Some(GameAction::Restart) => {
                if key.kind == KeyEventKind::Press {
                    self.end("restarted")?;
                    self.game.reset();
                    self.begin()?;
                }
            }
            // Terminal auto-repeat only applies to movement.
            Some(action @ (GameAction::Pause | GameAction::HardDrop)) => {
                if key.kind == KeyEventKind::Press {
                    self.game.apply_action(action);
                }
            }
            Some(action) => {
                self.game.apply_action(action);
            }
            None => {}
        }
        Ok(true)
    }
}

fn run(
    term: &mut TerminalRenderer,
    config: &RunConfig,
    journal: Option<Journal>,
) -> Result<GameState> {
    let mut session = Session {
        game: GameState::new(config.dims, config.difficulty, config.seed),
        journal,
        open: false,
    };

    let view = GameView::default();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        session.game.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if !session.handle_key(key)? {
                        return Ok(session.game);
                    }
                    session.observe()?;
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            session.game.tick(elapsed.as_millis() as u32);
            session.observe()?;
        }
    }
}
