//! Session journal - one JSON object per line.
//!
//! Enabled with `TETRIS2048_LOG_PATH`. Records a `session_start` when a game
//! begins, a `lock` for every piece that lands, and a `session_end` when the
//! game is won, lost, restarted, or abandoned.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::{GameState, GameStatus, LockedPiece};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JournalRecord {
    SessionStart {
        seq: u64,
        ts: u64,
        episode: u32,
        seed: u32,
        difficulty: &'static str,
        height: usize,
        width: usize,
    },
    #[serde(rename_all = "camelCase")]
    Lock {
        seq: u64,
        ts: u64,
        episode: u32,
        piece: &'static str,
        overflowed: bool,
        merges: u32,
        rows_cleared: u32,
        settle_drops: u32,
        rounds: u32,
        score_gained: u64,
        score: u64,
        win: bool,
    },
    #[serde(rename_all = "camelCase")]
    SessionEnd {
        seq: u64,
        ts: u64,
        episode: u32,
        result: &'static str,
        score: u64,
        pieces_locked: u32,
    },
}

/// Appends [`JournalRecord`]s to any writer.
pub struct SessionLog<W: Write> {
    out: W,
    seq: u64,
    buf: Vec<u8>,
}

impl SessionLog<BufWriter<File>> {
    /// Open (or create) `path` in append mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open session log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> SessionLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            seq: 0,
            buf: Vec::with_capacity(256),
        }
    }

    pub fn session_start(&mut self, game: &GameState) -> Result<()> {
        let dims = game.dims();
        let record = JournalRecord::SessionStart {
            seq: self.next_seq(),
            ts: now_ms(),
            episode: game.episode_id(),
            seed: game.seed(),
            difficulty: game.difficulty().as_str(),
            height: dims.height(),
            width: dims.width(),
        };
        self.write(&record)
    }

    pub fn lock(&mut self, game: &GameState, locked: &LockedPiece) -> Result<()> {
        let e = locked.event;
        let record = JournalRecord::Lock {
            seq: self.next_seq(),
            ts: now_ms(),
            episode: game.episode_id(),
            piece: locked.kind.as_str(),
            overflowed: e.overflowed,
            merges: e.merges,
            rows_cleared: e.rows_cleared,
            settle_drops: e.settle_drops,
            rounds: e.rounds,
            score_gained: e.score_gained,
            score: locked.score,
            win: e.win,
        };
        self.write(&record)
    }

    /// `result` is the finished status, or why the session was cut short.
    pub fn session_end(&mut self, game: &GameState, result: &'static str) -> Result<()> {
        let record = JournalRecord::SessionEnd {
            seq: self.next_seq(),
            ts: now_ms(),
            episode: game.episode_id(),
            result,
            score: game.score(),
            pieces_locked: game.pieces_locked(),
        };
        self.write(&record)
    }

    /// End record for a session that finished on its own.
    pub fn session_finished(&mut self, game: &GameState) -> Result<()> {
        let result = match game.status() {
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
            _ => "abandoned",
        };
        self.session_end(game, result)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    fn write(&mut self, record: &JournalRecord) -> Result<()> {
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, record).context("failed to encode journal record")?;
        self.buf.push(b'\n');
        self.out
            .write_all(&self.buf)
            .and_then(|_| self.out.flush())
            .context("failed to write session log")
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
