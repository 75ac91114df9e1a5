//! Tetris 2048 (workspace facade crate).
//!
//! Re-exports the member crates as `tetris_2048::{core,input,term,types}` and
//! hosts the binary's runtime plumbing: environment configuration and the
//! JSONL session journal.

pub mod config;
pub mod journal;

pub use tetris_2048_core as core;
pub use tetris_2048_input as input;
pub use tetris_2048_term as term;
pub use tetris_2048_types as types;

pub use config::RunConfig;
pub use journal::{JournalRecord, SessionLog};
