//! Runtime configuration read from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `TETRIS2048_HEIGHT` | 20 |
//! | `TETRIS2048_WIDTH` | 12 |
//! | `TETRIS2048_DIFFICULTY` | `normal` |
//! | `TETRIS2048_SEED` | derived from the clock |
//! | `TETRIS2048_LOG_PATH` | unset (no journal) |
//!
//! Invalid values fall back to the default and leave a warning for the
//! caller to print.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::{BoardDims, Difficulty, DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, MIN_GRID_DIM};

pub const ENV_HEIGHT: &str = "TETRIS2048_HEIGHT";
pub const ENV_WIDTH: &str = "TETRIS2048_WIDTH";
pub const ENV_DIFFICULTY: &str = "TETRIS2048_DIFFICULTY";
pub const ENV_SEED: &str = "TETRIS2048_SEED";
pub const ENV_LOG_PATH: &str = "TETRIS2048_LOG_PATH";

/// Largest accepted grid dimension (keeps the board drawable).
pub const MAX_GRID_DIM: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub dims: BoardDims,
    pub difficulty: Difficulty,
    pub seed: u32,
    pub log_path: Option<String>,
    /// Human-readable notes about ignored values
    pub warnings: Vec<String>,
}

impl RunConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup (the process environment in
    /// production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut warnings = Vec::new();
        let read = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
                .map(|s| (key.to_string(), s))
        };

        let height = read(ENV_HEIGHT);
        let width = read(ENV_WIDTH);
        let difficulty = read(ENV_DIFFICULTY);
        let seed = read(ENV_SEED);
        let log_path = read(ENV_LOG_PATH).map(|(_, s)| s);

        let mut parse_dim = |entry: Option<(String, String)>, default: usize| match entry {
            Some((key, raw)) => match raw.parse::<usize>() {
                Ok(v) if (MIN_GRID_DIM..=MAX_GRID_DIM).contains(&v) => v,
                _ => {
                    warnings.push(format!("ignoring {key}={raw:?}, using {default}"));
                    default
                }
            },
            None => default,
        };
        let height = parse_dim(height, DEFAULT_GRID_HEIGHT);
        let width = parse_dim(width, DEFAULT_GRID_WIDTH);
        let dims = BoardDims::new(height, width).unwrap_or_default();

        let difficulty = match difficulty {
            Some((key, raw)) => Difficulty::from_str(&raw).unwrap_or_else(|| {
                warnings.push(format!("ignoring {key}={raw:?}, using normal"));
                Difficulty::default()
            }),
            None => Difficulty::default(),
        };

        let seed = match seed {
            Some((key, raw)) => raw.parse::<u32>().unwrap_or_else(|_| {
                warnings.push(format!("ignoring {key}={raw:?}, using a clock seed"));
                clock_seed()
            }),
            None => clock_seed(),
        };

        Self {
            dims,
            difficulty,
            seed,
            log_path,
            warnings,
        }
    }
}

/// Seed from the wall clock (sub-second nanos mixed with seconds).
pub fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> RunConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RunConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg.dims, BoardDims::default());
        assert_eq!(cfg.difficulty, Difficulty::Normal);
        assert_eq!(cfg.log_path, None);
        assert!(cfg.warnings.is_empty());
    }

    #[test]
    fn reads_all_values() {
        let cfg = config(&[
            (ENV_HEIGHT, "10"),
            (ENV_WIDTH, " 6 "),
            (ENV_DIFFICULTY, "Lunatic"),
            (ENV_SEED, "42"),
            (ENV_LOG_PATH, "/tmp/session.jsonl"),
        ]);
        assert_eq!(cfg.dims, BoardDims::new(10, 6).unwrap());
        assert_eq!(cfg.difficulty, Difficulty::Lunatic);
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.log_path.as_deref(), Some("/tmp/session.jsonl"));
        assert!(cfg.warnings.is_empty());
    }

    #[test]
    fn invalid_values_fall_back_with_warnings() {
        let cfg = config(&[
            (ENV_HEIGHT, "3"),
            (ENV_WIDTH, "wide"),
            (ENV_DIFFICULTY, "nightmare"),
            (ENV_SEED, "-1"),
            (ENV_LOG_PATH, "   "),
        ]);
        assert_eq!(cfg.dims, BoardDims::default());
        assert_eq!(cfg.difficulty, Difficulty::Normal);
        assert_eq!(cfg.log_path, None);
        assert_eq!(cfg.warnings.len(), 4);
        assert!(cfg.warnings[0].contains(ENV_HEIGHT));
    }
}
