use std::{
    env,
    time::{SystemTime, UNIX_EPOCH},
};

use inkgrid_core::constants::{
    DEFAULT_BOARD_COLS, DEFAULT_BOARD_ROWS, DEFAULT_TICK_INTERVAL_MS, DEFAULT_TURNS_TO_RESTART,
};

#[derive(Debug, Clone)]
pub(crate) struct ServerConfig {
    pub(crate) bind_addr: String,
    pub(crate) board_rows: usize,
    pub(crate) board_cols: usize,
    pub(crate) tick_interval_ms: u64,
    /// Turn count after which the round is reseeded; zero disables.
    pub(crate) turns_to_restart: u32,
    pub(crate) placement_seed: u32,
}

impl ServerConfig {
    pub(crate) fn from_env() -> Self {
        Self {
            bind_addr: env::var("API_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            board_rows: read_env_usize("BOARD_ROWS", DEFAULT_BOARD_ROWS),
            board_cols: read_env_usize("BOARD_COLS", DEFAULT_BOARD_COLS),
            tick_interval_ms: read_env_u64("TICK_INTERVAL_MS", DEFAULT_TICK_INTERVAL_MS),
            turns_to_restart: read_env_u32_allow_zero("TURNS_TO_RESTART", DEFAULT_TURNS_TO_RESTART),
            placement_seed: read_env_u32("PLACEMENT_SEED", seed_from_clock()),
        }
    }
}

fn seed_from_clock() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos() ^ elapsed.as_secs() as u32)
        .unwrap_or(0x1234_5678)
}

pub(crate) fn read_env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_u32_allow_zero(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<u32>().ok())
        .unwrap_or(default)
}
