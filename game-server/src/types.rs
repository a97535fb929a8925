use inkgrid_core::Direction;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JoinRequest {
    #[serde(default)]
    pub(crate) name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct JoinResponse {
    pub(crate) success: bool,
    pub(crate) session_id: Uuid,
    pub(crate) player_id: usize,
    pub(crate) team: u8,
    /// Whether a painter was placed immediately. Joiners of a running round
    /// hold their slot and get seeded at the next restart.
    pub(crate) seeded: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct LeaveRequest {
    pub(crate) session_id: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct InputRequest {
    pub(crate) session_id: Uuid,
    pub(crate) direction: Direction,
    /// Snapshot the input belongs to; defaults to the latest one.
    #[serde(default)]
    pub(crate) turn_index: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct InputResponse {
    pub(crate) success: bool,
    pub(crate) outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) replayed: Option<usize>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PainterView {
    pub(crate) player_id: usize,
    pub(crate) row: usize,
    pub(crate) col: usize,
    pub(crate) dir: Direction,
    pub(crate) team: u8,
    pub(crate) alive: bool,
    pub(crate) points: u32,
    pub(crate) name: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct StateResponse {
    pub(crate) success: bool,
    pub(crate) turn_index: usize,
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) cells: Vec<u8>,
    pub(crate) painters: Vec<PainterView>,
    pub(crate) team_scores: [u32; 4],
    pub(crate) tick_interval_ms: u64,
    pub(crate) round_started: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) service: &'static str,
    pub(crate) players: usize,
    pub(crate) turn_index: usize,
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) tick_interval_ms: u64,
    pub(crate) turns_to_restart: u32,
}
