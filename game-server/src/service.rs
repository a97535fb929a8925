use inkgrid_core::{encode_snapshot, Direction, RosterEntry, SetInputOutcome, TurnHistory};
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::roster::Roster;
use crate::types::{PainterView, StateResponse};

/// Everything behind the HTTP surface: the turn history, the roster, and the
/// round lifecycle. All methods are synchronous; callers serialize access
/// through one lock so the simulation stays on a single logical timeline.
pub(crate) struct GameService {
    history: TurnHistory,
    roster: Roster,
    turns_to_restart: u32,
    tick_interval_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Admission {
    pub(crate) session_id: Uuid,
    pub(crate) player_id: usize,
    pub(crate) team: u8,
    pub(crate) seeded: bool,
}

impl GameService {
    pub(crate) fn new(config: &ServerConfig) -> Self {
        Self {
            history: TurnHistory::new(
                config.board_rows,
                config.board_cols,
                config.placement_seed,
            ),
            roster: Roster::new(),
            turns_to_restart: config.turns_to_restart,
            tick_interval_ms: config.tick_interval_ms,
        }
    }

    /// A round has started once the first tick has been recorded. Painters
    /// join the board immediately before that; afterwards they wait for the
    /// next restart so every painter exists across the whole replayable
    /// suffix.
    pub(crate) fn round_started(&self) -> bool {
        self.history.turn_index() > 0
    }

    pub(crate) fn join(&mut self, name: Option<String>) -> Option<Admission> {
        let (session_id, entry) = self.roster.join(name)?;
        let seeded = !self.round_started()
            && self.history.admit(&RosterEntry {
                player_id: entry.player_id,
                team: entry.team,
                name: entry.name.clone(),
            });
        tracing::info!(
            "player joined: session={} player_id={} team={} seeded={}",
            session_id,
            entry.player_id,
            entry.team,
            seeded
        );
        Some(Admission {
            session_id,
            player_id: entry.player_id,
            team: entry.team,
            seeded,
        })
    }

    pub(crate) fn leave(&mut self, session_id: &Uuid) -> Option<usize> {
        let entry = self.roster.leave(session_id)?;
        self.history.withdraw(entry.player_id);
        tracing::info!(
            "player left: session={} player_id={}",
            session_id,
            entry.player_id
        );
        Some(entry.player_id)
    }

    /// Routes an input to the history. `None` means the session is unknown;
    /// a stale index or vacant painter slot comes back as a recoverable
    /// outcome, exactly as the history reports it.
    pub(crate) fn input(
        &mut self,
        session_id: &Uuid,
        direction: Direction,
        turn_index: Option<usize>,
    ) -> Option<SetInputOutcome> {
        let player_id = self.roster.get(session_id)?.player_id;
        let index = turn_index.unwrap_or_else(|| self.history.turn_index());
        let outcome = self.history.set_input(index, player_id, direction);
        if !outcome.is_applied() {
            tracing::debug!(
                "input ignored: player_id={} turn_index={} outcome={:?}",
                player_id,
                index,
                outcome
            );
        }
        Some(outcome)
    }

    /// One step of the tick driver: evolve the latest snapshot, or reseed
    /// the round once it has run its configured length. Idle without players.
    pub(crate) fn tick(&mut self) {
        if self.roster.len() == 0 {
            return;
        }
        if self.turns_to_restart > 0 && self.history.turn_index() as u32 >= self.turns_to_restart {
            self.restart();
            return;
        }
        self.history.append();
    }

    pub(crate) fn restart(&mut self) {
        self.history.restart(&self.roster.entries());
        tracing::info!(
            "round restarted with {} players",
            self.roster.len()
        );
    }

    pub(crate) fn state(&self) -> StateResponse {
        let turn = self.history.latest();
        let board = turn.board();

        let mut team_scores = [0u32; 4];
        let painters: Vec<PainterView> = turn
            .painters()
            .iter()
            .enumerate()
            .filter_map(|(player_id, slot)| slot.as_ref().map(|painter| (player_id, painter)))
            .map(|(player_id, painter)| {
                if let Some(score) = team_scores.get_mut(painter.team as usize - 1) {
                    *score += painter.points;
                }
                PainterView {
                    player_id,
                    row: painter.row,
                    col: painter.col,
                    dir: painter.dir,
                    team: painter.team,
                    alive: painter.alive,
                    points: painter.points,
                    name: painter.name.clone(),
                }
            })
            .collect();

        StateResponse {
            success: true,
            turn_index: self.history.turn_index(),
            rows: board.rows(),
            cols: board.cols(),
            cells: board.cells().iter().map(|cell| cell.raw()).collect(),
            painters,
            team_scores,
            tick_interval_ms: self.tick_interval_ms,
            round_started: self.round_started(),
        }
    }

    pub(crate) fn raw_state(&self) -> Vec<u8> {
        encode_snapshot(self.history.latest(), self.history.turn_index() as u32)
    }

    pub(crate) fn player_count(&self) -> usize {
        self.roster.len()
    }

    pub(crate) fn turn_index(&self) -> usize {
        self.history.turn_index()
    }

    pub(crate) fn board_dims(&self) -> (usize, usize) {
        let board = self.history.latest().board();
        (board.rows(), board.cols())
    }

    pub(crate) fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    pub(crate) fn turns_to_restart(&self) -> u32 {
        self.turns_to_restart
    }
}
