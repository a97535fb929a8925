use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell};
use crate::constants::{MAX_TEAMS, PLACEMENT_PROBE_LIMIT, POINTS_PER_ENCLOSED_CELL};
use crate::error::InvariantCode;
use crate::painter::{Direction, Painter, PlayerId};
use crate::rng::SeededRng;

const ORTHOGONAL_STEPS: [(i64, i64); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// One point-in-time game state: the board, the painter slots (indexed by
/// player id, `None` for absent players), and the directional inputs pending
/// for the next evolution. A snapshot is produced only by initial setup or by
/// [`Turn::evolve`]; the containers are never shared between snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    board: Board,
    painters: Vec<Option<Painter>>,
    pending_inputs: Vec<Option<Direction>>,
}

impl Turn {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            board: Board::new(rows, cols),
            painters: Vec::new(),
            pending_inputs: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        board: Board,
        painters: Vec<Option<Painter>>,
        pending_inputs: Vec<Option<Direction>>,
    ) -> Self {
        Self {
            board,
            painters,
            pending_inputs,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn painters(&self) -> &[Option<Painter>] {
        &self.painters
    }

    pub fn painter(&self, id: PlayerId) -> Option<&Painter> {
        self.painters.get(id).and_then(|slot| slot.as_ref())
    }

    pub fn pending_inputs(&self) -> &[Option<Direction>] {
        &self.pending_inputs
    }

    /// Records a pending input for `id`. Returns `false` when the slot does
    /// not hold a painter; the caller treats that as a recoverable no-op.
    pub fn set_input(&mut self, id: PlayerId, dir: Direction) -> bool {
        match self.painters.get(id) {
            Some(Some(_)) => {
                self.pending_inputs[id] = Some(dir);
                true
            }
            _ => false,
        }
    }

    /// Seeds a painter onto a random unclaimed cell, heading away from the
    /// nearest board edge. Construction-time only; never called mid-evolution.
    pub fn add_painter(
        &mut self,
        id: PlayerId,
        team: u8,
        name: String,
        rng: &mut SeededRng,
    ) -> bool {
        debug_assert!(team >= 1 && team <= MAX_TEAMS);
        if self.painters.len() <= id {
            self.painters.resize(id + 1, None);
            self.pending_inputs.resize(id + 1, None);
        }
        if self.painters[id].is_some() {
            return false;
        }
        let Some((row, col)) = self.find_free_cell(rng) else {
            return false;
        };
        let dir = self.dir_for_pos(row, col);
        self.board.set(row, col, Cell::trail(team));
        self.painters[id] = Some(Painter::new(row, col, dir, team, name));
        self.pending_inputs[id] = None;
        true
    }

    /// Vacates a painter slot. The painter's cell returns to unclaimed unless
    /// it has already become fixed territory.
    pub fn remove_painter(&mut self, id: PlayerId) -> bool {
        let Some(slot) = self.painters.get_mut(id) else {
            return false;
        };
        let Some(painter) = slot.take() else {
            return false;
        };
        self.pending_inputs[id] = None;
        if !self.board.get(painter.row, painter.col).is_fixed() {
            self.board.set(painter.row, painter.col, Cell::EMPTY);
        }
        true
    }

    /// Computes the deterministic successor snapshot. The receiver is left
    /// untouched; board and painter containers are copied, and the successor
    /// starts with a cleared input array sized to its painter slots.
    pub fn evolve(&self) -> Turn {
        let rows = self.board.rows();
        let cols = self.board.cols();
        let slot_count = self.painters.len();
        let mut next = Turn {
            board: self.board.clone(),
            painters: self.painters.clone(),
            pending_inputs: vec![None; slot_count],
        };

        // Direction update and tentative movement. An off-board candidate
        // forces Stop for the tick.
        let mut targets: Vec<Option<(usize, usize)>> = vec![None; slot_count];
        for id in 0..slot_count {
            let Some(painter) = next.painters[id].as_mut() else {
                continue;
            };
            if !painter.alive {
                continue;
            }
            let mut dir = painter.dir;
            if let Some(input) = self.pending_inputs.get(id).copied().flatten() {
                if !input.is_opposite(painter.dir) {
                    dir = input;
                }
            }
            let (dr, dc) = dir.delta();
            let row = painter.row as i64 + dr;
            let col = painter.col as i64 + dc;
            if row < 0 || row >= rows as i64 || col < 0 || col >= cols as i64 {
                dir = Direction::Stop;
            }
            painter.dir = dir;
            targets[id] = Some(if dir == Direction::Stop {
                (painter.row, painter.col)
            } else {
                (row as usize, col as usize)
            });
        }

        // Collision resolution, iterated to a fixed point: stationary
        // painters hold their cells, the lowest id wins a contended free
        // cell, and every loser reverts and becomes a stationary holder
        // itself (so movers chasing a loser's old cell revert too).
        loop {
            let mut held = vec![false; rows * cols];
            for slot in next.painters.iter().flatten() {
                if slot.alive && slot.dir == Direction::Stop {
                    held[slot.row * cols + slot.col] = true;
                }
            }

            let mut claimed: Vec<Option<PlayerId>> = vec![None; rows * cols];
            let mut reverted: Vec<PlayerId> = Vec::new();
            for id in 0..slot_count {
                let Some(painter) = next.painters[id].as_ref() else {
                    continue;
                };
                if !painter.alive || painter.dir == Direction::Stop {
                    continue;
                }
                let Some((row, col)) = targets[id] else {
                    continue;
                };
                let index = row * cols + col;
                if held[index] {
                    reverted.push(id);
                    continue;
                }
                match claimed[index] {
                    None => claimed[index] = Some(id),
                    Some(winner) if id < winner => {
                        reverted.push(winner);
                        claimed[index] = Some(id);
                    }
                    Some(_) => reverted.push(id),
                }
            }

            if reverted.is_empty() {
                break;
            }
            for id in reverted {
                if let Some(painter) = next.painters[id].as_mut() {
                    painter.dir = Direction::Stop;
                    targets[id] = Some((painter.row, painter.col));
                }
            }
        }

        // Trail painting and area claims for everyone who actually moved.
        for id in 0..slot_count {
            let (team, row, col) = match next.painters[id].as_mut() {
                Some(painter) if painter.alive && painter.dir != Direction::Stop => {
                    let Some((row, col)) = targets[id] else {
                        continue;
                    };
                    painter.row = row;
                    painter.col = col;
                    (painter.team, row, col)
                }
                _ => continue,
            };

            let cell = next.board.get(row, col);
            if cell.is_fixed() {
                // Walls are never repainted, whoever owns them.
                continue;
            }
            if cell.is_owned_by(team) {
                let reinforced = cell.reinforced();
                next.board.set(row, col, reinforced);
                let mut gained = 1;
                if reinforced.is_fixed() {
                    gained += claim_enclosed(&mut next.board, team, row, col);
                }
                if let Some(painter) = next.painters[id].as_mut() {
                    painter.points += gained;
                }
            } else {
                next.board.set(row, col, Cell::trail(team));
            }
        }

        next
    }

    pub fn validate_invariants(&self) -> Result<(), InvariantCode> {
        if self.board.cells().len() != self.board.rows() * self.board.cols() {
            return Err(InvariantCode::BoardShape);
        }
        if self
            .board
            .cells()
            .iter()
            .any(|cell| Cell::from_raw(cell.raw()).is_none())
        {
            return Err(InvariantCode::CellEncoding);
        }
        if self.pending_inputs.len() != self.painters.len() {
            return Err(InvariantCode::InputSlotCount);
        }
        for painter in self.painters.iter().flatten() {
            if painter.row >= self.board.rows() || painter.col >= self.board.cols() {
                return Err(InvariantCode::PainterBounds);
            }
            if painter.team == 0 || painter.team > MAX_TEAMS {
                return Err(InvariantCode::PainterTeamRange);
            }
        }
        Ok(())
    }

    fn find_free_cell(&self, rng: &mut SeededRng) -> Option<(usize, usize)> {
        let rows = self.board.rows();
        let cols = self.board.cols();
        for _ in 0..PLACEMENT_PROBE_LIMIT {
            let row = rng.next_index(rows);
            let col = rng.next_index(cols);
            if self.board.get(row, col).is_empty() && !self.cell_occupied(row, col) {
                return Some((row, col));
            }
        }

        let total = rows * cols;
        let offset = rng.next_index(total);
        for step in 0..total {
            let index = (offset + step) % total;
            let (row, col) = (index / cols, index % cols);
            if self.board.cell_by_index(index).is_empty() && !self.cell_occupied(row, col) {
                return Some((row, col));
            }
        }
        None
    }

    fn cell_occupied(&self, row: usize, col: usize) -> bool {
        self.painters
            .iter()
            .flatten()
            .any(|painter| painter.row == row && painter.col == col)
    }

    fn dir_for_pos(&self, row: usize, col: usize) -> Direction {
        let rows = self.board.rows();
        let cols = self.board.cols();

        // Clearance to the nearest edge on each axis; head along the axis
        // with more room, toward the far side.
        let row_clearance = core::cmp::min(row + 1, rows - row);
        let col_clearance = core::cmp::min(col + 1, cols - col);

        if row_clearance < col_clearance {
            if 2 * row < rows {
                Direction::Down
            } else {
                Direction::Up
            }
        } else if 2 * col < cols {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

/// Flood-fills out of a freshly fixed cell of `team` at `(row, col)` and
/// converts every fully enclosed pocket to fixed territory. Returns the
/// points gained.
///
/// Each of the four neighbour branches carries its own marker in a shared
/// mark grid. A region is open as soon as it touches the board edge or a
/// cell marked by an earlier branch: enclosed branches turn into walls
/// before the next branch runs, so a surviving foreign marker always
/// belongs to a region already proven open.
fn claim_enclosed(board: &mut Board, team: u8, row: usize, col: usize) -> u32 {
    let rows = board.rows();
    let cols = board.cols();
    let mut marks = vec![0u8; rows * cols];
    let mut stack: Vec<usize> = Vec::new();
    let mut region: Vec<usize> = Vec::new();
    let mut total = 0u32;

    for (branch, (dr, dc)) in ORTHOGONAL_STEPS.into_iter().enumerate() {
        let marker = (branch + 1) as u8;
        let seed_row = row as i64 + dr;
        let seed_col = col as i64 + dc;
        if seed_row < 0 || seed_row >= rows as i64 || seed_col < 0 || seed_col >= cols as i64 {
            continue;
        }
        let seed = seed_row as usize * cols + seed_col as usize;
        if marks[seed] != 0 || wall_for(board.cell_by_index(seed), team) {
            continue;
        }

        region.clear();
        let mut open = false;
        marks[seed] = marker;
        stack.push(seed);
        while let Some(index) = stack.pop() {
            region.push(index);
            let (r, c) = (index / cols, index % cols);
            if r == 0 || c == 0 || r == rows - 1 || c == cols - 1 {
                open = true;
            }
            for (dr, dc) in ORTHOGONAL_STEPS {
                let nr = r as i64 + dr;
                let nc = c as i64 + dc;
                if nr < 0 || nr >= rows as i64 || nc < 0 || nc >= cols as i64 {
                    continue;
                }
                let neighbour = nr as usize * cols + nc as usize;
                if wall_for(board.cell_by_index(neighbour), team) {
                    continue;
                }
                match marks[neighbour] {
                    0 => {
                        marks[neighbour] = marker;
                        stack.push(neighbour);
                    }
                    m if m == marker => {}
                    _ => open = true,
                }
            }
        }

        if !open {
            for &index in &region {
                board.set_by_index(index, Cell::fixed(team));
            }
            total += POINTS_PER_ENCLOSED_CELL * region.len() as u32;
        }
    }

    total
}

fn wall_for(cell: Cell, team: u8) -> bool {
    cell.is_fixed() && cell.is_owned_by(team)
}

#[cfg(test)]
mod tests;
