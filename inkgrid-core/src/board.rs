use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{FIXED_LEVEL, MAX_TEAMS, TEAM_STRIDE};

/// One grid cell, encoded as `team * 10 + level`.
///
/// `team` 0 means unclaimed (level is always 0 there). Levels 0..=3 are trail
/// reinforcement depth; level 4 is permanent territory that no painting
/// operation may alter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Cell(u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidCellEncoding(pub u8);

impl fmt::Display for InvalidCellEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid cell encoding: {}", self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidCellEncoding {}

impl Cell {
    pub const EMPTY: Cell = Cell(0);

    /// Fresh trail head (level 0) for `team`.
    pub fn trail(team: u8) -> Cell {
        debug_assert!(team >= 1 && team <= MAX_TEAMS);
        Cell(team * TEAM_STRIDE)
    }

    /// Permanent territory for `team`.
    pub fn fixed(team: u8) -> Cell {
        debug_assert!(team >= 1 && team <= MAX_TEAMS);
        Cell(team * TEAM_STRIDE + FIXED_LEVEL)
    }

    pub fn from_raw(raw: u8) -> Option<Cell> {
        let team = raw / TEAM_STRIDE;
        let level = raw % TEAM_STRIDE;
        if team > MAX_TEAMS || level > FIXED_LEVEL || (team == 0 && level != 0) {
            return None;
        }
        Some(Cell(raw))
    }

    pub fn raw(self) -> u8 {
        self.0
    }

    pub fn team(self) -> u8 {
        self.0 / TEAM_STRIDE
    }

    pub fn level(self) -> u8 {
        self.0 % TEAM_STRIDE
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_fixed(self) -> bool {
        self.level() == FIXED_LEVEL
    }

    pub fn is_owned_by(self, team: u8) -> bool {
        team != 0 && self.team() == team
    }

    /// One reinforcement step. Caller guarantees the cell is an unfixed cell
    /// of some team.
    pub fn reinforced(self) -> Cell {
        debug_assert!(!self.is_empty() && !self.is_fixed());
        Cell(self.0 + 1)
    }
}

impl TryFrom<u8> for Cell {
    type Error = InvalidCellEncoding;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Cell::from_raw(raw).ok_or(InvalidCellEncoding(raw))
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> u8 {
        cell.raw()
    }
}

/// Row-major grid of cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0);
        Self {
            rows,
            cols,
            cells: vec![Cell::EMPTY; rows * cols],
        }
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Bounds-checked read.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(self.cells[row * self.cols + col])
    }

    pub fn is_edge(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row == self.rows - 1 || col == self.cols - 1
    }

    pub(crate) fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    pub(crate) fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let index = self.index(row, col);
        self.cells[index] = cell;
    }

    pub(crate) fn set_by_index(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    pub(crate) fn cell_by_index(&self, index: usize) -> Cell {
        self.cells[index]
    }
}
