use alloc::string::String;

use serde::{Deserialize, Serialize};

/// Stable player identifier; doubles as the painter slot index inside a
/// snapshot and as the battle tie-break key.
pub type PlayerId = usize;

/// Movement heading. The discriminants are the wire codes inherited by the
/// snapshot codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Right = 0,
    Down = 1,
    Left = 2,
    Up = 3,
    Stop = 4,
}

impl Direction {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Direction> {
        match code {
            0 => Some(Direction::Right),
            1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            3 => Some(Direction::Up),
            4 => Some(Direction::Stop),
            _ => None,
        }
    }

    /// `(row, col)` step increment.
    pub fn delta(self) -> (i64, i64) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
            Direction::Stop => (0, 0),
        }
    }

    /// Right/Left and Up/Down are the opposite pairs; `Stop` opposes nothing.
    pub fn is_opposite(self, other: Direction) -> bool {
        self != other
            && self != Direction::Stop
            && other != Direction::Stop
            && self.code() % 2 == other.code() % 2
    }
}

/// The movable per-player entity. Owned exclusively by the snapshot holding
/// it; evolution copies, never shares.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Painter {
    pub row: usize,
    pub col: usize,
    pub dir: Direction,
    pub team: u8,
    pub alive: bool,
    pub points: u32,
    pub name: String,
}

impl Painter {
    pub fn new(row: usize, col: usize, dir: Direction, team: u8, name: String) -> Self {
        Self {
            row,
            col,
            dir,
            team,
            alive: true,
            points: 0,
            name,
        }
    }
}
