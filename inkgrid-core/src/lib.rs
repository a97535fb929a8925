#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod board;
pub mod codec;
pub mod constants;
pub mod error;
pub mod history;
pub mod painter;
pub mod rng;
pub mod turn;

pub use board::{Board, Cell};
pub use codec::{decode_snapshot, encode_snapshot};
pub use error::{CodecError, InvariantCode};
pub use history::{RosterEntry, SetInputOutcome, TurnHistory};
pub use painter::{Direction, Painter, PlayerId};
pub use turn::Turn;
