use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::painter::{Direction, PlayerId};
use crate::rng::SeededRng;
use crate::turn::Turn;

/// One connected player as supplied by the roster collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub player_id: PlayerId,
    pub team: u8,
    pub name: String,
}

/// What became of a [`TurnHistory::set_input`] call. Stale indices and vacant
/// player slots are expected under network jitter and are reported, not
/// raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SetInputOutcome {
    /// Input recorded; `replayed` later snapshots were recomputed.
    Applied { replayed: usize },
    StaleTurnIndex,
    UnknownPlayer,
}

impl SetInputOutcome {
    pub fn is_applied(self) -> bool {
        matches!(self, SetInputOutcome::Applied { .. })
    }
}

/// The ordered snapshot sequence. Snapshot `k + 1` is always the evolution of
/// snapshot `k` under `k`'s pending inputs; retroactive input injection
/// recomputes the suffix rather than ever letting the chain diverge.
#[derive(Clone, Debug)]
pub struct TurnHistory {
    turns: Vec<Turn>,
    rng: SeededRng,
}

impl TurnHistory {
    pub fn new(rows: usize, cols: usize, seed: u32) -> Self {
        Self {
            turns: alloc::vec![Turn::new(rows, cols)],
            rng: SeededRng::new(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Index of the latest snapshot.
    pub fn turn_index(&self) -> usize {
        self.turns.len() - 1
    }

    pub fn latest(&self) -> &Turn {
        self.turns
            .last()
            .expect("history always holds at least one snapshot")
    }

    pub fn get(&self, index: usize) -> Option<&Turn> {
        self.turns.get(index)
    }

    /// Evolves the latest snapshot and appends the result. Returns the new
    /// latest index.
    pub fn append(&mut self) -> usize {
        let next = self.latest().evolve();
        self.turns.push(next);
        self.turn_index()
    }

    /// Records `dir` for `player_id` on the snapshot at `turn_index`, then
    /// recomputes every later snapshot. Each recomputed snapshot gets its own
    /// previously recorded pending inputs re-applied, so inputs other players
    /// delivered for later turns survive the correction.
    pub fn set_input(
        &mut self,
        turn_index: usize,
        player_id: PlayerId,
        dir: Direction,
    ) -> SetInputOutcome {
        if turn_index >= self.turns.len() {
            return SetInputOutcome::StaleTurnIndex;
        }
        if !self.turns[turn_index].set_input(player_id, dir) {
            return SetInputOutcome::UnknownPlayer;
        }

        let replayed = self.turns.len() - 1 - turn_index;
        for k in turn_index + 1..self.turns.len() {
            let mut recomputed = self.turns[k - 1].evolve();
            for (id, input) in self.turns[k].pending_inputs().to_vec().into_iter().enumerate() {
                if let Some(input) = input {
                    recomputed.set_input(id, input);
                }
            }
            self.turns[k] = recomputed;
        }

        SetInputOutcome::Applied { replayed }
    }

    /// Seeds a painter into the latest snapshot. Used while the round is
    /// still at its initial snapshot; later joiners wait for [`restart`].
    ///
    /// [`restart`]: TurnHistory::restart
    pub fn admit(&mut self, entry: &RosterEntry) -> bool {
        let rng = &mut self.rng;
        self.turns
            .last_mut()
            .expect("history always holds at least one snapshot")
            .add_painter(entry.player_id, entry.team, entry.name.clone(), rng)
    }

    /// Vacates a painter slot in the latest snapshot.
    pub fn withdraw(&mut self, player_id: PlayerId) -> bool {
        self.turns
            .last_mut()
            .expect("history always holds at least one snapshot")
            .remove_painter(player_id)
    }

    /// Replaces the whole history with one freshly seeded snapshot built from
    /// the current roster.
    pub fn restart(&mut self, roster: &[RosterEntry]) {
        let board = self.latest().board();
        let mut first = Turn::new(board.rows(), board.cols());
        for entry in roster {
            first.add_painter(entry.player_id, entry.team, entry.name.clone(), &mut self.rng);
        }
        self.turns.clear();
        self.turns.push(first);
    }

    /// Test-support check that every snapshot still is the deterministic
    /// successor of its predecessor. Returns the first divergent index.
    pub fn validate_chain(&self) -> Result<(), usize> {
        for k in 1..self.turns.len() {
            let mut expected = self.turns[k - 1].evolve();
            for (id, input) in self.turns[k].pending_inputs().iter().enumerate() {
                if let Some(input) = input {
                    expected.set_input(id, *input);
                }
            }
            if expected != self.turns[k] {
                return Err(k);
            }
        }
        Ok(())
    }
}
