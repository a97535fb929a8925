use std::collections::HashMap;

use inkgrid_core::constants::{MAX_TEAMS, TEAM_SLOTS};
use inkgrid_core::{PlayerId, RosterEntry};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub(crate) struct SessionEntry {
    pub(crate) player_id: PlayerId,
    pub(crate) team: u8,
    pub(crate) name: String,
}

/// Session bookkeeping and team/slot assignment: four teams with four slots
/// each. Slots are handed out slot-major, so the first four players land on
/// four different teams.
#[derive(Debug, Default)]
pub(crate) struct Roster {
    sessions: HashMap<Uuid, SessionEntry>,
    taken: [[bool; TEAM_SLOTS]; MAX_TEAMS as usize],
}

impl Roster {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Takes the first free `(team, slot)` pair. Returns `None` when every
    /// slot is occupied.
    pub(crate) fn join(&mut self, name: Option<String>) -> Option<(Uuid, SessionEntry)> {
        for slot in 0..TEAM_SLOTS {
            for team_index in 0..MAX_TEAMS as usize {
                if self.taken[team_index][slot] {
                    continue;
                }
                self.taken[team_index][slot] = true;
                let player_id = team_index * TEAM_SLOTS + slot;
                let entry = SessionEntry {
                    player_id,
                    team: team_index as u8 + 1,
                    name: name
                        .filter(|name| !name.trim().is_empty())
                        .unwrap_or_else(|| format!("Player {player_id}")),
                };
                let session_id = Uuid::new_v4();
                self.sessions.insert(session_id, entry.clone());
                return Some((session_id, entry));
            }
        }
        None
    }

    pub(crate) fn leave(&mut self, session_id: &Uuid) -> Option<SessionEntry> {
        let entry = self.sessions.remove(session_id)?;
        self.taken[entry.player_id / TEAM_SLOTS][entry.player_id % TEAM_SLOTS] = false;
        Some(entry)
    }

    pub(crate) fn get(&self, session_id: &Uuid) -> Option<&SessionEntry> {
        self.sessions.get(session_id)
    }

    pub(crate) fn len(&self) -> usize {
        self.sessions.len()
    }

    /// The connected players as seed material for a fresh snapshot, ordered
    /// by player id so reseeding stays deterministic.
    pub(crate) fn entries(&self) -> Vec<RosterEntry> {
        let mut entries: Vec<RosterEntry> = self
            .sessions
            .values()
            .map(|entry| RosterEntry {
                player_id: entry.player_id,
                team: entry.team,
                name: entry.name.clone(),
            })
            .collect();
        entries.sort_by_key(|entry| entry.player_id);
        entries
    }
}
