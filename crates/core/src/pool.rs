//! Participant pool
//!
//! Holds the full roster and the participants that have not been drawn yet.

use std::collections::HashSet;

use crate::models::Participant;

/// The roster plus the "not yet drawn" subset
#[derive(Debug, Clone, Default)]
pub struct Pool {
    roster: Vec<Participant>,
    remaining: Vec<Participant>,
    drawn: Vec<u32>,
}

impl Pool {
    /// Build a pool from a parsed roster. Duplicate ids keep the first entry.
    pub fn new(roster: Vec<Participant>) -> Self {
        let mut seen = HashSet::new();
        let roster: Vec<Participant> = roster.into_iter().filter(|p| seen.insert(p.id)).collect();

        Self {
            remaining: roster.clone(),
            roster,
            drawn: Vec::new(),
        }
    }

    /// Everyone who entered the raffle
    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    /// Participants still eligible to win, in current display order
    pub fn remaining(&self) -> &[Participant] {
        &self.remaining
    }

    /// Ids drawn so far, in draw order
    pub fn drawn(&self) -> &[u32] {
        &self.drawn
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn contains(&self, id: u32) -> bool {
        self.remaining.iter().any(|p| p.id == id)
    }

    /// Mutable access to the remaining order, used by the draw engine to shuffle
    pub(crate) fn remaining_mut(&mut self) -> &mut [Participant] {
        &mut self.remaining
    }

    /// Remove the participant at `index` and mark it as drawn
    pub(crate) fn take(&mut self, index: usize) -> Option<Participant> {
        if index >= self.remaining.len() {
            return None;
        }
        let participant = self.remaining.remove(index);
        self.drawn.push(participant.id);
        crate::invariants::assert_pool_invariants(self);
        Some(participant)
    }
}
