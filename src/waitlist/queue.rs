//! Ordered client queue
//!
//! Arrival order is the queue order. Removal from any position keeps the
//! relative order of the survivors.

use crate::types::{ClientEntry, PartySize};
use std::collections::VecDeque;

/// FIFO of pending clients with first-match removal by name
#[derive(Debug, Clone, Default)]
pub struct ClientQueue {
    entries: VecDeque<ClientEntry>,
}

impl ClientQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a client at the tail
    pub fn push_back(&mut self, entry: ClientEntry) {
        self.entries.push_back(entry);
    }

    /// The client that would be served next
    pub fn front(&self) -> Option<&ClientEntry> {
        self.entries.front()
    }

    pub fn pop_front(&mut self) -> Option<ClientEntry> {
        self.entries.pop_front()
    }

    /// Remove the first client, head to tail, whose name matches exactly
    pub fn remove_first_named(&mut self, name: &str) -> Option<ClientEntry> {
        let index = self.entries.iter().position(|entry| entry.name == name)?;
        self.entries.remove(index)
    }

    /// Number of queued parties no larger than `party_size`
    pub fn count_fitting(&self, party_size: PartySize) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.party_size <= party_size)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClientEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owned copy of the queue in order
    pub fn to_vec(&self) -> Vec<ClientEntry> {
        self.entries.iter().cloned().collect()
    }
}
