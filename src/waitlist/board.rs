//! Read model for displaying the waitlist

use crate::types::{Capacity, PartySize, TableCount};
use serde::{Deserialize, Serialize};

/// One displayed waitlist line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRow {
    /// 1-based queue position
    pub position: usize,
    pub name: String,
    pub party_size: PartySize,
    pub requested_time: String,
    pub estimated_wait_minutes: u64,
}

/// Waitlist rows and table counts taken from one consistent state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitlistBoard {
    pub rows: Vec<BoardRow>,
    pub tables: Vec<TableCount>,
}

impl WaitlistBoard {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn free_tables(&self, capacity: Capacity) -> Option<u32> {
        self.tables
            .iter()
            .find(|count| count.capacity == capacity)
            .map(|count| count.free)
    }
}
