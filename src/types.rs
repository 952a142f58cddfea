//! Common types used throughout the seating waitlist

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Seats at a table, and the key of its capacity class
pub type Capacity = u32;

/// Number of people in a group
pub type PartySize = u32;

/// One pending reservation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientEntry {
    pub name: String,
    pub party_size: PartySize,
    /// Display string only, never parsed
    pub requested_time: String,
    pub joined_at: DateTime<Utc>,
}

impl ClientEntry {
    pub fn new(
        name: impl Into<String>,
        party_size: PartySize,
        requested_time: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            party_size,
            requested_time: requested_time.into(),
            joined_at: crate::utils::current_timestamp(),
        }
    }
}

/// Outcome of a successful call to the next table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingAssignment {
    pub client: ClientEntry,
    pub capacity: Capacity,
}

impl SeatingAssignment {
    pub fn client_name(&self) -> &str {
        &self.client.name
    }
}

impl std::fmt::Display for SeatingAssignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Calling {} for a table of {}.",
            self.client.name, self.capacity
        )
    }
}

/// Free tables of one capacity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCount {
    pub capacity: Capacity,
    pub free: u32,
    pub provisioned: u32,
}

/// Events emitted after a successful mutation of the waitlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WaitlistEvent {
    ClientAdded {
        client: ClientEntry,
        queue_length: usize,
    },
    TableAssigned {
        client: ClientEntry,
        capacity: Capacity,
        tables_left: u32,
    },
    ReservationCancelled {
        client: ClientEntry,
    },
    TableFreed {
        capacity: Capacity,
        free: u32,
    },
}

impl WaitlistEvent {
    /// Short name used as a routing label
    pub fn name(&self) -> &'static str {
        match self {
            WaitlistEvent::ClientAdded { .. } => "ClientAdded",
            WaitlistEvent::TableAssigned { .. } => "TableAssigned",
            WaitlistEvent::ReservationCancelled { .. } => "ReservationCancelled",
            WaitlistEvent::TableFreed { .. } => "TableFreed",
        }
    }
}

/// Event envelope with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub event_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event: WaitlistEvent,
}

impl EventEnvelope {
    pub fn new(event: WaitlistEvent) -> Self {
        Self {
            event_id: crate::utils::generate_event_id(),
            timestamp: crate::utils::current_timestamp(),
            event,
        }
    }
}
