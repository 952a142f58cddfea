//! Waitlist engine
//!
//! Owns the client queue, the table inventory and the wait estimator. Every
//! operation either applies fully or leaves the state untouched.
//!
//! Seating looks at the head of the queue only. A party further back that
//! could be seated right now still waits behind a head that cannot.

use crate::config::RestaurantSettings;
use crate::error::{WaitlistError, WaitlistResult};
use crate::tables::{FreeTablePolicy, TableInventory};
use crate::types::{Capacity, ClientEntry, PartySize, SeatingAssignment, TableCount};
use crate::wait_time::{WaitTimeConfig, WaitTimeEstimator};
use crate::waitlist::board::{BoardRow, WaitlistBoard};
use crate::waitlist::queue::ClientQueue;
use tracing::{debug, info, warn};

/// Single-actor seating engine
#[derive(Debug, Clone)]
pub struct WaitlistEngine {
    queue: ClientQueue,
    inventory: TableInventory,
    estimator: WaitTimeEstimator,
}

impl WaitlistEngine {
    /// Create an engine with an empty queue
    pub fn new(inventory: TableInventory, estimator: WaitTimeEstimator) -> Self {
        Self {
            queue: ClientQueue::new(),
            inventory,
            estimator,
        }
    }

    /// Create an engine from restaurant settings
    pub fn from_settings(settings: &RestaurantSettings) -> WaitlistResult<Self> {
        let inventory = TableInventory::new(
            settings
                .tables
                .iter()
                .map(|spec| (spec.capacity, spec.count)),
            settings.free_table_policy,
        )?;
        let estimator = WaitTimeEstimator::new(WaitTimeConfig {
            average_turnover_minutes: settings.average_turnover_minutes,
        })?;

        Ok(Self::new(inventory, estimator))
    }

    /// Create an engine from explicit table counts and turnover
    pub fn with_tables<I>(tables: I, average_turnover_minutes: u64) -> WaitlistResult<Self>
    where
        I: IntoIterator<Item = (Capacity, u32)>,
    {
        let inventory = TableInventory::new(tables, FreeTablePolicy::default())?;
        let estimator = WaitTimeEstimator::new(WaitTimeConfig {
            average_turnover_minutes,
        })?;
        Ok(Self::new(inventory, estimator))
    }

    /// Append a client to the tail of the queue
    ///
    /// Party sizes larger than every table are accepted; such a party is
    /// never servable and blocks the queue once it reaches the head.
    pub fn add_client(
        &mut self,
        name: impl Into<String>,
        party_size: PartySize,
        requested_time: impl Into<String>,
    ) -> WaitlistResult<ClientEntry> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(WaitlistError::InvalidInput {
                reason: "Client name cannot be empty".to_string(),
            });
        }
        if party_size == 0 {
            return Err(WaitlistError::InvalidInput {
                reason: "Party size must be greater than 0".to_string(),
            });
        }

        let entry = ClientEntry::new(name, party_size, requested_time);
        if self.inventory.best_fit(party_size).is_none() {
            warn!(
                "Party of {} for '{}' is larger than every configured table",
                party_size, entry.name
            );
        }

        self.queue.push_back(entry.clone());
        info!(
            "Added '{}' (party of {}, requested {}) - queue length: {}",
            entry.name,
            entry.party_size,
            entry.requested_time,
            self.queue.len()
        );

        Ok(entry)
    }

    /// Seat the head of the queue at the smallest fitting free table
    pub fn call_next_table(&mut self) -> WaitlistResult<SeatingAssignment> {
        let head = self.queue.front().ok_or(WaitlistError::EmptyQueue)?;

        let capacity = match self.inventory.best_fit(head.party_size) {
            Some(capacity) if self.inventory.free_count(capacity).unwrap_or(0) > 0 => capacity,
            _ => {
                return Err(WaitlistError::NoTableAvailable {
                    client_name: head.name.clone(),
                    party_size: head.party_size,
                })
            }
        };

        let tables_left = self.inventory.occupy(capacity)?;
        let client = self.queue.pop_front().ok_or(WaitlistError::EmptyQueue)?;

        info!(
            "Seated '{}' (party of {}) at a table for {} - {} left",
            client.name, client.party_size, capacity, tables_left
        );

        Ok(SeatingAssignment { client, capacity })
    }

    /// Remove the first queued client with exactly this name
    pub fn cancel_reservation(&mut self, name: &str) -> WaitlistResult<ClientEntry> {
        match self.queue.remove_first_named(name) {
            Some(entry) => {
                info!(
                    "Cancelled reservation for '{}' - queue length: {}",
                    entry.name,
                    self.queue.len()
                );
                Ok(entry)
            }
            None => Err(WaitlistError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Return one table of `capacity` to the pool
    ///
    /// Returns false when the capacity is not configured or the pool
    /// refuses the table.
    pub fn free_table(&mut self, capacity: Capacity) -> bool {
        self.release_table(capacity).is_ok()
    }

    /// Like [`free_table`](Self::free_table), with the reason on failure
    pub fn release_table(&mut self, capacity: Capacity) -> WaitlistResult<u32> {
        let free = self.inventory.release(capacity)?;
        info!("Freed a table for {} - {} free", capacity, free);
        Ok(free)
    }

    /// Estimated wait in minutes for a party of `party_size`
    pub fn estimate_wait_minutes(&self, party_size: PartySize) -> u64 {
        self.estimator
            .estimate_minutes(&self.queue, &self.inventory, party_size)
    }

    /// Copy of the queue in service order
    pub fn waitlist_snapshot(&self) -> Vec<ClientEntry> {
        self.queue.to_vec()
    }

    /// Free tables of `capacity`, or `None` when it is not configured
    pub fn free_tables(&self, capacity: Capacity) -> Option<u32> {
        self.inventory.free_count(capacity)
    }

    /// Free and provisioned tables per capacity, ascending
    pub fn table_counts(&self) -> Vec<TableCount> {
        self.inventory.counts()
    }

    /// Rows with per-entry estimates plus table counts
    pub fn board(&self) -> WaitlistBoard {
        let rows = self
            .queue
            .iter()
            .enumerate()
            .map(|(index, entry)| BoardRow {
                position: index + 1,
                name: entry.name.clone(),
                party_size: entry.party_size,
                requested_time: entry.requested_time.clone(),
                estimated_wait_minutes: self.estimate_wait_minutes(entry.party_size),
            })
            .collect();

        debug!("Built waitlist board with {} rows", self.queue.len());

        WaitlistBoard {
            rows,
            tables: self.table_counts(),
        }
    }

    pub fn capacities(&self) -> Vec<Capacity> {
        self.inventory.capacities()
    }

    pub fn average_turnover_minutes(&self) -> u64 {
        self.estimator.average_turnover_minutes()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for WaitlistEngine {
    fn default() -> Self {
        Self::new(TableInventory::default(), WaitTimeEstimator::default())
    }
}
