//! Table inventory by capacity class
//!
//! The set of capacity classes is fixed when the inventory is built. Only
//! free counts change afterwards: [`TableInventory::occupy`] takes one table
//! and [`TableInventory::release`] gives one back.

use crate::error::{WaitlistError, WaitlistResult};
use crate::types::{Capacity, PartySize, TableCount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::debug;

/// What happens when a table is freed while its whole class is already free
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeTablePolicy {
    /// Always increment, free counts may exceed what was provisioned
    #[default]
    Uncapped,
    /// Refuse to go above the provisioned count
    CapAtProvisioned,
}

impl FromStr for FreeTablePolicy {
    type Err = WaitlistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uncapped" => Ok(FreeTablePolicy::Uncapped),
            "capped" | "cap_at_provisioned" => Ok(FreeTablePolicy::CapAtProvisioned),
            other => Err(WaitlistError::ConfigurationError {
                message: format!("Unknown free table policy: {}", other),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TableSlot {
    provisioned: u32,
    free: u32,
}

/// Free tables per capacity, iterated in ascending capacity order
#[derive(Debug, Clone)]
pub struct TableInventory {
    slots: BTreeMap<Capacity, TableSlot>,
    policy: FreeTablePolicy,
}

impl TableInventory {
    /// Build an inventory from `(capacity, count)` pairs
    ///
    /// Every listed table starts free. Capacities must be positive and
    /// distinct, and at least one class is required.
    pub fn new<I>(tables: I, policy: FreeTablePolicy) -> WaitlistResult<Self>
    where
        I: IntoIterator<Item = (Capacity, u32)>,
    {
        let mut slots = BTreeMap::new();
        for (capacity, count) in tables {
            if capacity == 0 {
                return Err(WaitlistError::ConfigurationError {
                    message: "Table capacity must be greater than 0".to_string(),
                });
            }
            let slot = TableSlot {
                provisioned: count,
                free: count,
            };
            if slots.insert(capacity, slot).is_some() {
                return Err(WaitlistError::ConfigurationError {
                    message: format!("Duplicate table capacity: {}", capacity),
                });
            }
        }

        if slots.is_empty() {
            return Err(WaitlistError::ConfigurationError {
                message: "At least one table capacity must be configured".to_string(),
            });
        }

        Ok(Self { slots, policy })
    }

    /// Five tables for two, three for four and two for six
    pub fn restaurant_default() -> Self {
        let slots = [(2, 5), (4, 3), (6, 2)]
            .into_iter()
            .map(|(capacity, count)| {
                (
                    capacity,
                    TableSlot {
                        provisioned: count,
                        free: count,
                    },
                )
            })
            .collect();

        Self {
            slots,
            policy: FreeTablePolicy::default(),
        }
    }

    /// Smallest configured capacity that seats `party_size`
    pub fn best_fit(&self, party_size: PartySize) -> Option<Capacity> {
        let capacity = self.slots.range(party_size..).next().map(|(c, _)| *c);
        debug!("Best fit for party of {}: {:?}", party_size, capacity);
        capacity
    }

    /// Free tables of `capacity`, or `None` for an unknown class
    pub fn free_count(&self, capacity: Capacity) -> Option<u32> {
        self.slots.get(&capacity).map(|slot| slot.free)
    }

    /// Take one table of `capacity`, returning the tables left
    pub fn occupy(&mut self, capacity: Capacity) -> WaitlistResult<u32> {
        let slot = self
            .slots
            .get_mut(&capacity)
            .ok_or(WaitlistError::UnknownCapacity { capacity })?;

        slot.free = slot
            .free
            .checked_sub(1)
            .ok_or_else(|| WaitlistError::InternalError {
                message: format!("No free table of capacity {} to occupy", capacity),
            })?;

        Ok(slot.free)
    }

    /// Give back one table of `capacity`, returning the new free count
    pub fn release(&mut self, capacity: Capacity) -> WaitlistResult<u32> {
        let slot = self
            .slots
            .get_mut(&capacity)
            .ok_or(WaitlistError::UnknownCapacity { capacity })?;

        if self.policy == FreeTablePolicy::CapAtProvisioned && slot.free >= slot.provisioned {
            return Err(WaitlistError::TablePoolFull { capacity });
        }

        slot.free = slot.free.saturating_add(1);
        Ok(slot.free)
    }

    pub fn contains(&self, capacity: Capacity) -> bool {
        self.slots.contains_key(&capacity)
    }

    /// Configured capacities in ascending order
    pub fn capacities(&self) -> Vec<Capacity> {
        self.slots.keys().copied().collect()
    }

    /// Current counts in ascending capacity order
    pub fn counts(&self) -> Vec<TableCount> {
        self.slots
            .iter()
            .map(|(capacity, slot)| TableCount {
                capacity: *capacity,
                free: slot.free,
                provisioned: slot.provisioned,
            })
            .collect()
    }

    pub fn policy(&self) -> FreeTablePolicy {
        self.policy
    }
}

impl Default for TableInventory {
    fn default() -> Self {
        Self::restaurant_default()
    }
}
