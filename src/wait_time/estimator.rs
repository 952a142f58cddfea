//! Queue-pressure wait time estimation
//!
//! The estimate counts every queued party no larger than the query, then
//! subtracts the free tables of the best-fit class. Each remaining party
//! costs one average table turnover.

use crate::error::{WaitlistError, WaitlistResult};
use crate::tables::TableInventory;
use crate::types::PartySize;
use crate::waitlist::ClientQueue;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Configuration for wait time estimates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitTimeConfig {
    /// Average minutes a table stays occupied
    pub average_turnover_minutes: u64,
}

impl Default for WaitTimeConfig {
    fn default() -> Self {
        Self {
            average_turnover_minutes: 30,
        }
    }
}

impl WaitTimeConfig {
    /// Validate configuration values
    pub fn validate(&self) -> WaitlistResult<()> {
        if self.average_turnover_minutes == 0 {
            return Err(WaitlistError::ConfigurationError {
                message: "average_turnover_minutes must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Estimates minutes until a party of a given size is likely seated
#[derive(Debug, Clone)]
pub struct WaitTimeEstimator {
    config: WaitTimeConfig,
}

impl WaitTimeEstimator {
    pub fn new(config: WaitTimeConfig) -> WaitlistResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn average_turnover_minutes(&self) -> u64 {
        self.config.average_turnover_minutes
    }

    pub fn average_turnover(&self) -> Duration {
        Duration::from_secs(self.config.average_turnover_minutes * 60)
    }

    /// Estimated wait in minutes, never negative
    pub fn estimate_minutes(
        &self,
        queue: &ClientQueue,
        inventory: &TableInventory,
        party_size: PartySize,
    ) -> u64 {
        let count = queue.count_fitting(party_size) as u64;
        let free = inventory
            .best_fit(party_size)
            .and_then(|capacity| inventory.free_count(capacity))
            .unwrap_or(0) as u64;

        // With no fitting table or none free this is count * turnover
        let waiting = count.saturating_sub(free);
        let minutes = waiting.saturating_mul(self.config.average_turnover_minutes);

        debug!(
            "Estimated wait for party of {}: {} min (fitting: {}, free: {})",
            party_size, minutes, count, free
        );

        minutes
    }
}

impl Default for WaitTimeEstimator {
    fn default() -> Self {
        Self {
            config: WaitTimeConfig::default(),
        }
    }
}
