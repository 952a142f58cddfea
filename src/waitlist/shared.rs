//! Shared waitlist for multiple callers
//!
//! One mutex guards the whole engine, so queue and inventory changes are
//! serialized. Events are published and metrics recorded after the lock is
//! released; a failing publisher is logged and never fails the operation.

use crate::error::{WaitlistError, WaitlistResult};
use crate::events::EventPublisher;
use crate::metrics::MetricsCollector;
use crate::types::{Capacity, ClientEntry, PartySize, SeatingAssignment, TableCount, WaitlistEvent};
use crate::waitlist::board::WaitlistBoard;
use crate::waitlist::engine::WaitlistEngine;
use std::sync::{Arc, Mutex};
use tracing::{debug, error, warn};

/// Counters about waitlist operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WaitlistStats {
    /// Total clients added
    pub clients_added: u64,
    /// Total parties seated
    pub parties_seated: u64,
    /// Total reservations cancelled
    pub reservations_cancelled: u64,
    /// Total tables freed
    pub tables_freed: u64,
    /// Total rejected operations
    pub failed_operations: u64,
    /// Current number of clients waiting
    pub clients_waiting: usize,
}

/// Lock-guarded waitlist engine with events and metrics
#[derive(Clone)]
pub struct SharedWaitlist {
    engine: Arc<Mutex<WaitlistEngine>>,
    event_publisher: Arc<dyn EventPublisher>,
    metrics_collector: Arc<MetricsCollector>,
    stats: Arc<Mutex<WaitlistStats>>,
}

impl SharedWaitlist {
    /// Wrap an engine for shared use
    pub fn new(
        engine: WaitlistEngine,
        event_publisher: Arc<dyn EventPublisher>,
        metrics_collector: Arc<MetricsCollector>,
    ) -> Self {
        metrics_collector.update_free_tables(&engine.table_counts());

        Self {
            engine: Arc::new(Mutex::new(engine)),
            event_publisher,
            metrics_collector,
            stats: Arc::new(Mutex::new(WaitlistStats::default())),
        }
    }

    fn with_engine<T>(&self, f: impl FnOnce(&mut WaitlistEngine) -> T) -> WaitlistResult<T> {
        let mut engine = self
            .engine
            .lock()
            .map_err(|_| WaitlistError::InternalError {
                message: "Failed to acquire waitlist lock".to_string(),
            })?;
        Ok(f(&mut engine))
    }

    fn update_stats(&self, f: impl FnOnce(&mut WaitlistStats)) -> WaitlistResult<()> {
        let mut stats = self
            .stats
            .lock()
            .map_err(|_| WaitlistError::InternalError {
                message: "Failed to acquire stats lock".to_string(),
            })?;
        f(&mut stats);
        Ok(())
    }

    fn record_failure(&self, operation: &str, err: &WaitlistError) {
        warn!("{} rejected ({}): {}", operation, err.kind(), err);
        self.metrics_collector.record_failure(err.kind());
        if let Err(e) = self.update_stats(|stats| stats.failed_operations += 1) {
            error!("Failed to update waitlist stats: {}", e);
        }
    }

    async fn publish(&self, event: WaitlistEvent) {
        let name = event.name();
        if let Err(e) = self.event_publisher.publish(event).await {
            error!("Failed to publish {} event: {}", name, e);
        }
    }

    /// Append a client to the waitlist
    pub async fn add_client(
        &self,
        name: impl Into<String>,
        party_size: PartySize,
        requested_time: impl Into<String>,
    ) -> WaitlistResult<ClientEntry> {
        let timer = self.metrics_collector.start_timer();
        let name = name.into();
        let requested_time = requested_time.into();

        let outcome = self.with_engine(|engine| {
            engine
                .add_client(name, party_size, requested_time)
                .map(|entry| (entry, engine.len()))
        })?;
        self.metrics_collector
            .record_operation("add_client", timer.stop());

        let (entry, queue_length) = match outcome {
            Ok(added) => added,
            Err(e) => {
                self.record_failure("add_client", &e);
                return Err(e);
            }
        };

        self.metrics_collector.record_client_added(queue_length);
        self.update_stats(|stats| {
            stats.clients_added += 1;
            stats.clients_waiting = queue_length;
        })?;

        self.publish(WaitlistEvent::ClientAdded {
            client: entry.clone(),
            queue_length,
        })
        .await;

        Ok(entry)
    }

    /// Seat the head of the waitlist if a best-fit table is free
    pub async fn call_next_table(&self) -> WaitlistResult<SeatingAssignment> {
        let timer = self.metrics_collector.start_timer();

        let outcome = self.with_engine(|engine| {
            engine.call_next_table().map(|assignment| {
                let tables_left = engine.free_tables(assignment.capacity).unwrap_or(0);
                (assignment, tables_left, engine.len(), engine.table_counts())
            })
        })?;
        self.metrics_collector
            .record_operation("call_next_table", timer.stop());

        let (assignment, tables_left, queue_length, counts) = match outcome {
            Ok(seated) => seated,
            Err(e) => {
                self.record_failure("call_next_table", &e);
                return Err(e);
            }
        };

        self.metrics_collector
            .record_party_seated(assignment.capacity, queue_length);
        self.metrics_collector.update_free_tables(&counts);
        self.update_stats(|stats| {
            stats.parties_seated += 1;
            stats.clients_waiting = queue_length;
        })?;

        self.publish(WaitlistEvent::TableAssigned {
            client: assignment.client.clone(),
            capacity: assignment.capacity,
            tables_left,
        })
        .await;

        Ok(assignment)
    }

    /// Cancel the first reservation under `name`
    pub async fn cancel_reservation(&self, name: &str) -> WaitlistResult<ClientEntry> {
        let timer = self.metrics_collector.start_timer();

        let outcome = self.with_engine(|engine| {
            engine
                .cancel_reservation(name)
                .map(|entry| (entry, engine.len()))
        })?;
        self.metrics_collector
            .record_operation("cancel_reservation", timer.stop());

        let (entry, queue_length) = match outcome {
            Ok(cancelled) => cancelled,
            Err(e) => {
                self.record_failure("cancel_reservation", &e);
                return Err(e);
            }
        };

        self.metrics_collector.record_cancellation(queue_length);
        self.update_stats(|stats| {
            stats.reservations_cancelled += 1;
            stats.clients_waiting = queue_length;
        })?;

        self.publish(WaitlistEvent::ReservationCancelled {
            client: entry.clone(),
        })
        .await;

        Ok(entry)
    }

    /// Return a table to the pool; false if the pool refuses it
    pub async fn free_table(&self, capacity: Capacity) -> bool {
        self.release_table(capacity).await.is_ok()
    }

    /// Return a table to the pool, reporting the new free count
    pub async fn release_table(&self, capacity: Capacity) -> WaitlistResult<u32> {
        let timer = self.metrics_collector.start_timer();

        let outcome = self.with_engine(|engine| {
            engine
                .release_table(capacity)
                .map(|free| (free, engine.table_counts()))
        })?;
        self.metrics_collector
            .record_operation("free_table", timer.stop());

        let (free, counts) = match outcome {
            Ok(freed) => freed,
            Err(e) => {
                self.record_failure("free_table", &e);
                return Err(e);
            }
        };

        self.metrics_collector.record_table_freed(capacity);
        self.metrics_collector.update_free_tables(&counts);
        self.update_stats(|stats| stats.tables_freed += 1)?;

        self.publish(WaitlistEvent::TableFreed { capacity, free })
            .await;

        Ok(free)
    }

    /// Estimated wait in minutes for a party of `party_size`
    pub fn estimate_wait_minutes(&self, party_size: PartySize) -> WaitlistResult<u64> {
        self.with_engine(|engine| engine.estimate_wait_minutes(party_size))
    }

    /// Copy of the waitlist in service order
    pub fn waitlist_snapshot(&self) -> WaitlistResult<Vec<ClientEntry>> {
        self.with_engine(|engine| engine.waitlist_snapshot())
    }

    /// Current table counts by capacity
    pub fn table_counts(&self) -> WaitlistResult<Vec<TableCount>> {
        self.with_engine(|engine| engine.table_counts())
    }

    /// Waitlist rows and tables read under one lock
    pub fn board(&self) -> WaitlistResult<WaitlistBoard> {
        let board = self.with_engine(|engine| engine.board())?;
        debug!("Board read with {} rows", board.rows.len());
        Ok(board)
    }

    /// Configured capacities in ascending order
    pub fn capacities(&self) -> WaitlistResult<Vec<Capacity>> {
        self.with_engine(|engine| engine.capacities())
    }

    /// Get operation counters
    pub fn stats(&self) -> WaitlistResult<WaitlistStats> {
        self.stats
            .lock()
            .map(|stats| stats.clone())
            .map_err(|_| WaitlistError::InternalError {
                message: "Failed to acquire stats lock".to_string(),
            })
    }

    /// Get the metrics collector
    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics_collector.clone()
    }
}
