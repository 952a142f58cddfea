//! Test fixtures and mock implementations for integration testing

use async_trait::async_trait;
use seating_waitlist::error::Result;
use seating_waitlist::events::EventPublisher;
use seating_waitlist::metrics::MetricsCollector;
use seating_waitlist::types::WaitlistEvent;
use seating_waitlist::waitlist::{SharedWaitlist, WaitlistEngine};
use std::sync::{Arc, Mutex};

/// Mock event publisher that captures published events for testing
#[derive(Debug, Default)]
pub struct MockEventPublisher {
    published_events: Arc<Mutex<Vec<WaitlistEvent>>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self {
            published_events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all published events (for testing)
    pub fn get_published_events(&self) -> Vec<WaitlistEvent> {
        self.published_events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Count events of specific type
    pub fn count_events_of_type(&self, event_type: &str) -> usize {
        self.get_published_events()
            .iter()
            .filter(|event| event.name() == event_type)
            .count()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: WaitlistEvent) -> Result<()> {
        if let Ok(mut events) = self.published_events.lock() {
            events.push(event);
        }
        Ok(())
    }
}

/// Publisher that always fails
#[derive(Debug, Default)]
pub struct FailingEventPublisher;

#[async_trait]
impl EventPublisher for FailingEventPublisher {
    async fn publish(&self, _event: WaitlistEvent) -> Result<()> {
        Err(anyhow::anyhow!("event sink unavailable"))
    }
}

/// Build a shared waitlist over the given tables with a capturing publisher
pub fn create_test_waitlist(
    tables: &[(u32, u32)],
    average_turnover_minutes: u64,
) -> (SharedWaitlist, Arc<MockEventPublisher>) {
    let publisher = Arc::new(MockEventPublisher::new());
    let engine = WaitlistEngine::with_tables(tables.iter().copied(), average_turnover_minutes)
        .expect("valid test tables");
    let waitlist = SharedWaitlist::new(
        engine,
        publisher.clone(),
        Arc::new(MetricsCollector::new().expect("metrics collector")),
    );
    (waitlist, publisher)
}

/// Names in the current waitlist, in order
pub fn queued_names(waitlist: &SharedWaitlist) -> Vec<String> {
    waitlist
        .waitlist_snapshot()
        .expect("snapshot")
        .into_iter()
        .map(|entry| entry.name)
        .collect()
}
