//! Event publisher for waitlist changes

use crate::error::{Result, WaitlistError};
use crate::types::{EventEnvelope, WaitlistEvent};
use async_trait::async_trait;
use tracing::{debug, info};

/// Trait for publishing waitlist events
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish one event
    async fn publish(&self, event: WaitlistEvent) -> Result<()>;
}

/// Publisher that writes each event as JSON to the tracing log
#[derive(Debug, Clone, Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: WaitlistEvent) -> Result<()> {
        let envelope = EventEnvelope::new(event);
        let payload =
            serde_json::to_string(&envelope).map_err(|e| WaitlistError::InternalError {
                message: format!("Failed to serialize event: {}", e),
            })?;

        info!(
            event = envelope.event.name(),
            event_id = %envelope.event_id,
            "{}",
            payload
        );
        Ok(())
    }
}

/// Publisher that drops every event
#[derive(Debug, Clone, Default)]
pub struct NoopEventPublisher;

#[async_trait]
impl EventPublisher for NoopEventPublisher {
    async fn publish(&self, event: WaitlistEvent) -> Result<()> {
        debug!("Dropping {} event", event.name());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tracing_publisher_accepts_events() {
        let publisher = TracingEventPublisher::new();
        let result = publisher
            .publish(WaitlistEvent::TableFreed {
                capacity: 2,
                free: 3,
            })
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_noop_publisher() {
        let publisher: Box<dyn EventPublisher> = Box::new(NoopEventPublisher);
        assert!(publisher
            .publish(WaitlistEvent::TableFreed {
                capacity: 4,
                free: 1,
            })
            .await
            .is_ok());
    }
}
