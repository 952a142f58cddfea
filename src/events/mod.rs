//! Waitlist event publishing

pub mod publisher;

pub use publisher::{EventPublisher, NoopEventPublisher, TracingEventPublisher};
