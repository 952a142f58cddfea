//! Metrics for the seating waitlist
//!
//! Counters and gauges for queue activity and table usage, rendered in the
//! Prometheus text format on request.

pub mod collector;

pub use collector::{MetricsCollector, MetricsTimer, PerformanceMetrics, QueueMetrics, TableMetrics};
