//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for the seating waitlist using a
//! private Prometheus registry.

use crate::types::{Capacity, TableCount};
use anyhow::Result;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main metrics collector for the waitlist
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Queue-related metrics
    queue_metrics: QueueMetrics,

    /// Table-related metrics
    table_metrics: TableMetrics,

    /// Performance metrics
    performance_metrics: PerformanceMetrics,
}

/// Queue-related metrics
#[derive(Clone)]
pub struct QueueMetrics {
    /// Total clients added to the waitlist
    pub clients_added_total: IntCounter,

    /// Total reservations cancelled
    pub reservations_cancelled_total: IntCounter,

    /// Clients currently waiting
    pub queue_depth: IntGauge,

    /// Rejected operations by failure kind
    pub seating_failures_total: IntCounterVec,
}

/// Table-related metrics
#[derive(Clone)]
pub struct TableMetrics {
    /// Parties seated by table capacity
    pub parties_seated_total: IntCounterVec,

    /// Tables freed by capacity
    pub tables_freed_total: IntCounterVec,

    /// Free tables by capacity
    pub free_tables: IntGaugeVec,
}

/// Performance metrics
#[derive(Clone)]
pub struct PerformanceMetrics {
    /// Waitlist operation durations
    pub operation_duration: HistogramVec,
}

impl MetricsCollector {
    /// Create a new metrics collector with its own registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let queue_metrics = QueueMetrics::new(&registry)?;
        let table_metrics = TableMetrics::new(&registry)?;
        let performance_metrics = PerformanceMetrics::new(&registry)?;

        Ok(Self {
            registry,
            queue_metrics,
            table_metrics,
            performance_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn queue(&self) -> &QueueMetrics {
        &self.queue_metrics
    }

    pub fn tables(&self) -> &TableMetrics {
        &self.table_metrics
    }

    pub fn performance(&self) -> &PerformanceMetrics {
        &self.performance_metrics
    }

    /// Record a client joining the waitlist
    pub fn record_client_added(&self, queue_depth: usize) {
        self.queue_metrics.clients_added_total.inc();
        self.queue_metrics.queue_depth.set(queue_depth as i64);
    }

    /// Record a party being seated
    pub fn record_party_seated(&self, capacity: Capacity, queue_depth: usize) {
        let label = capacity.to_string();
        self.table_metrics
            .parties_seated_total
            .with_label_values(&[label.as_str()])
            .inc();
        self.queue_metrics.queue_depth.set(queue_depth as i64);
    }

    /// Record a cancelled reservation
    pub fn record_cancellation(&self, queue_depth: usize) {
        self.queue_metrics.reservations_cancelled_total.inc();
        self.queue_metrics.queue_depth.set(queue_depth as i64);
    }

    /// Record a table returned to the pool
    pub fn record_table_freed(&self, capacity: Capacity) {
        let label = capacity.to_string();
        self.table_metrics
            .tables_freed_total
            .with_label_values(&[label.as_str()])
            .inc();
    }

    /// Record a rejected operation by failure kind
    pub fn record_failure(&self, kind: &str) {
        self.queue_metrics
            .seating_failures_total
            .with_label_values(&[kind])
            .inc();
    }

    /// Mirror current free table counts
    pub fn update_free_tables(&self, counts: &[TableCount]) {
        for count in counts {
            let label = count.capacity.to_string();
            self.table_metrics
                .free_tables
                .with_label_values(&[label.as_str()])
                .set(count.free as i64);
        }
    }

    /// Record waitlist operation duration
    pub fn record_operation(&self, operation: &str, duration: Duration) {
        self.performance_metrics
            .operation_duration
            .with_label_values(&[operation])
            .observe(duration.as_secs_f64());
    }

    /// Render every registered metric in the text exposition format
    pub fn gather_text(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Start a timer for measuring operation duration
    pub fn start_timer(&self) -> MetricsTimer {
        MetricsTimer::new()
    }
}

/// Timer for measuring operation durations
pub struct MetricsTimer {
    start: Instant,
}

impl MetricsTimer {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn stop(self) -> Duration {
        self.elapsed()
    }
}

impl QueueMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let clients_added_total = IntCounter::new(
            "waitlist_clients_added_total",
            "Total clients added to the waitlist",
        )?;
        registry.register(Box::new(clients_added_total.clone()))?;

        let reservations_cancelled_total = IntCounter::new(
            "waitlist_reservations_cancelled_total",
            "Total reservations cancelled",
        )?;
        registry.register(Box::new(reservations_cancelled_total.clone()))?;

        let queue_depth = IntGauge::new("waitlist_queue_depth", "Clients currently waiting")?;
        registry.register(Box::new(queue_depth.clone()))?;

        let seating_failures_total = IntCounterVec::new(
            Opts::new(
                "waitlist_seating_failures_total",
                "Rejected waitlist operations",
            ),
            &["reason"],
        )?;
        registry.register(Box::new(seating_failures_total.clone()))?;

        Ok(Self {
            clients_added_total,
            reservations_cancelled_total,
            queue_depth,
            seating_failures_total,
        })
    }
}

impl TableMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let parties_seated_total = IntCounterVec::new(
            Opts::new("waitlist_parties_seated_total", "Total parties seated"),
            &["capacity"],
        )?;
        registry.register(Box::new(parties_seated_total.clone()))?;

        let tables_freed_total = IntCounterVec::new(
            Opts::new("waitlist_tables_freed_total", "Total tables freed"),
            &["capacity"],
        )?;
        registry.register(Box::new(tables_freed_total.clone()))?;

        let free_tables = IntGaugeVec::new(
            Opts::new("waitlist_free_tables", "Free tables by capacity"),
            &["capacity"],
        )?;
        registry.register(Box::new(free_tables.clone()))?;

        Ok(Self {
            parties_seated_total,
            tables_freed_total,
            free_tables,
        })
    }
}

impl PerformanceMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let operation_duration = HistogramVec::new(
            HistogramOpts::new(
                "waitlist_operation_duration_seconds",
                "Waitlist operation duration",
            )
            .buckets(vec![0.00001, 0.0001, 0.001, 0.01, 0.1]),
            &["operation"],
        )?;
        registry.register(Box::new(operation_duration.clone()))?;

        Ok(Self { operation_duration })
    }
}
