//! Seating Waitlist - restaurant waitlist and table allocation
//!
//! This crate provides a first-in-first-out client waitlist, best-fit
//! matching against a pool of tables by capacity, out-of-order
//! cancellation, and wait time estimates from queue depth.

pub mod config;
pub mod console;
pub mod error;
pub mod events;
pub mod metrics;
pub mod tables;
pub mod types;
pub mod utils;
pub mod wait_time;
pub mod waitlist;

// Re-export commonly used types and traits
pub use error::{Result, WaitlistError, WaitlistResult};
pub use types::*;

// Re-export key components
pub use events::EventPublisher;
pub use tables::{FreeTablePolicy, TableInventory};
pub use waitlist::{SharedWaitlist, WaitlistEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
