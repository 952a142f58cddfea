//! Waitlist engine for restaurant seating
//!
//! This module holds the FIFO client queue, the single-actor engine that
//! matches the head of the queue to tables, and a lock-guarded wrapper for
//! callers that share one engine.

pub mod board;
pub mod engine;
pub mod queue;
pub mod shared;

// Re-export commonly used types
pub use board::{BoardRow, WaitlistBoard};
pub use engine::WaitlistEngine;
pub use queue::ClientQueue;
pub use shared::{SharedWaitlist, WaitlistStats};
