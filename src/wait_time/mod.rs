//! Wait time estimation
//!
//! Estimates are derived from queue depth and free tables; nothing here
//! mutates the waitlist.

pub mod estimator;

pub use estimator::{WaitTimeConfig, WaitTimeEstimator};
