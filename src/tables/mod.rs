//! Table pool accounting
//!
//! Tracks how many tables of each capacity class are free and picks the
//! best-fit class for a party.

pub mod inventory;

pub use inventory::{FreeTablePolicy, TableInventory};
