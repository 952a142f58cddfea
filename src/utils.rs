//! Utility functions for the seating waitlist

use chrono::{DateTime, Local, Utc};
use uuid::Uuid;

/// Generate a new unique event ID
pub fn generate_event_id() -> Uuid {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Requested time used when the host does not type one: local `HH:MM`
pub fn default_requested_time() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Render a party size for display
pub fn format_party(party_size: u32) -> String {
    if party_size == 1 {
        "1 person".to_string()
    } else {
        format!("{} people", party_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_unique_ids() {
        let id1 = generate_event_id();
        let id2 = generate_event_id();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_default_requested_time_shape() {
        let time = default_requested_time();
        assert_eq!(time.len(), 5);
        assert_eq!(&time[2..3], ":");
    }

    #[test]
    fn test_format_party() {
        assert_eq!(format_party(1), "1 person");
        assert_eq!(format_party(4), "4 people");
    }
}
