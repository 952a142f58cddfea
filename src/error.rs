//! Error types for the seating waitlist
//!
//! Engine operations return [`WaitlistResult`] so callers can match on the
//! failure kind. Process-level code (configuration, the binary) uses the
//! anyhow-based [`Result`] alias.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Result of a waitlist engine operation
pub type WaitlistResult<T> = std::result::Result<T, WaitlistError>;

/// Failure kinds surfaced by the waitlist engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WaitlistError {
    #[error("No clients in the waitlist")]
    EmptyQueue,

    #[error("No tables available for {client_name} (party of {party_size})")]
    NoTableAvailable {
        client_name: String,
        party_size: u32,
    },

    #[error("{name} was not found in the waitlist")]
    NotFound { name: String },

    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Unknown table capacity: {capacity}")]
    UnknownCapacity { capacity: u32 },

    #[error("All tables for {capacity} are already free")]
    TablePoolFull { capacity: u32 },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal service error: {message}")]
    InternalError { message: String },
}

impl WaitlistError {
    /// Stable label for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            WaitlistError::EmptyQueue => "empty_queue",
            WaitlistError::NoTableAvailable { .. } => "no_table_available",
            WaitlistError::NotFound { .. } => "not_found",
            WaitlistError::InvalidInput { .. } => "invalid_input",
            WaitlistError::UnknownCapacity { .. } => "unknown_capacity",
            WaitlistError::TablePoolFull { .. } => "table_pool_full",
            WaitlistError::ConfigurationError { .. } => "configuration_error",
            WaitlistError::InternalError { .. } => "internal_error",
        }
    }
}
