//! Host stand console
//!
//! A thin line-oriented front end over [`SharedWaitlist`]. Each input line
//! is parsed as one command, executed, and answered with a printable
//! message. Failures are reported as messages and never end the session.

use crate::types::TableCount;
use crate::utils::{default_requested_time, format_party};
use crate::waitlist::{SharedWaitlist, WaitlistBoard};
use clap::{Parser, Subcommand};
use std::fmt::Write;
use tracing::debug;

/// One console input line
#[derive(Parser, Debug)]
#[command(name = "waitlist", no_binary_name = true, disable_version_flag = true)]
pub struct ConsoleLine {
    #[command(subcommand)]
    pub command: ConsoleCommand,
}

/// Commands understood by the host stand
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Add a client to the end of the waitlist
    Add {
        /// Number of people in the group
        party_size: u32,
        /// Client name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
        /// Requested time, defaults to now (HH:MM)
        #[arg(short, long)]
        time: Option<String>,
    },
    /// Seat the next client if a table is free
    Next,
    /// Cancel a reservation by client name
    Cancel {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Free a table of the given capacity
    Free { capacity: u32 },
    /// Estimate the wait for a party size
    Estimate { party_size: u32 },
    /// Show the waitlist with estimated waits
    List,
    /// Show available tables
    Tables,
    /// Show metrics in Prometheus text format
    Metrics,
    /// Leave the console
    #[command(alias = "exit")]
    Quit,
}

/// Result of executing one console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleOutcome {
    /// Print the message and keep reading
    Continue(String),
    /// End the session
    Quit,
}

/// Parse and execute one input line
pub async fn execute_line(waitlist: &SharedWaitlist, line: &str) -> ConsoleOutcome {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return ConsoleOutcome::Continue(String::new());
    }

    match ConsoleLine::try_parse_from(words) {
        Ok(parsed) => execute(waitlist, parsed.command).await,
        // Also covers `help`, which clap reports as an error carrying the help text
        Err(e) => ConsoleOutcome::Continue(e.render().to_string().trim_end().to_string()),
    }
}

/// Execute a parsed command
pub async fn execute(waitlist: &SharedWaitlist, command: ConsoleCommand) -> ConsoleOutcome {
    debug!("Executing console command: {:?}", command);

    let message = match command {
        ConsoleCommand::Add {
            party_size,
            name,
            time,
        } => add_client(waitlist, party_size, name.join(" "), time).await,
        ConsoleCommand::Next => match waitlist.call_next_table().await {
            Ok(assignment) => assignment.to_string(),
            Err(e) => format!("{}.", e),
        },
        ConsoleCommand::Cancel { name } => {
            let name = name.join(" ");
            match waitlist.cancel_reservation(&name).await {
                Ok(entry) => format!("Reservation for {} cancelled.", entry.name),
                Err(e) => format!("{}.", e),
            }
        }
        ConsoleCommand::Free { capacity } => match waitlist.release_table(capacity).await {
            Ok(_) => format!("Table for {} freed.", capacity),
            Err(e) => format!("{}.", e),
        },
        ConsoleCommand::Estimate { party_size } => {
            match waitlist.estimate_wait_minutes(party_size) {
                Ok(minutes) => format!(
                    "Estimated wait for {}: {} min",
                    format_party(party_size),
                    minutes
                ),
                Err(e) => format!("{}.", e),
            }
        }
        ConsoleCommand::List => match waitlist.board() {
            Ok(board) => render_board(&board),
            Err(e) => format!("{}.", e),
        },
        ConsoleCommand::Tables => match waitlist.table_counts() {
            Ok(counts) => render_tables(&counts),
            Err(e) => format!("{}.", e),
        },
        ConsoleCommand::Metrics => match waitlist.metrics().gather_text() {
            Ok(text) => text.trim_end().to_string(),
            Err(e) => format!("Failed to gather metrics: {}", e),
        },
        ConsoleCommand::Quit => return ConsoleOutcome::Quit,
    };

    ConsoleOutcome::Continue(message)
}

async fn add_client(
    waitlist: &SharedWaitlist,
    party_size: u32,
    name: String,
    time: Option<String>,
) -> String {
    // The host picks from the configured table sizes only
    match waitlist.capacities() {
        Ok(capacities) if !capacities.contains(&party_size) => {
            let choices: Vec<String> = capacities.iter().map(|c| c.to_string()).collect();
            return format!(
                "Party size must be one of: {}.",
                choices.join(", ")
            );
        }
        Err(e) => return format!("{}.", e),
        Ok(_) => {}
    }

    let requested_time = time.unwrap_or_else(default_requested_time);
    match waitlist.add_client(name, party_size, requested_time).await {
        Ok(entry) => format!("Client {} added to the waitlist.", entry.name),
        Err(e) => format!("{}.", e),
    }
}

/// Render the waitlist as a text table
pub fn render_board(board: &WaitlistBoard) -> String {
    if board.is_empty() {
        return "The waitlist is empty.".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<9} {:<20} {:<10} {:<6} {}",
        "Position", "Client", "Party", "Time", "Estimated wait"
    );
    for row in &board.rows {
        let _ = writeln!(
            out,
            "{:<9} {:<20} {:<10} {:<6} {} min",
            row.position,
            row.name,
            format_party(row.party_size),
            row.requested_time,
            row.estimated_wait_minutes
        );
    }
    out.trim_end().to_string()
}

/// Render free tables per capacity
pub fn render_tables(counts: &[TableCount]) -> String {
    let mut out = String::from("Available tables:");
    for count in counts {
        let noun = if count.free == 1 { "table" } else { "tables" };
        let _ = write!(
            out,
            "\n  • {}: {} {}",
            format_party(count.capacity),
            count.free,
            noun
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NoopEventPublisher;
    use crate::metrics::MetricsCollector;
    use crate::waitlist::WaitlistEngine;
    use std::sync::Arc;

    fn console_waitlist(tables: &[(u32, u32)]) -> SharedWaitlist {
        SharedWaitlist::new(
            WaitlistEngine::with_tables(tables.iter().copied(), 30).unwrap(),
            Arc::new(NoopEventPublisher),
            Arc::new(MetricsCollector::new().unwrap()),
        )
    }

    async fn run(waitlist: &SharedWaitlist, line: &str) -> String {
        match execute_line(waitlist, line).await {
            ConsoleOutcome::Continue(message) => message,
            ConsoleOutcome::Quit => "<quit>".to_string(),
        }
    }

    #[test]
    fn test_parse_add_with_multiword_name() {
        let parsed =
            ConsoleLine::try_parse_from(["add", "4", "Ana", "Maria", "--time", "19:30"]).unwrap();
        assert_eq!(
            parsed.command,
            ConsoleCommand::Add {
                party_size: 4,
                name: vec!["Ana".to_string(), "Maria".to_string()],
                time: Some("19:30".to_string()),
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(ConsoleLine::try_parse_from(["add", "four", "Ana"]).is_err());
        assert!(ConsoleLine::try_parse_from(["add", "2"]).is_err());
        assert!(ConsoleLine::try_parse_from(["dance"]).is_err());
    }

    #[tokio::test]
    async fn test_session_flow() {
        let waitlist = console_waitlist(&[(2, 1), (4, 0), (6, 0)]);

        assert_eq!(
            run(&waitlist, "add 2 Ana --time 19:00").await,
            "Client Ana added to the waitlist."
        );
        assert_eq!(
            run(&waitlist, "add 2 Bob --time 19:05").await,
            "Client Bob added to the waitlist."
        );
        assert_eq!(
            run(&waitlist, "next").await,
            "Calling Ana for a table of 2."
        );
        assert_eq!(
            run(&waitlist, "next").await,
            "No tables available for Bob (party of 2)."
        );
        assert_eq!(run(&waitlist, "free 2").await, "Table for 2 freed.");
        assert_eq!(run(&waitlist, "cancel Bob").await, "Reservation for Bob cancelled.");
        assert_eq!(run(&waitlist, "next").await, "No clients in the waitlist.");
        assert_eq!(run(&waitlist, "quit").await, "<quit>");
        assert_eq!(run(&waitlist, "exit").await, "<quit>");
    }

    #[tokio::test]
    async fn test_party_size_limited_to_table_sizes() {
        let waitlist = console_waitlist(&[(2, 1), (4, 1)]);
        assert_eq!(
            run(&waitlist, "add 3 Ana").await,
            "Party size must be one of: 2, 4."
        );
        assert!(waitlist.waitlist_snapshot().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_default_time_is_filled_in() {
        let waitlist = console_waitlist(&[(2, 1)]);
        run(&waitlist, "add 2 Ana").await;

        let snapshot = waitlist.waitlist_snapshot().unwrap();
        assert_eq!(snapshot[0].requested_time.len(), 5);
    }

    #[tokio::test]
    async fn test_list_and_tables() {
        let waitlist = console_waitlist(&[(2, 0), (4, 1)]);
        assert_eq!(run(&waitlist, "list").await, "The waitlist is empty.");

        run(&waitlist, "add 2 Ana --time 19:00").await;
        let listing = run(&waitlist, "list").await;
        assert!(listing.contains("Ana"));
        assert!(listing.contains("30 min"));

        assert_eq!(
            run(&waitlist, "tables").await,
            "Available tables:\n  • 2 people: 0 tables\n  • 4 people: 1 table"
        );
        assert_eq!(
            run(&waitlist, "estimate 4").await,
            "Estimated wait for 4 people: 0 min"
        );
    }

    #[tokio::test]
    async fn test_unknown_command_and_blank_line() {
        let waitlist = console_waitlist(&[(2, 1)]);
        assert_eq!(run(&waitlist, "   ").await, "");
        assert!(!run(&waitlist, "dance").await.is_empty());
        assert_eq!(run(&waitlist, "free 8").await, "Unknown table capacity: 8.");
    }
}
