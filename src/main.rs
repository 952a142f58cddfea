//! Main entry point for the seating waitlist host stand
//!
//! Loads configuration, initializes logging, and runs the interactive
//! console on stdin until `quit`, end of input, or Ctrl+C.

use anyhow::Result;
use clap::Parser;
use seating_waitlist::config::{parse_table_specs, validate_config, AppConfig};
use seating_waitlist::console::{execute_line, render_tables, ConsoleOutcome};
use seating_waitlist::events::TracingEventPublisher;
use seating_waitlist::metrics::MetricsCollector;
use seating_waitlist::tables::FreeTablePolicy;
use seating_waitlist::waitlist::{SharedWaitlist, WaitlistEngine};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{error, info};

/// Seating Waitlist - restaurant host stand
#[derive(Parser)]
#[command(
    name = "seating-waitlist",
    version,
    about = "A restaurant seating waitlist with best-fit table allocation",
    long_about = "Seating Waitlist keeps a first-come, first-served queue of parties, seats the \
                 head of the queue at the smallest free table that fits, lets parties cancel \
                 from anywhere in the line, and estimates waits from queue depth and free tables."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Table inventory override
    #[arg(
        long,
        value_name = "SPEC",
        help = "Override tables as CAPACITY:COUNT pairs, e.g. 2:5,4:3,6:2"
    )]
    tables: Option<String>,

    /// Turnover override
    #[arg(long, value_name = "MINUTES", help = "Override average table turnover")]
    turnover_minutes: Option<u64>,

    /// Refuse to free more tables than were provisioned
    #[arg(long, help = "Cap freed tables at the provisioned count")]
    cap_freed_tables: bool,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without starting")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(tables) = &args.tables {
        config.restaurant.tables = parse_table_specs(tables)?;
    }

    if let Some(turnover) = args.turnover_minutes {
        config.restaurant.average_turnover_minutes = turnover;
    }

    if args.cap_freed_tables {
        config.restaurant.free_table_policy = FreeTablePolicy::CapAtProvisioned;
    }

    validate_config(&config)?;
    Ok(config)
}

/// Display startup banner with service information
fn display_startup_banner(config: &AppConfig) {
    info!("Seating Waitlist");
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    for spec in &config.restaurant.tables {
        info!("   Tables for {}: {}", spec.capacity, spec.count);
    }
    info!(
        "   Average turnover: {} min",
        config.restaurant.average_turnover_minutes
    );
    info!(
        "   Free table policy: {:?}",
        config.restaurant.free_table_policy
    );
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

/// Read console lines until quit, end of input, or Ctrl+C
async fn run_console(waitlist: &SharedWaitlist) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Type `help` for commands.");
    if let Ok(counts) = waitlist.table_counts() {
        println!("{}", render_tables(&counts));
    }
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("End of input");
                    break;
                };
                match execute_line(waitlist, &line).await {
                    ConsoleOutcome::Continue(message) => {
                        if !message.is_empty() {
                            println!("{}", message);
                        }
                    }
                    ConsoleOutcome::Quit => break,
                }
                prompt();
            }
            _ = signal::ctrl_c() => {
                println!();
                info!("Received SIGINT (Ctrl+C) signal");
                break;
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        display_startup_banner(&config);
        info!("Dry run completed - exiting");
        return Ok(());
    }

    display_startup_banner(&config);

    let engine = match WaitlistEngine::from_settings(&config.restaurant) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Failed to initialize waitlist: {}", e);
            std::process::exit(1);
        }
    };
    let metrics = Arc::new(MetricsCollector::new()?);
    let waitlist = SharedWaitlist::new(engine, Arc::new(TracingEventPublisher::new()), metrics);

    run_console(&waitlist).await?;

    if let Ok(stats) = waitlist.stats() {
        info!(
            "Session summary: {} added, {} seated, {} cancelled, {} still waiting",
            stats.clients_added,
            stats.parties_seated,
            stats.reservations_cancelled,
            stats.clients_waiting
        );
    }
    info!("Seating Waitlist stopped");
    Ok(())
}
