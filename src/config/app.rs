//! Main application configuration
//!
//! This module defines the configuration structures for the seating
//! waitlist, including environment variable and TOML loading and validation.

use crate::tables::FreeTablePolicy;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub restaurant: RestaurantSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// One capacity class and how many tables it has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub capacity: u32,
    pub count: u32,
}

/// Dining room settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RestaurantSettings {
    /// Tables per capacity class, all free at startup
    pub tables: Vec<TableSpec>,
    /// Average minutes a table stays occupied
    pub average_turnover_minutes: u64,
    /// Whether freeing a table may push a class above its provisioned count
    pub free_table_policy: FreeTablePolicy,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "seating-waitlist".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for RestaurantSettings {
    fn default() -> Self {
        Self {
            tables: vec![
                TableSpec {
                    capacity: 2,
                    count: 5,
                },
                TableSpec {
                    capacity: 4,
                    count: 3,
                },
                TableSpec {
                    capacity: 6,
                    count: 2,
                },
            ],
            average_turnover_minutes: 30,
            free_table_policy: FreeTablePolicy::Uncapped,
        }
    }
}

impl RestaurantSettings {
    /// Configured capacities in ascending order
    pub fn capacities(&self) -> Vec<u32> {
        let mut capacities: Vec<u32> = self.tables.iter().map(|spec| spec.capacity).collect();
        capacities.sort_unstable();
        capacities
    }
}

/// Parse a table list such as `2:5,4:3,6:2`
pub fn parse_table_specs(value: &str) -> Result<Vec<TableSpec>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (capacity, count) = part
                .split_once(':')
                .ok_or_else(|| anyhow!("Invalid table spec '{}', expected CAPACITY:COUNT", part))?;
            Ok(TableSpec {
                capacity: capacity
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("Invalid table capacity: {}", capacity))?,
                count: count
                    .trim()
                    .parse()
                    .map_err(|_| anyhow!("Invalid table count: {}", count))?,
            })
        })
        .collect()
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config = Self::from_toml_str(&contents)?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(contents).map_err(|e| anyhow!("Invalid configuration: {}", e))?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        // Restaurant settings
        if let Ok(tables) = env::var("WAITLIST_TABLES") {
            self.restaurant.tables = parse_table_specs(&tables)
                .map_err(|e| anyhow!("Invalid WAITLIST_TABLES value: {}", e))?;
        }
        if let Ok(turnover) = env::var("WAITLIST_TURNOVER_MINUTES") {
            self.restaurant.average_turnover_minutes = turnover
                .parse()
                .map_err(|_| anyhow!("Invalid WAITLIST_TURNOVER_MINUTES value: {}", turnover))?;
        }
        if let Ok(policy) = env::var("WAITLIST_FREE_TABLE_POLICY") {
            self.restaurant.free_table_policy = policy
                .parse()
                .map_err(|_| anyhow!("Invalid WAITLIST_FREE_TABLE_POLICY value: {}", policy))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    // Validate tables
    if config.restaurant.tables.is_empty() {
        return Err(anyhow!("At least one table capacity must be configured"));
    }
    let mut seen = BTreeSet::new();
    for spec in &config.restaurant.tables {
        if spec.capacity == 0 {
            return Err(anyhow!("Table capacity must be greater than 0"));
        }
        if !seen.insert(spec.capacity) {
            return Err(anyhow!("Duplicate table capacity: {}", spec.capacity));
        }
    }

    if config.restaurant.average_turnover_minutes == 0 {
        return Err(anyhow!("Average turnover must be greater than 0"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.service.name, "seating-waitlist");
        assert_eq!(config.restaurant.capacities(), vec![2, 4, 6]);
        assert_eq!(config.restaurant.average_turnover_minutes, 30);
        assert_eq!(
            config.restaurant.free_table_policy,
            FreeTablePolicy::Uncapped
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_parse_table_specs() {
        let specs = parse_table_specs("2:5, 4:3,6:2").unwrap();
        assert_eq!(specs.len(), 3);
        assert_eq!(
            specs[1],
            TableSpec {
                capacity: 4,
                count: 3
            }
        );

        assert!(parse_table_specs("2-5").is_err());
        assert!(parse_table_specs("two:5").is_err());
        assert!(parse_table_specs("2:-1").is_err());
    }

    #[test]
    fn test_from_toml_str() {
        let config = AppConfig::from_toml_str(
            r#"
            [service]
            log_level = "debug"

            [restaurant]
            average_turnover_minutes = 45
            free_table_policy = "cap_at_provisioned"

            [[restaurant.tables]]
            capacity = 4
            count = 2

            [[restaurant.tables]]
            capacity = 8
            count = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.service.name, "seating-waitlist");
        assert_eq!(config.service.log_level, "debug");
        assert_eq!(config.restaurant.capacities(), vec![4, 8]);
        assert_eq!(config.restaurant.average_turnover_minutes, 45);
        assert_eq!(
            config.restaurant.free_table_policy,
            FreeTablePolicy::CapAtProvisioned
        );
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.restaurant.tables.clear();
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.restaurant.tables.push(TableSpec {
            capacity: 2,
            count: 1,
        });
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.restaurant.tables[0].capacity = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.restaurant.average_turnover_minutes = 0;
        assert!(validate_config(&config).is_err());
    }
}
