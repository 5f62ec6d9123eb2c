//! Configuration loading from TOML with environment variable overrides.
//!
//! Reads `config.toml` into strongly-typed structs. Every section and field
//! has a default, so a missing file is not an error. Deployment-specific
//! values (`PORT`, `GRPC_PORT`, `SERVICE_NAME`, `SERVICE_ENDPOINT`) are
//! taken from the environment last and win over the file.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub table: TableConfig,
    pub metadata: ServiceMetadata,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    pub name: String,
    pub http_port: u16,
    pub rpc_port: u16,
    /// Address advertised to game clients in the asset bundle.
    pub endpoint: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: "vegas-roulette-service".to_string(),
            http_port: 8082,
            rpc_port: 50052,
            endpoint: "localhost:50052".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TableConfig {
    /// Stake used when a simple bet arrives without an amount.
    pub default_bet_amount: Decimal,
    pub min_bet: Decimal,
    pub max_bet: Decimal,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_bet_amount: dec!(10),
            min_bet: dec!(10),
            max_bet: dec!(1000),
        }
    }
}

/// Static descriptor reported by the health endpoints.
///
/// Purely informational: the engine never reads it.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceMetadata {
    pub version: String,
    pub environment: String,
    pub game_type: String,
    pub game_category: String,
    pub complexity: String,
    pub rtp: String,
    pub owner: String,
    pub technology: String,
    pub features: Vec<String>,
    pub max_payout: String,
    pub volatility: String,
    pub wheel_type: String,
    pub bet_types: Vec<String>,
    pub special_features: Vec<String>,
}

impl Default for ServiceMetadata {
    fn default() -> Self {
        let strings = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "vegas-casino-production".to_string(),
            game_type: "european-roulette".to_string(),
            game_category: "table-games".to_string(),
            complexity: "high".to_string(),
            rtp: "97.3%".to_string(),
            owner: "Table-Games-Team".to_string(),
            technology: "Rust-Axum-Roulette".to_string(),
            features: strings(&["multiple-bet-types", "live-wheel", "cheat-detection", "advanced-statistics"]),
            max_payout: "36x".to_string(),
            volatility: "medium".to_string(),
            wheel_type: "37-number-european".to_string(),
            bet_types: strings(&["straight", "red-black", "odd-even", "low-high"]),
            special_features: strings(&["pattern-detection", "hot-cold-numbers", "betting-strategies"]),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist, then apply environment overrides.
    pub fn load(path: &str) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {path}"))?;
            Self::parse(&contents)
                .with_context(|| format!("Failed to parse config file: {path}"))?
        } else {
            debug!(path, "No config file, using defaults");
            Self::default()
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Apply `PORT`, `GRPC_PORT`, `SERVICE_NAME` and `SERVICE_ENDPOINT`.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a map.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.service.http_port = port
                .parse()
                .with_context(|| format!("PORT is not a valid port: {port}"))?;
        }
        if let Some(port) = lookup("GRPC_PORT") {
            self.service.rpc_port = port
                .parse()
                .with_context(|| format!("GRPC_PORT is not a valid port: {port}"))?;
        }
        if let Some(name) = lookup("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Some(endpoint) = lookup("SERVICE_ENDPOINT") {
            self.service.endpoint = endpoint;
        }
        Ok(())
    }
}
