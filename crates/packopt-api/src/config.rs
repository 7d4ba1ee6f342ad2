//! # Service Configuration
//!
//! [`AppConfig`] is assembled from environment variables at startup. Every
//! variable is optional; defaults reproduce the historical service (port
//! 8080, catalog `250, 500, 1000, 2000, 5000`).
//!
//! | Variable             | Default                    |
//! |----------------------|----------------------------|
//! | `PORT`               | `8080`                     |
//! | `PACK_SIZES`         | `250,500,1000,2000,5000`   |
//! | `MAX_ORDER_QUANTITY` | `1000000`                  |
//! | `MAX_PACK_SIZE`      | `1000000`                  |
//! | `SOLVE_TIMEOUT_MS`   | `5000`                     |
//! | `METRICS_ENABLED`    | `true`                     |
//! | `LOG_FORMAT`         | `text` (`json` for JSON lines) |
//!
//! The two limits bound the solver's search table, whose size is
//! `quantity + max(pack size)` entries.

use std::str::FromStr;
use std::time::Duration;

use packopt_core::{PackError, PackSizeSet};
use thiserror::Error;

/// Pack sizes served when `PACK_SIZES` is unset.
pub const DEFAULT_PACK_SIZES: [i64; 5] = [250, 500, 1000, 2000, 5000];

/// Startup configuration errors. The process refuses to start on any of them.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("invalid value for {var}: \"{value}\" ({reason})")]
    InvalidValue {
        /// Environment variable name.
        var: &'static str,
        /// The raw value.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// `PACK_SIZES` parsed but does not form a valid catalog.
    #[error("invalid PACK_SIZES: {0}")]
    PackSizes(#[from] PackError),
}

/// Upper bounds applied to client input before it reaches the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Largest order quantity `/optimize` accepts.
    pub max_order_quantity: u64,
    /// Largest pack size the catalog accepts.
    pub max_pack_size: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_order_quantity: 1_000_000,
            max_pack_size: 1_000_000,
        }
    }
}

impl Limits {
    /// Reject the first pack size above `max_pack_size`.
    pub fn check_pack_sizes(&self, sizes: &PackSizeSet) -> Result<(), String> {
        match sizes.as_slice().iter().find(|&&s| s > self.max_pack_size) {
            Some(size) => Err(format!(
                "pack size {size} exceeds the maximum of {}",
                self.max_pack_size
            )),
            None => Ok(()),
        }
    }
}

/// Log output format for the binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected \"text\" or \"json\", got \"{other}\"")),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Catalog installed at startup (version 1).
    pub pack_sizes: PackSizeSet,
    /// Input bounds.
    pub limits: Limits,
    /// Deadline for a single optimization.
    pub solve_timeout: Duration,
    /// Mount `/metrics` and record request metrics.
    pub metrics_enabled: bool,
    /// Log output format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Configuration with the given startup catalog and defaults elsewhere.
    pub fn with_pack_sizes(pack_sizes: PackSizeSet) -> Self {
        Self {
            port: 8080,
            pack_sizes,
            limits: Limits::default(),
            solve_timeout: Duration::from_millis(5000),
            metrics_enabled: true,
            log_format: LogFormat::Text,
        }
    }

    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::with_pack_sizes(PackSizeSet::new(DEFAULT_PACK_SIZES)?);

        let port = parse_var(&lookup, "PORT")?.unwrap_or(defaults.port);

        let limits = Limits {
            max_order_quantity: parse_var(&lookup, "MAX_ORDER_QUANTITY")?
                .unwrap_or(defaults.limits.max_order_quantity),
            max_pack_size: parse_var(&lookup, "MAX_PACK_SIZE")?
                .unwrap_or(defaults.limits.max_pack_size),
        };

        let pack_sizes = match lookup("PACK_SIZES") {
            Some(raw) => {
                let parsed = parse_pack_sizes(&raw).map_err(|reason| ConfigError::InvalidValue {
                    var: "PACK_SIZES",
                    value: raw.clone(),
                    reason,
                })?;
                PackSizeSet::new(parsed)?
            }
            None => defaults.pack_sizes,
        };
        limits
            .check_pack_sizes(&pack_sizes)
            .map_err(|reason| ConfigError::InvalidValue {
                var: "PACK_SIZES",
                value: pack_sizes.to_string(),
                reason,
            })?;

        let solve_timeout = parse_var::<u64>(&lookup, "SOLVE_TIMEOUT_MS")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.solve_timeout);

        // Anything other than "false" keeps metrics on.
        let metrics_enabled = lookup("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(defaults.metrics_enabled);

        let log_format = parse_var(&lookup, "LOG_FORMAT")?.unwrap_or(defaults.log_format);

        Ok(Self {
            port,
            pack_sizes,
            limits,
            solve_timeout,
            metrics_enabled,
            log_format,
        })
    }
}

/// Parse a comma-separated list such as `"250, 500,1000"`.
pub fn parse_pack_sizes(raw: &str) -> Result<Vec<i64>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|e| format!("\"{s}\" is not an integer: {e}"))
        })
        .collect()
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(var)
        .map(|value| {
            value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
                var,
                reason: e.to_string(),
                value,
            })
        })
        .transpose()
}
