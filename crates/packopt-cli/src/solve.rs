//! # Solve CLI: Pack a single order.
//!
//! ## Usage
//!
//! ```bash
//! # Against the default catalog (250, 500, 1000, 2000, 5000):
//! packopt solve 12001
//!
//! # Inline pack sizes, JSON output:
//! packopt solve 500000 --pack-sizes 23,31,53 --format json
//!
//! # Pack sizes from a catalog file:
//! packopt solve 263 --catalog catalog.yaml
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use packopt_core::{PackSizeSet, PackingResult};

use crate::catalog::load_catalog;

/// Pack sizes used when neither `--pack-sizes` nor `--catalog` is given.
pub const DEFAULT_PACK_SIZES: [i64; 5] = [250, 500, 1000, 2000, 5000];

/// Output rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One summary line.
    #[default]
    Text,
    /// The result document as served by `POST /optimize`.
    Json,
}

/// Solve subcommand arguments.
#[derive(Args, Debug)]
pub struct SolveArgs {
    /// Number of items ordered.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,

    /// Comma-separated pack sizes.
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        conflicts_with = "catalog"
    )]
    pub pack_sizes: Option<Vec<i64>>,

    /// Catalog file (YAML or JSON) holding the pack sizes.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Execute the solve subcommand.
pub fn run_solve(args: &SolveArgs) -> Result<u8> {
    let result = solve_order(args)?;
    println!("{}", render(&result, args.format)?);
    Ok(0)
}

/// Resolve the catalog for `args` and solve the order against it.
pub fn solve_order(args: &SolveArgs) -> Result<PackingResult> {
    let quantity = packopt_core::OrderQuantity::new(args.quantity)?;
    let sizes = match (&args.pack_sizes, &args.catalog) {
        (_, Some(path)) => load_catalog(path)?,
        (Some(raw), None) => PackSizeSet::new(raw.iter().copied())?,
        (None, None) => PackSizeSet::new(DEFAULT_PACK_SIZES)?,
    };
    tracing::info!(quantity = quantity.get(), pack_sizes = %sizes, "solving");

    let result = packopt_core::solve_validated(quantity, &sizes)?;
    Ok(result)
}

/// Render a result in the requested format.
pub fn render(result: &PackingResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(result.to_string()),
        OutputFormat::Json => {
            serde_json::to_string_pretty(result).context("failed to serialize result")
        }
    }
}
