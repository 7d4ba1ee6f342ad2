//! # Catalog Files
//!
//! A catalog file lists the pack sizes to optimize against:
//!
//! ```yaml
//! pack_sizes: [250, 500, 1000, 2000, 5000]
//! ```
//!
//! Files ending in `.json` are read as JSON, everything else as YAML. The
//! `packSizes` spelling used by the HTTP API is accepted too.
//!
//! ## Usage
//!
//! ```bash
//! packopt catalog catalog.yaml
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use packopt_core::PackSizeSet;
use serde::Deserialize;

/// Catalog subcommand arguments.
#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Catalog file to validate.
    pub file: PathBuf,
}

/// On-disk catalog document.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    /// Pack sizes in display order.
    #[serde(alias = "packSizes")]
    pub pack_sizes: Vec<i64>,
}

/// Read and validate a catalog file.
///
/// Invalid pack sizes surface as [`packopt_core::PackError`] under the
/// returned error's context.
pub fn load_catalog(path: &Path) -> Result<PackSizeSet> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let file: CatalogFile = if is_json {
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse catalog {} as JSON", path.display()))?
    } else {
        serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse catalog {} as YAML", path.display()))?
    };

    tracing::debug!(path = %path.display(), sizes = file.pack_sizes.len(), "catalog file read");

    PackSizeSet::new(file.pack_sizes)
        .with_context(|| format!("invalid catalog {}", path.display()))
}

/// Execute the catalog subcommand.
pub fn run_catalog(args: &CatalogArgs) -> Result<u8> {
    let sizes = load_catalog(&args.file)?;
    println!(
        "{}: {} pack sizes {}",
        args.file.display(),
        sizes.len(),
        sizes
    );
    Ok(0)
}
