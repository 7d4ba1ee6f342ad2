//! # packopt-cli: Pack Optimizer Command-Line Interface
//!
//! Runs the optimizer once from the shell, without the HTTP service.
//!
//! ## Subcommands
//!
//! - `solve`: Pack an order against a catalog given inline or as a file
//! - `catalog`: Validate a catalog file
//!
//! ## Exit Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 1 | The quantity or pack sizes were rejected |
//! | 2 | Anything else (unreadable file, malformed document, solver failure) |
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `packopt-core`; no packing logic here.

pub mod catalog;
pub mod solve;

use packopt_core::PackError;

/// Exit status for rejected input.
pub const EXIT_INVALID_INPUT: u8 = 1;
/// Exit status for every other failure.
pub const EXIT_FAILURE: u8 = 2;

/// Map a handler error to the process exit status.
pub fn exit_code_for(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<PackError>() {
        Some(e) if e.is_input_error() => EXIT_INVALID_INPUT,
        _ => EXIT_FAILURE,
    }
}
