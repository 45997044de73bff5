//! Command-line front end for `movierec_core`.
//!
//! # Responsibility
//! - Own the I/O the core refuses to do: CSV reading, sample bootstrapping,
//!   argument parsing and terminal output.
//! - Map core errors to user-facing messages and exit codes.

pub mod app;
pub mod args;
pub mod csv_source;
pub mod report;
pub mod sample;

pub use app::{run, CliError};
pub use args::Args;

/// Ratings file used when `--file` is not given.
pub const DEFAULT_RATINGS_FILE: &str = "ratings.csv";
/// Recommendation count used when `--num-recs` is not given.
pub const DEFAULT_NUM_RECS: i64 = 2;
