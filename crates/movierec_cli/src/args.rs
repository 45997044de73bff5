//! Command-line arguments.

use crate::{DEFAULT_NUM_RECS, DEFAULT_RATINGS_FILE};
use clap::Parser;
use movierec_core::default_log_level;
use std::path::PathBuf;

/// Movie recommendations using user-based collaborative filtering.
#[derive(Debug, Clone, Parser)]
#[command(name = "movierec", version)]
pub struct Args {
    /// The user ID to get recommendations for.
    #[arg(long)]
    pub user: String,

    /// Number of recommendations to generate.
    #[arg(
        long = "num-recs",
        visible_alias = "num_recs",
        default_value_t = DEFAULT_NUM_RECS,
        allow_negative_numbers = true
    )]
    pub num_recs: i64,

    /// Path to the ratings CSV file (columns: user, movie|item, rating).
    #[arg(long, default_value = DEFAULT_RATINGS_FILE)]
    pub file: PathBuf,

    /// Only count neighbour ratings at or above this value.
    #[arg(long)]
    pub min_rating: Option<f64>,

    /// Print recommendations as JSON instead of a numbered list.
    #[arg(long)]
    pub json: bool,

    /// Log level (trace|debug|info|warn|error); defaults to debug in debug
    /// builds and info in release builds.
    #[arg(long, default_value = default_log_level().as_str())]
    pub log_level: String,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}
