//! End-to-end command flow: load ratings, query the core, render output.

use crate::args::Args;
use crate::csv_source::{read_records, CsvSourceError};
use crate::report::{write_json, write_text, write_unknown_user};
use crate::sample::ensure_sample_dataset;
use log::info;
use movierec_core::{
    core_version, init_logging, LoggingError, MalformedRecordError, RatingStore, RecommendError,
    RecommendOptions, RecommendService,
};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};

/// Any failure of one CLI invocation.
#[derive(Debug)]
pub enum CliError {
    Logging(LoggingError),
    Source(CsvSourceError),
    Load(MalformedRecordError),
    Recommend(RecommendError),
    Output(io::Error),
}

impl CliError {
    /// Writes the user-facing form of this error.
    ///
    /// Unknown users get the list of available users; other errors a single
    /// line.
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        match self {
            Self::Recommend(RecommendError::UnknownUser(err)) => write_unknown_user(out, err),
            other => writeln!(out, "Error: {other}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(err) => write!(f, "{err}"),
            Self::Source(err) => write!(f, "{err}"),
            Self::Load(err) => write!(f, "{err}"),
            Self::Recommend(err) => write!(f, "{err}"),
            Self::Output(err) => write!(f, "failed to write output: {err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Logging(err) => Some(err),
            Self::Source(err) => Some(err),
            Self::Load(err) => Some(err),
            Self::Recommend(err) => Some(err),
            Self::Output(err) => Some(err),
        }
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<CsvSourceError> for CliError {
    fn from(value: CsvSourceError) -> Self {
        Self::Source(value)
    }
}

impl From<MalformedRecordError> for CliError {
    fn from(value: MalformedRecordError) -> Self {
        Self::Load(value)
    }
}

impl From<RecommendError> for CliError {
    fn from(value: RecommendError) -> Self {
        Self::Recommend(value)
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Output(value)
    }
}

/// Runs one recommendation request described by `args`, writing to `out`.
///
/// Creates the demo dataset first when `args.file` does not exist.
pub fn run(args: &Args, out: &mut impl Write) -> Result<(), CliError> {
    if let Some(log_dir) = &args.log_dir {
        init_logging(&args.log_level, log_dir)?;
    }
    info!(
        "event=app_start module=cli status=ok core_version={}",
        core_version()
    );

    let num_recs = usize::try_from(args.num_recs).map_err(|_| RecommendError::InvalidArgument {
        name: "num_recs",
        value: args.num_recs.to_string(),
        constraint: "must be at least 1",
    })?;

    if ensure_sample_dataset(&args.file)? {
        writeln!(
            out,
            "'{}' not found. Creating a sample file for demonstration.",
            args.file.display()
        )?;
    }

    let store = RatingStore::load(read_records(&args.file)?)?;
    let options = RecommendOptions {
        min_candidate_rating: args.min_rating,
    };
    let recommendations =
        RecommendService::with_options(&store, options).recommend(&args.user, num_recs)?;

    if args.json {
        write_json(out, &args.user, &recommendations)?;
    } else {
        write_text(out, &args.user, num_recs, &recommendations)?;
    }
    Ok(())
}
