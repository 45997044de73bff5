//! Terminal rendering of recommendation results.

use movierec_core::{Recommendation, UnknownUserError};
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonReport<'a> {
    user: &'a str,
    recommendations: &'a [Recommendation],
}

/// Writes a numbered recommendation list, or an explanation when empty.
pub fn write_text(
    out: &mut impl Write,
    user: &str,
    num_recs: usize,
    recommendations: &[Recommendation],
) -> io::Result<()> {
    writeln!(out, "\n--- Generating recommendations for {user} ---\n")?;

    if recommendations.is_empty() {
        writeln!(out, "Could not generate new recommendations for {user}.")?;
        writeln!(
            out,
            "This could be because they have already seen all movies liked by similar users."
        )?;
        return Ok(());
    }

    writeln!(out, "Top {num_recs} recommendations for {user}:")?;
    for (rank, recommendation) in recommendations.iter().enumerate() {
        writeln!(
            out,
            "{}. {} (predicted {:.2})",
            rank + 1,
            recommendation.item,
            recommendation.score
        )?;
    }
    Ok(())
}

/// Writes recommendations as one JSON document.
pub fn write_json(
    out: &mut impl Write,
    user: &str,
    recommendations: &[Recommendation],
) -> io::Result<()> {
    let report = JsonReport {
        user,
        recommendations,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}

/// Explains an unknown user and lists the users that do exist.
pub fn write_unknown_user(out: &mut impl Write, err: &UnknownUserError) -> io::Result<()> {
    writeln!(
        out,
        "\nError: User '{}' not found in the dataset.",
        err.requested_user
    )?;
    writeln!(out, "Available users are: {:?}", err.known_users)
}
