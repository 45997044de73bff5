//! `movierec` binary entry point.

use clap::Parser;
use movierec_cli::{run, Args};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match run(&args, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.write_to(&mut out).is_err() {
                eprintln!("Error: {err}");
            }
            let _ = out.flush();
            ExitCode::FAILURE
        }
    }
}
