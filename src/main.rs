//! autograder CLI entry point
//!
//! Runs the assignment autograder against a student submission. The
//! outcome is communicated only through printed status lines.

use autograder::cli::args::Args;
use autograder::version::get_build_info;
use autograder::{build_grader, GraderConfig};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    if args.version {
        println!("{}", get_build_info());
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose);

    let config = match GraderConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Run 'autograder --help' for usage information.");
            return ExitCode::from(2);
        }
    };

    let mut grader = build_grader(&config);
    grader.run();

    ExitCode::SUCCESS
}

/// Diagnostics go to stderr so they never interleave with the report on stdout
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .try_init();
}
