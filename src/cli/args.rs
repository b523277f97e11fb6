//! Command line arguments for the autograder binary.

use clap::Parser;
use std::env;
use std::path::PathBuf;
use termcolor::ColorChoice;

/// Default candidate source file name
pub const DEFAULT_CANDIDATE: &str = "main.cpp";

/// Parsed command line arguments
#[derive(Debug, Clone, Parser)]
#[command(
    name = "autograder",
    about = "Run the assignment autograder against a student submission",
    disable_version_flag = true
)]
pub struct Args {
    /// Assignment directory containing the candidate source
    #[arg(long, env = "AUTOGRADER_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Candidate source file, relative to the assignment directory
    #[arg(long, default_value = DEFAULT_CANDIDATE)]
    pub candidate: String,

    /// Extract declarations with an XML generator during setup
    #[arg(long)]
    pub inspect: bool,

    /// Path to the XML generator (castxml or gccxml); searched on PATH if unset
    #[arg(long, env = "AUTOGRADER_XML_GENERATOR")]
    pub xml_generator: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Include debug diagnostics on stderr, such as extracted class names
    #[arg(short, long)]
    pub verbose: bool,

    /// Print version information
    #[arg(short = 'V', long)]
    pub version: bool,
}

impl Args {
    /// Color choice honouring `--no-color` and the `NO_COLOR` convention
    pub fn color_choice(&self) -> ColorChoice {
        if self.no_color || env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        }
    }
}
