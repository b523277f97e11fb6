//! autograder library
//!
//! Runs a named sequence of test parts against a student submission and
//! reports pass/fail status on the console.
//!
//! - Test parts: a name plus a zero-argument check
//! - Optional setup/teardown hooks around the parts
//! - Per-part failure isolation: a failing or panicking part never stops the run
//! - A final congratulations message when setup, every part, and teardown succeed
//!
//! # Example
//!
//! ```no_run
//! use autograder::Autograder;
//!
//! let mut grader = Autograder::new();
//! grader.set_setup(|| std::fs::metadata("main.cpp").map(|_| ()));
//! grader.add_part("compiles", || true);
//! grader.add_part("has a main function", || -> Result<bool, std::io::Error> {
//!     Ok(std::fs::read_to_string("main.cpp")?.contains("int main"))
//! });
//! grader.run();
//! ```

pub mod cli;
pub mod engine;
pub mod inspect;
pub mod version;

use cli::args::Args;
use inspect::{SharedInspection, SourceInspector};
use std::fs;
use std::path::PathBuf;
use termcolor::ColorChoice;
use thiserror::Error;

// Re-exports for public API
pub use cli::output::{Reporter, TerminalReporter};
pub use engine::orchestrator::Autograder;
pub use engine::part::TestPart;
pub use engine::result::{IntoOutcome, PartOutcome, RunState};

/// Error type accepted from setup and teardown hooks
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error types for autograder configuration.
#[derive(Debug, Error)]
pub enum GraderError {
    /// The assignment directory does not exist
    #[error("assignment directory '{}' does not exist", path.display())]
    InvalidRoot { path: PathBuf },

    /// No candidate file name was given
    #[error("candidate file name must not be empty")]
    EmptyCandidate,
}

/// Configuration for a grading session.
#[derive(Debug, Clone)]
pub struct GraderConfig {
    /// Assignment directory
    pub root: PathBuf,
    /// Candidate source file name, relative to `root`
    pub candidate: String,
    /// Extract declarations during setup
    pub inspect: bool,
    /// Explicit XML generator path
    pub xml_generator: Option<PathBuf>,
    /// Console color choice
    pub color: ColorChoice,
}

impl Default for GraderConfig {
    fn default() -> Self {
        GraderConfig {
            root: PathBuf::from("."),
            candidate: cli::args::DEFAULT_CANDIDATE.to_string(),
            inspect: false,
            xml_generator: None,
            color: ColorChoice::Auto,
        }
    }
}

impl GraderConfig {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Result<Self, GraderError> {
        if !args.root.is_dir() {
            return Err(GraderError::InvalidRoot {
                path: args.root.clone(),
            });
        }
        if args.candidate.trim().is_empty() {
            return Err(GraderError::EmptyCandidate);
        }

        Ok(GraderConfig {
            root: args.root.clone(),
            candidate: args.candidate.clone(),
            inspect: args.inspect,
            xml_generator: args.xml_generator.clone(),
            color: args.color_choice(),
        })
    }

    /// Path the candidate is expected at
    pub fn candidate_path(&self) -> PathBuf {
        self.root.join(&self.candidate)
    }
}

/// Build the standard grading session for a configuration.
///
/// Setup locates the candidate (and extracts declarations when
/// `config.inspect` is set); the registered parts then check that the
/// source can be read and is not empty. With inspection enabled a further
/// part requires at least one class declaration.
pub fn build_grader(config: &GraderConfig) -> Autograder {
    let slot = SharedInspection::default();

    let mut inspector = SourceInspector::new(&config.root, &config.candidate);
    if config.inspect {
        inspector = inspector.with_declarations(config.xml_generator.clone());
    }

    let mut grader = Autograder::new().with_color(config.color);
    grader.set_setup(inspector.into_setup(slot.clone()));

    let source = config.candidate_path();
    let path = source.clone();
    grader.add_part("candidate source is readable", move || {
        fs::read_to_string(&path).map(|_| ())
    });
    grader.add_part("candidate source is not empty", move || {
        fs::read_to_string(&source).map(|text| !text.trim().is_empty())
    });

    if config.inspect {
        grader.add_part("declarations were extracted", move || {
            slot.borrow()
                .as_ref()
                .and_then(|inspection| inspection.declarations.as_ref())
                .is_some_and(|index| !index.is_empty())
        });
    }

    grader
}
