//! Console output for autograder runs.
//!
//! The orchestrator emits events to a [`Reporter`]; [`TerminalReporter`]
//! renders them as colored status lines.
//!
//! # Graceful Degradation
//!
//! - Non-TTY output: color disabled via `ColorChoice::Auto`, `NO_COLOR`, or `--no-color`
//! - Write failures on the output stream are ignored; reporting never
//!   changes the course of a run
//!
//! No function in this module will panic.

use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Width of the per-part header bar
const HEADER_WIDTH: usize = 80;
/// Width of the final congratulations bar
const BANNER_WIDTH: usize = 75;

const SUCCESS_MESSAGE: &str =
    "🚀🚀🚀 Congratulations, your code passed all the autograder tests! 🚀🚀🚀";

/// Observer of a run. Implementations must not influence control flow.
pub trait Reporter {
    /// A part is about to run
    fn part_started(&mut self, name: &str);

    fn part_passed(&mut self, name: &str);

    /// A part failed; `error` holds captured error text, if any
    fn part_failed(&mut self, name: &str, error: Option<&str>);

    /// A setup or teardown hook failed. `label` is "set up" or "tear down".
    fn lifecycle_failed(&mut self, label: &str, error: &str);

    /// Setup succeeded, every part passed, and teardown succeeded
    fn all_passed(&mut self);
}

/// Terminal (human-readable) reporter
pub struct TerminalReporter<W: WriteColor> {
    out: W,
}

impl TerminalReporter<StandardStream> {
    pub fn stdout(color: ColorChoice) -> Self {
        TerminalReporter::new(StandardStream::stdout(color))
    }
}

impl<W: WriteColor> TerminalReporter<W> {
    pub fn new(out: W) -> Self {
        TerminalReporter { out }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, spec: &ColorSpec, text: &str) -> io::Result<()> {
        self.out.set_color(spec)?;
        write!(self.out, "{}", text)?;
        self.out.reset()?;
        writeln!(self.out)
    }

    fn write_error(&mut self, error: &str) -> io::Result<()> {
        self.out.set_color(ColorSpec::new().set_bold(true))?;
        write!(self.out, "Error:")?;
        self.out.set_color(ColorSpec::new().set_dimmed(true))?;
        write!(self.out, " {}", error)?;
        self.out.reset()?;
        writeln!(self.out)
    }

    fn write_banner(&mut self, bg: Color, text: &str, width: usize) -> io::Result<()> {
        writeln!(self.out)?;
        let mut spec = ColorSpec::new();
        spec.set_bg(Some(bg)).set_fg(Some(Color::White)).set_intense(true);
        self.write_line(&spec, &format!("{:<width$}", text, width = width))
    }

    fn fg(color: Color) -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color));
        spec
    }
}

impl<W: WriteColor> Reporter for TerminalReporter<W> {
    fn part_started(&mut self, name: &str) {
        let header = format!("Running test: {}... 🧪", name);
        let _ = self.write_banner(Color::Cyan, &header, HEADER_WIDTH);
    }

    fn part_passed(&mut self, name: &str) {
        let text = format!("✅ {} passed! 🚀", name);
        let _ = self.write_line(&Self::fg(Color::Green), &text);
    }

    fn part_failed(&mut self, name: &str, error: Option<&str>) {
        let text = format!("❌ {} failed! 😞", name);
        let _ = self.write_line(&Self::fg(Color::Red), &text);
        if let Some(error) = error {
            let _ = self.write_error(error);
        }
    }

    fn lifecycle_failed(&mut self, label: &str, error: &str) {
        let text = format!("❌ Failed to {} autograder", label);
        let _ = self.write_line(&Self::fg(Color::Red), &text);
        let _ = self.write_error(error);
    }

    fn all_passed(&mut self) {
        let _ = self.write_banner(Color::Green, SUCCESS_MESSAGE, BANNER_WIDTH);
        let _ = self.out.flush();
    }
}
