//! Test part orchestrator.
//!
//! Owns the registered parts and the optional setup/teardown hooks, and
//! drives a run through set up → every part → tear down.
//!
//! # Failure isolation
//!
//! - Setup failure: reported, then the run stops. No part and no teardown runs.
//! - Part failure (`false`, `Err`, or panic): reported, and the next part runs.
//! - Teardown failure: reported, and the final success message is withheld.
//!
//! Nothing raised by caller code escapes [`Autograder::run`]. The outcome
//! is communicated only through the reporter; choosing a process exit
//! code is left to the caller.
//!
//! Execution is sequential on the calling thread. There is no timeout: a
//! part that never returns blocks the run.

use crate::cli::output::{Reporter, TerminalReporter};
use crate::engine::lifecycle::{self, run_phase, Hook, Phase};
use crate::engine::part::TestPart;
use crate::engine::result::{IntoOutcome, PartOutcome, RunState, RunSummary};
use crate::BoxError;
use termcolor::ColorChoice;
use tracing::{debug, info};

/// Autograder orchestrator
pub struct Autograder {
    parts: Vec<TestPart>,
    setup: Option<Hook>,
    teardown: Option<Hook>,
    color: ColorChoice,
    state: RunState,
}

impl Autograder {
    /// Create an orchestrator with no parts and no hooks
    pub fn new() -> Self {
        Autograder {
            parts: Vec::new(),
            setup: None,
            teardown: None,
            color: ColorChoice::Auto,
            state: RunState::NotStarted,
        }
    }

    /// Color choice used by [`Autograder::run`]
    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Append a part. Parts run in the order they were added.
    pub fn add_part<F, R>(&mut self, name: impl Into<String>, check: F)
    where
        F: FnMut() -> R + 'static,
        R: IntoOutcome,
    {
        self.parts.push(TestPart::new(name, check));
    }

    /// Append an already constructed part
    pub fn register_part(&mut self, part: TestPart) {
        self.parts.push(part);
    }

    /// Register several parts at once
    pub fn register_parts(&mut self, parts: impl IntoIterator<Item = TestPart>) {
        self.parts.extend(parts);
    }

    pub fn set_setup<F, E>(&mut self, setup: F)
    where
        F: FnMut() -> Result<(), E> + 'static,
        E: Into<BoxError>,
    {
        self.setup = Some(lifecycle::hook(setup));
    }

    pub fn set_teardown<F, E>(&mut self, teardown: F)
    where
        F: FnMut() -> Result<(), E> + 'static,
        E: Into<BoxError>,
    {
        self.teardown = Some(lifecycle::hook(teardown));
    }

    pub fn clear_setup(&mut self) {
        self.setup = None;
    }

    pub fn clear_teardown(&mut self) {
        self.teardown = None;
    }

    /// Names of the registered parts, in execution order
    pub fn part_names(&self) -> Vec<&str> {
        self.parts.iter().map(TestPart::name).collect()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// State reached by the most recent run
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run the full lifecycle, reporting to stdout
    pub fn run(&mut self) {
        let mut reporter = TerminalReporter::stdout(self.color);
        self.run_with(&mut reporter);
    }

    /// Run the full lifecycle against the given reporter.
    ///
    /// Each call starts from scratch: setup, every part, and teardown run again.
    pub fn run_with(&mut self, reporter: &mut dyn Reporter) {
        self.state = RunState::SettingUp;
        debug!(parts = self.parts.len(), "setting up");
        if !run_phase(Phase::SetUp, self.setup.as_mut(), reporter) {
            self.state = RunState::AbortedAtSetup;
            info!(state = %self.state, "run aborted");
            return;
        }

        self.state = RunState::Running;
        let summary = self.run_parts(reporter);

        self.state = RunState::TearingDown;
        debug!("tearing down");
        if !run_phase(Phase::TearDown, self.teardown.as_mut(), reporter) {
            self.state = RunState::AbortedAtTeardown;
            info!(
                state = %self.state,
                passed = summary.passed,
                failed = summary.failed,
                "run aborted"
            );
            return;
        }

        self.state = RunState::Done;
        info!(
            total = summary.total(),
            failed = summary.failed,
            "run finished"
        );
        if !summary.any_failed() {
            reporter.all_passed();
        }
    }

    /// Run every part in order, never stopping early
    fn run_parts(&mut self, reporter: &mut dyn Reporter) -> RunSummary {
        let mut summary = RunSummary::default();

        for (index, part) in self.parts.iter_mut().enumerate() {
            reporter.part_started(part.name());
            debug!(index, part = part.name(), "running part");

            let outcome = part.execute();
            match &outcome {
                PartOutcome::Passed => reporter.part_passed(part.name()),
                PartOutcome::Failed { error } => {
                    reporter.part_failed(part.name(), error.as_deref())
                }
            }
            debug!(index, part = part.name(), %outcome, "part finished");

            summary.record(&outcome);
        }

        summary
    }
}

impl Default for Autograder {
    fn default() -> Self {
        Self::new()
    }
}
