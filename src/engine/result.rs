//! Part outcomes and run bookkeeping.
//!
//! Classifies what a check returned and tracks where a run currently is in
//! the setup → parts → teardown lifecycle.

use std::fmt;

/// Outcome of a single test part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartOutcome {
    /// Check returned `true` or nothing
    Passed,
    /// Check returned `false`, an error, or panicked
    Failed {
        /// Captured error text; `None` for a plain `false`
        error: Option<String>,
    },
}

impl PartOutcome {
    /// Failure carrying captured error text
    pub fn failed_with(error: impl Into<String>) -> Self {
        PartOutcome::Failed {
            error: Some(error.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PartOutcome::Failed { .. })
    }
}

impl fmt::Display for PartOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartOutcome::Passed => write!(f, "PASS"),
            PartOutcome::Failed { error: None } => write!(f, "FAIL"),
            PartOutcome::Failed { error: Some(error) } => write!(f, "FAIL: {}", error),
        }
    }
}

/// Conversion from a check's return value into a [`PartOutcome`].
///
/// `()` and `None` stand for "returned nothing" and count as a pass.
/// `Err` is the counterpart of raising: it fails the part and its
/// `Display` text is reported.
pub trait IntoOutcome {
    fn into_outcome(self) -> PartOutcome;
}

impl IntoOutcome for PartOutcome {
    fn into_outcome(self) -> PartOutcome {
        self
    }
}

impl IntoOutcome for () {
    fn into_outcome(self) -> PartOutcome {
        PartOutcome::Passed
    }
}

impl IntoOutcome for bool {
    fn into_outcome(self) -> PartOutcome {
        if self {
            PartOutcome::Passed
        } else {
            PartOutcome::Failed { error: None }
        }
    }
}

impl IntoOutcome for Option<bool> {
    fn into_outcome(self) -> PartOutcome {
        match self {
            None => PartOutcome::Passed,
            Some(passed) => passed.into_outcome(),
        }
    }
}

impl<T, E> IntoOutcome for Result<T, E>
where
    T: IntoOutcome,
    E: fmt::Display,
{
    fn into_outcome(self) -> PartOutcome {
        match self {
            Ok(value) => value.into_outcome(),
            Err(e) => PartOutcome::failed_with(e.to_string()),
        }
    }
}

/// Lifecycle state of an orchestrator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    NotStarted,
    SettingUp,
    Running,
    TearingDown,
    Done,
    AbortedAtSetup,
    AbortedAtTeardown,
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunState::Done | RunState::AbortedAtSetup | RunState::AbortedAtTeardown
        )
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::NotStarted => "not started",
            RunState::SettingUp => "setting up",
            RunState::Running => "running",
            RunState::TearingDown => "tearing down",
            RunState::Done => "done",
            RunState::AbortedAtSetup => "aborted at setup",
            RunState::AbortedAtTeardown => "aborted at teardown",
        };
        write!(f, "{}", name)
    }
}

/// Pass/fail tally for the parts of one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: u32,
    pub failed: u32,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &PartOutcome) {
        if outcome.is_failure() {
            self.failed += 1;
        } else {
            self.passed += 1;
        }
    }

    pub fn total(&self) -> u32 {
        self.passed + self.failed
    }

    /// True once any part has failed
    pub fn any_failed(&self) -> bool {
        self.failed > 0
    }
}
