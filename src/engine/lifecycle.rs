//! Setup and teardown hooks.
//!
//! A hook is a single no-argument call. Whatever goes wrong inside it, an
//! `Err` or a panic, is reported and turned into a `false` return so the
//! orchestrator never terminates abnormally because of caller code.

use crate::cli::output::Reporter;
use crate::engine::part::panic_message;
use crate::BoxError;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Boxed lifecycle hook
pub type Hook = Box<dyn FnMut() -> Result<(), BoxError>>;

/// Box a closure as a [`Hook`], widening its error type
pub fn hook<F, E>(mut f: F) -> Hook
where
    F: FnMut() -> Result<(), E> + 'static,
    E: Into<BoxError>,
{
    Box::new(move || f().map_err(Into::into))
}

/// Lifecycle phase a hook belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SetUp,
    TearDown,
}

impl Phase {
    /// Label used in failure messages ("Failed to set up autograder")
    pub fn label(&self) -> &'static str {
        match self {
            Phase::SetUp => "set up",
            Phase::TearDown => "tear down",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Run an optional hook. Returns `true` when the hook is absent or
/// returns normally.
pub fn run_phase(phase: Phase, hook: Option<&mut Hook>, reporter: &mut dyn Reporter) -> bool {
    let Some(hook) = hook else {
        tracing::debug!(%phase, "no hook registered");
        return true;
    };

    let error = match panic::catch_unwind(AssertUnwindSafe(|| hook())) {
        Ok(Ok(())) => return true,
        Ok(Err(e)) => e.to_string(),
        Err(payload) => panic_message(payload.as_ref()),
    };

    tracing::warn!(%phase, %error, "lifecycle hook failed");
    reporter.lifecycle_failed(phase.label(), &error);
    false
}
