//! Test parts: a name paired with a zero-argument check.

use crate::engine::result::{IntoOutcome, PartOutcome};
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

/// Boxed check function, already normalized to a [`PartOutcome`]
pub type CheckFn = Box<dyn FnMut() -> PartOutcome>;

/// One named, independently executed unit of grading logic.
///
/// Parts are identified by their position in the orchestrator, so names
/// need not be unique.
pub struct TestPart {
    name: String,
    check: CheckFn,
}

impl TestPart {
    /// Create a part from any closure whose return value converts into an outcome
    pub fn new<F, R>(name: impl Into<String>, mut check: F) -> Self
    where
        F: FnMut() -> R + 'static,
        R: IntoOutcome,
    {
        TestPart {
            name: name.into(),
            check: Box::new(move || check().into_outcome()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the check once. Panics are caught and become failures.
    pub(crate) fn execute(&mut self) -> PartOutcome {
        let check = &mut self.check;
        match panic::catch_unwind(AssertUnwindSafe(|| check())) {
            Ok(outcome) => outcome,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(part = %self.name, %message, "check panicked");
                PartOutcome::failed_with(message)
            }
        }
    }
}

impl fmt::Debug for TestPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestPart").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Extract readable text from a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panicked during execution".to_string()
    }
}
