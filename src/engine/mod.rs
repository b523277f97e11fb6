//! Grading engine module.
//!
//! Provides test parts, lifecycle hooks, and run orchestration.

pub mod lifecycle;
pub mod orchestrator;
pub mod part;
pub mod result;
