//! Full run lifecycle tests.
//!
//! Covers set up → parts → tear down sequencing, per-part failure
//! isolation, and when the final success message is emitted.

use crate::mocks::{CallLog, Event, RecordingReporter};
use autograder::{Autograder, BoxError, PartOutcome, RunState, TestPart};
use std::io;

fn run(grader: &mut Autograder) -> RecordingReporter {
    let mut reporter = RecordingReporter::new();
    grader.run_with(&mut reporter);
    reporter
}

// Helper to register a part that logs its name and returns `result`
fn logged_part(grader: &mut Autograder, log: &CallLog, name: &'static str, result: bool) {
    let log = log.clone();
    grader.add_part(name, move || {
        log.push(name);
        result
    });
}

// Scenarios

#[test]
fn test_single_passing_part_without_hooks() {
    let mut grader = Autograder::new();
    grader.add_part("compiles", || true);

    let reporter = run(&mut grader);

    assert_eq!(
        reporter.events,
        vec![
            Event::Started("compiles".to_string()),
            Event::Passed("compiles".to_string()),
            Event::AllPassed,
        ]
    );
    assert_eq!(grader.state(), RunState::Done);
}

#[test]
fn test_false_part_does_not_stop_the_next() {
    let log = CallLog::new();
    let mut grader = Autograder::new();
    logged_part(&mut grader, &log, "t1", false);
    logged_part(&mut grader, &log, "t2", true);

    let reporter = run(&mut grader);

    assert_eq!(log.entries(), vec!["t1", "t2"]);
    assert_eq!(
        reporter.events,
        vec![
            Event::Started("t1".to_string()),
            Event::Failed("t1".to_string(), None),
            Event::Started("t2".to_string()),
            Event::Passed("t2".to_string()),
        ]
    );
    assert!(!reporter.succeeded());
}

#[test]
fn test_setup_error_aborts_run() {
    let log = CallLog::new();
    let mut grader = Autograder::new();
    grader.set_setup(|| Err::<(), _>(io::Error::new(io::ErrorKind::NotFound, "missing file")));
    let teardown_log = log.clone();
    grader.set_teardown(move || {
        teardown_log.push("teardown");
        Ok::<(), BoxError>(())
    });
    logged_part(&mut grader, &log, "t1", true);

    let reporter = run(&mut grader);

    assert!(log.entries().is_empty());
    assert_eq!(
        reporter.events,
        vec![Event::LifecycleFailed(
            "set up".to_string(),
            "missing file".to_string()
        )]
    );
    assert_eq!(grader.state(), RunState::AbortedAtSetup);
}

#[test]
fn test_erroring_part_reports_error_text() {
    let mut grader = Autograder::new();
    grader.add_part("t1", || -> Result<bool, String> { Err("bad index".to_string()) });

    let reporter = run(&mut grader);

    assert!(reporter.failed("t1"));
    assert_eq!(reporter.error_for("t1"), Some("bad index"));
    assert!(!reporter.succeeded());
}

// Properties

#[test]
fn test_every_part_runs_exactly_once_in_order() {
    let log = CallLog::new();
    let mut grader = Autograder::new();
    logged_part(&mut grader, &log, "first", true);
    logged_part(&mut grader, &log, "second", false);
    logged_part(&mut grader, &log, "third", true);
    logged_part(&mut grader, &log, "fourth", false);

    let reporter = run(&mut grader);

    assert_eq!(log.entries(), vec!["first", "second", "third", "fourth"]);
    assert_eq!(reporter.started(), vec!["first", "second", "third", "fourth"]);
}

#[test]
fn test_duplicate_names_are_distinct_parts() {
    let log = CallLog::new();
    let mut grader = Autograder::new();
    logged_part(&mut grader, &log, "same", true);
    logged_part(&mut grader, &log, "same", false);

    let reporter = run(&mut grader);

    assert_eq!(log.count("same"), 2);
    assert_eq!(
        reporter.events,
        vec![
            Event::Started("same".to_string()),
            Event::Passed("same".to_string()),
            Event::Started("same".to_string()),
            Event::Failed("same".to_string(), None),
        ]
    );
}

#[test]
fn test_unit_and_none_returns_pass() {
    let mut grader = Autograder::new();
    grader.add_part("unit", || ());
    grader.add_part("none", || None::<bool>);
    grader.add_part("ok unit", || Ok::<(), String>(()));

    let reporter = run(&mut grader);

    assert!(reporter.succeeded());
    assert!(!reporter.failed("unit"));
    assert!(!reporter.failed("none"));
}

#[test]
fn test_panicking_part_is_isolated() {
    let log = CallLog::new();
    let mut grader = Autograder::new();
    grader.add_part("explodes", || -> bool { panic!("index out of bounds") });
    logged_part(&mut grader, &log, "after", true);

    let reporter = run(&mut grader);

    assert_eq!(reporter.error_for("explodes"), Some("index out of bounds"));
    assert_eq!(log.entries(), vec!["after"]);
    assert!(!reporter.succeeded());
    assert_eq!(grader.state(), RunState::Done);
}

#[test]
fn test_teardown_runs_after_failures() {
    let log = CallLog::new();
    let mut grader = Autograder::new();
    logged_part(&mut grader, &log, "t1", false);
    logged_part(&mut grader, &log, "t2", false);
    let teardown_log = log.clone();
    grader.set_teardown(move || {
        teardown_log.push("teardown");
        Ok::<(), BoxError>(())
    });

    run(&mut grader);

    assert_eq!(log.entries(), vec!["t1", "t2", "teardown"]);
}

#[test]
fn test_setup_runs_before_parts() {
    let log = CallLog::new();
    let mut grader = Autograder::new();
    let setup_log = log.clone();
    grader.set_setup(move || {
        setup_log.push("setup");
        Ok::<(), BoxError>(())
    });
    logged_part(&mut grader, &log, "t1", true);

    let reporter = run(&mut grader);

    assert_eq!(log.entries(), vec!["setup", "t1"]);
    assert!(reporter.succeeded());
}

#[test]
fn test_teardown_failure_suppresses_success_only() {
    let mut grader = Autograder::new();
    grader.add_part("t1", || true);
    grader.set_teardown(|| Err::<(), _>("could not remove build dir"));

    let reporter = run(&mut grader);

    assert_eq!(
        reporter.events,
        vec![
            Event::Started("t1".to_string()),
            Event::Passed("t1".to_string()),
            Event::LifecycleFailed(
                "tear down".to_string(),
                "could not remove build dir".to_string()
            ),
        ]
    );
    assert_eq!(grader.state(), RunState::AbortedAtTeardown);
}

#[test]
fn test_panicking_setup_is_reported() {
    let mut grader = Autograder::new();
    grader.set_setup(|| -> Result<(), BoxError> { panic!("generator crashed") });
    grader.add_part("t1", || true);

    let reporter = run(&mut grader);

    assert_eq!(
        reporter.events,
        vec![Event::LifecycleFailed(
            "set up".to_string(),
            "generator crashed".to_string()
        )]
    );
}

#[test]
fn test_empty_grader_reports_success() {
    let mut grader = Autograder::new();
    let reporter = run(&mut grader);
    assert_eq!(reporter.events, vec![Event::AllPassed]);
}

#[test]
fn test_register_prebuilt_parts() {
    let mut grader = Autograder::new();
    grader.register_parts(vec![
        TestPart::new("a", || true),
        TestPart::new("b", || PartOutcome::failed_with("custom")),
    ]);
    grader.register_part(TestPart::new("c", || ()));

    let reporter = run(&mut grader);

    assert_eq!(reporter.started(), vec!["a", "b", "c"]);
    assert_eq!(reporter.error_for("b"), Some("custom"));
}

#[test]
fn test_rerun_repeats_the_whole_lifecycle() {
    let log = CallLog::new();
    let mut grader = Autograder::new();
    let setup_log = log.clone();
    grader.set_setup(move || {
        setup_log.push("setup");
        Ok::<(), BoxError>(())
    });
    logged_part(&mut grader, &log, "t1", true);
    let teardown_log = log.clone();
    grader.set_teardown(move || {
        teardown_log.push("teardown");
        Ok::<(), BoxError>(())
    });

    run(&mut grader);
    run(&mut grader);

    assert_eq!(
        log.entries(),
        vec!["setup", "t1", "teardown", "setup", "t1", "teardown"]
    );
}

#[test]
fn test_parts_can_share_setup_state() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let index: Rc<RefCell<Vec<String>>> = Rc::default();
    let mut grader = Autograder::new();
    let slot = index.clone();
    grader.set_setup(move || {
        slot.borrow_mut().push("StringVector".to_string());
        Ok::<(), BoxError>(())
    });
    let slot = index.clone();
    grader.add_part("declares StringVector", move || {
        slot.borrow().iter().any(|c| c == "StringVector")
    });

    let reporter = run(&mut grader);

    assert!(reporter.succeeded());
}
