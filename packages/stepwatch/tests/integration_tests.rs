//! Integration tests for `stepwatch` against the real clock.
//!
//! Sleeps are used to create intervals of known minimum length. Assertions only rely on
//! ordering and ratios that hold even if the operating system oversleeps a little.

use std::thread;
use std::time::Duration;

use stepwatch::{LastResult, MemorySink, PrintOptions, TimingError, TimingSession};

fn session_with_sink() -> (TimingSession, MemorySink) {
    let sink = MemorySink::new();
    let session = TimingSession::builder().sink(sink.clone()).build();
    (session, sink)
}

#[test]
#[cfg_attr(miri, ignore)] // Miri is too slow for real sleeps to be meaningful.
fn longer_interval_gets_larger_share() {
    let (mut session, _) = session_with_sink();

    session.start();
    thread::sleep(Duration::from_millis(10));
    session.step_named("A");
    thread::sleep(Duration::from_millis(30));
    session.stop_named("B");

    session.print(PrintOptions::new().silent(true));

    let percentages = session.last_result().percentages().unwrap();
    assert_eq!(percentages.len(), 2);

    let first = *percentages.first().unwrap();
    let second = *percentages.last().unwrap();
    assert!((first + second - 100.0).abs() < 1e-6, "{first} + {second} != 100");
    assert!(second > first, "expected {second} > {first}");
}

#[test]
#[cfg_attr(miri, ignore)] // Miri is too slow for real sleeps to be meaningful.
fn steps_never_go_backwards() {
    let (mut session, _) = session_with_sink();

    session.start();
    for _ in 0..50 {
        session.step();
    }

    let offsets: Vec<_> = session.steps().iter().map(|step| step.offset()).collect();
    assert!(offsets.windows(2).all(|pair| pair.first() <= pair.last()));
}

#[test]
#[cfg_attr(miri, ignore)] // Miri is too slow for real sleeps to be meaningful.
fn pause_is_excluded_from_interval() {
    let (mut session, _) = session_with_sink();

    session.start().pause();
    thread::sleep(Duration::from_millis(50));
    session.unpause().step_named("after pause");

    let paused = session.total_paused();
    assert!(paused >= Duration::from_millis(50));

    let interval = session.get_time(1).unwrap();
    assert!(
        interval < Duration::from_millis(50),
        "pause leaked into interval: {interval:?}"
    );
}

#[test]
fn started_but_never_stepped() {
    let (mut session, _) = session_with_sink();

    session.start().print(PrintOptions::new().silent(true));

    assert_eq!(session.last_result(), &LastResult::Percentages(Vec::new()));
    assert_eq!(
        session.last_error(),
        Some(&TimingError::InsufficientSteps {
            session: "Timing".to_string(),
            recorded: 1,
        })
    );
}

#[test]
fn step_while_paused_is_not_recorded() {
    let (mut session, sink) = session_with_sink();

    session.start().step_named("X").pause().step_named("Y");

    assert_eq!(session.steps().len(), 2);
    assert_eq!(session.last_result(), &LastResult::Failed);
    assert_eq!(
        sink.messages(),
        vec!["timing 'Timing' is paused, step 'Y' was not recorded"]
    );
}

#[test]
fn child_is_attached_to_following_step() {
    let (mut session, _) = session_with_sink();

    session.start_named("Root");
    session.child_start("C1").unwrap();
    session.child_stop();
    session.step_named("S1");
    session.print(PrintOptions::new().silent(true));

    let step = session.steps().get(1).unwrap();
    assert_eq!(step.name(), "S1");
    assert_eq!(step.children().len(), 1);
    assert_eq!(step.children().first().unwrap().name(), "C1");
}

#[test]
fn chained_misuse_never_panics() {
    let (mut session, sink) = session_with_sink();

    session
        .unpause()
        .child_stop()
        .print(PrintOptions::new())
        .step()
        .last_child()
        .pause()
        .step()
        .stop()
        .log();

    assert_eq!(session.steps().len(), 1);
    assert!(session.is_paused());
    assert!(!sink.is_empty());
}
