//! Simplified example demonstrating the key `stepwatch` types working together.
//!
//! This example shows how to:
//! - record named steps in a `TimingSession`
//! - exclude a pause from the measurement
//! - nest a child timing under a step
//! - drive per-request sessions through an `InstanceRegistry`
//!
//! Run with: `cargo run --example stepwatch_basic`.

use std::hint::black_box;
use std::thread;
use std::time::Duration;

use stepwatch::{InstanceRegistry, PrintOptions, TimingSession};

fn busy_work(millis: u64) {
    thread::sleep(Duration::from_millis(millis));
    black_box(millis);
}

fn main() {
    println!("=== Step Timing Example ===");
    println!();

    let mut session = TimingSession::builder().name("startup").build();

    session.start();
    busy_work(5);
    session.step_named("read config");

    // Waiting for user input should not count as startup time.
    session.pause();
    busy_work(50);
    session.unpause();

    if let Ok(child) = session.child_start("open database") {
        busy_work(3);
        child.step_named("connect");
        busy_work(7);
        child.step_named("migrate");
    }
    session.step_named("database");

    busy_work(10);
    session.stop_named("warm caches");

    session.print(PrintOptions::new());
    println!();

    let mut registry = InstanceRegistry::new();

    for request in ["GET /", "GET /health"] {
        registry.start_instance(request);
    }

    busy_work(2);
    registry.get_instance("GET /").step_named("routed");
    busy_work(4);
    registry.get_instance("GET /health").step_named("routed");

    for request in ["GET /", "GET /health"] {
        busy_work(1);
        let _finished = registry.stop_instance(request, true);
        println!();
    }
}
