//! Benchmarks to measure the compute overhead of `stepwatch` logic itself.
//!
//! Reports are rendered silently into a memory sink so that no terminal output
//! pollutes the measurements.

#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use stepwatch::{InstanceRegistry, MemorySink, PrintOptions, TimingSession, TracingSink};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("stepwatch_overhead");

    // Baseline measurement - no timing at all
    group.bench_function("baseline_empty", |b| {
        b.iter(|| {
            black_box(());
        });
    });

    let mut session = TimingSession::builder().sink(MemorySink::new()).build();

    group.bench_function("start_and_two_steps", |b| {
        b.iter(|| {
            session.start().step().step();
            black_box(session.steps().len());
        });
    });

    group.bench_function("pause_unpause", |b| {
        session.start();
        b.iter(|| {
            session.pause().unpause();
        });
    });

    group.bench_function("print_ten_steps_silent", |b| {
        session.start();
        for _ in 0..10 {
            session.step();
        }
        b.iter(|| {
            session.print(PrintOptions::new().index(0).silent(true));
            black_box(session.last_report().len());
        });
    });

    group.bench_function("print_with_children_silent", |b| {
        session.start();
        for _ in 0..5 {
            if let Ok(child) = session.child_start("child") {
                child.step().step();
            }
            session.step();
        }
        b.iter(|| {
            session.print(PrintOptions::new().index(0).silent(true));
            black_box(session.last_report().len());
        });
    });

    // Without a subscriber installed, the tracing sink discards finalized reports.
    let mut registry = InstanceRegistry::with_sink(TracingSink::new());

    group.bench_function("registry_start_stop", |b| {
        b.iter(|| {
            registry.start_instance("request");
            registry.get_instance("request").step();
            black_box(registry.stop_instance("request", true).is_finalized());
        });
    });

    group.finish();
}
