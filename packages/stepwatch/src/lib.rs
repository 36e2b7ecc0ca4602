#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Named checkpoint timing for ad-hoc performance investigations.
//!
//! This package lets you mark named checkpoints ("steps") while code runs and then see how
//! the time between the first and the last checkpoint was split between them:
//!
//! * [`TimingSession`] - records steps, can pause its clock and renders reports
//! * [`InstanceRegistry`] - looks up sessions by key, creating them on first use
//! * [`MessageSink`] - where reports and warnings go ([`StdoutSink`] by default)
//!
//! This package is meant for development-time instrumentation, not for production telemetry.
//! Nothing is aggregated across processes or persisted.
//!
//! # Simple usage
//!
//! ```
//! use stepwatch::{PrintOptions, TimingSession};
//!
//! let mut session = TimingSession::new();
//!
//! session.start_named("startup");
//! std::thread::sleep(std::time::Duration::from_millis(2));
//! session.step_named("load config");
//! std::thread::sleep(std::time::Duration::from_millis(4));
//! session.stop_named("connect");
//!
//! // Prints something like:
//! // ---------------- timing report ----------------
//! // «» startup
//! //   total	: 6 ms
//! //   paused	: 0 ms
//! //  1. load config	: 33.41 %	 (2 ms)
//! //  2. connect	: 66.59 %	 (4 ms)
//! session.print(PrintOptions::new());
//! ```
//!
//! # Pausing
//!
//! Time between [`pause()`](TimingSession::pause) and [`unpause()`](TimingSession::unpause)
//! does not count towards any step. Steps cannot be recorded while paused.
//!
//! # Nested timings
//!
//! A child session measures the inside of one step of its parent. It is attached to the
//! next step the parent records and is rendered inline, one level deeper, in the parent's
//! report.
//!
//! ```
//! use stepwatch::{MemorySink, PrintOptions, TimingSession};
//!
//! let sink = MemorySink::new();
//! let mut session = TimingSession::builder().name("request").sink(sink.clone()).build();
//!
//! session.start();
//! session.child_start("query")?.step_named("plan").step_named("execute");
//! session.step_named("database");
//! session.step_named("render");
//!
//! session.print(PrintOptions::new());
//!
//! let report = sink.messages().pop().unwrap();
//! assert!(report.contains("«\t» query"));
//! # Ok::<(), stepwatch::TimingError>(())
//! ```
//!
//! # Misuse
//!
//! No operation panics or aborts the caller because of misuse such as stepping while paused.
//! Instead, a warning describing the [`TimingError`] is emitted to the sink and to `tracing`,
//! and the session carries on.

mod error;
mod last_result;
mod pal;
mod registry;
mod report;
mod session;
mod session_builder;
mod sink;
mod step;

pub use error::TimingError;
pub use last_result::LastResult;
pub use registry::{InstanceRegistry, StoppedInstance};
pub use report::PrintOptions;
pub use session::TimingSession;
pub use session_builder::SessionBuilder;
pub use sink::{MemorySink, MessageSink, StdoutSink, TracingSink};
pub use step::Step;

pub(crate) const ERR_POISONED_LOCK: &str = "encountered poisoned lock - program validity cannot be guaranteed";
