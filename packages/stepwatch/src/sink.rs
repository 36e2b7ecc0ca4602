//! Destinations for rendered reports and warnings.

use std::fmt::Debug;
use std::mem;
use std::sync::{Arc, Mutex};

use crate::ERR_POISONED_LOCK;

/// Receives the text produced by timing sessions.
///
/// A session forwards three kinds of messages to its sink: reports from a non-silent
/// [`print()`](crate::TimingSession::print), the cached report on
/// [`log()`](crate::TimingSession::log) and a description of every soft failure
/// (see [`TimingError`](crate::TimingError)).
///
/// All sessions in one tree (a root session and its children) share the same sink.
///
/// # Examples
///
/// ```
/// use stepwatch::{MessageSink, TimingSession};
///
/// #[derive(Debug)]
/// struct StderrSink;
///
/// impl MessageSink for StderrSink {
///     fn emit(&self, message: &str) {
///         eprintln!("{message}");
///     }
/// }
///
/// let mut session = TimingSession::builder().sink(StderrSink).build();
/// session.start().step_named("work");
/// ```
pub trait MessageSink: Debug + Send + Sync {
    /// Delivers one message. A message may span multiple lines.
    fn emit(&self, message: &str);
}

/// Writes every message to stdout. This is the default sink.
#[derive(Clone, Copy, Debug, Default)]
#[non_exhaustive]
pub struct StdoutSink;

impl StdoutSink {
    /// Creates the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MessageSink for StdoutSink {
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    fn emit(&self, message: &str) {
        println!("{message}");
    }
}

/// Forwards every message as a `tracing` event at the `INFO` level.
///
/// Useful in applications that already route their diagnostics through a `tracing` subscriber.
#[derive(Clone, Copy, Debug, Default)]
#[non_exhaustive]
pub struct TracingSink;

impl TracingSink {
    /// Creates the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MessageSink for TracingSink {
    #[cfg_attr(test, mutants::skip)] // Output depends on the installed subscriber.
    fn emit(&self, message: &str) {
        tracing::info!(target: "stepwatch", "{message}");
    }
}

/// Keeps every message in memory.
///
/// Clones share the same storage, so one clone can be handed to a session while another
/// is kept to inspect what was emitted.
///
/// # Examples
///
/// ```
/// use stepwatch::{MemorySink, PrintOptions, TimingSession};
///
/// let sink = MemorySink::new();
/// let mut session = TimingSession::builder().sink(sink.clone()).build();
///
/// session.start().step_named("a").step_named("b");
/// session.print(PrintOptions::new());
///
/// assert_eq!(sink.messages().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    messages: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every message emitted so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect(ERR_POISONED_LOCK).clone()
    }

    /// Removes and returns every message emitted so far, oldest first.
    #[must_use]
    pub fn take(&self) -> Vec<String> {
        mem::take(&mut *self.messages.lock().expect(ERR_POISONED_LOCK))
    }

    /// Whether nothing has been emitted since creation or the last [`take()`](Self::take).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.lock().expect(ERR_POISONED_LOCK).is_empty()
    }
}

impl MessageSink for MemorySink {
    fn emit(&self, message: &str) {
        self.messages
            .lock()
            .expect(ERR_POISONED_LOCK)
            .push(message.to_owned());
    }
}

/// Shared handle to a sink, cloned into every session of a tree.
pub(crate) type SharedSink = Arc<dyn MessageSink>;

pub(crate) fn default_sink() -> SharedSink {
    Arc::new(StdoutSink::new())
}
