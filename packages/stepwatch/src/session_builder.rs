use std::sync::Arc;

use crate::pal::PlatformFacade;
use crate::sink::{SharedSink, default_sink};
use crate::{MessageSink, TimingSession};

pub(crate) const DEFAULT_SESSION_NAME: &str = "Timing";
const DEFAULT_INDENT: &str = "\t";

/// Settings shared by a session and every child session created under it.
#[derive(Clone, Debug)]
pub(crate) struct SessionConfig {
    pub(crate) platform: PlatformFacade,
    pub(crate) sink: SharedSink,

    /// Repeated once per nesting level in front of every report line.
    pub(crate) indent: String,
}

/// Creates instances of [`TimingSession`].
///
/// All parameters are optional:
/// * `name` defaults to `"Timing"`.
/// * `sink` defaults to [`StdoutSink`](crate::StdoutSink).
/// * `indent` defaults to a tab.
///
/// Child sessions inherit the sink and indent of their parent.
///
/// # Examples
///
/// ```
/// use stepwatch::{MemorySink, TimingSession};
///
/// let sink = MemorySink::new();
///
/// let session = TimingSession::builder()
///     .name("request")
///     .sink(sink.clone())
///     .indent("  ")
///     .build();
///
/// assert_eq!(session.name(), "request");
/// ```
#[derive(Clone, Debug)]
pub struct SessionBuilder {
    name: String,
    config: SessionConfig,
}

impl SessionBuilder {
    pub(crate) fn new() -> Self {
        Self {
            name: DEFAULT_SESSION_NAME.to_owned(),
            config: SessionConfig {
                platform: PlatformFacade::real(),
                sink: default_sink(),
                indent: DEFAULT_INDENT.to_owned(),
            },
        }
    }

    /// Sets the display name of the session, shown in its report header.
    #[must_use]
    pub fn name(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self
        }
    }

    /// Sets the sink that receives reports and warnings.
    #[must_use]
    pub fn sink(self, sink: impl MessageSink + 'static) -> Self {
        self.shared_sink(Arc::new(sink))
    }

    /// Sets a sink that is already shared with other owners.
    #[must_use]
    pub fn shared_sink(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.config.sink = sink;
        self
    }

    /// Sets the string repeated once per nesting level in front of report lines.
    #[must_use]
    pub fn indent(mut self, unit: impl Into<String>) -> Self {
        self.config.indent = unit.into();
        self
    }

    #[cfg(test)]
    #[must_use]
    pub(crate) fn platform(mut self, platform: PlatformFacade) -> Self {
        self.config.platform = platform;
        self
    }

    /// Creates a root session (nesting depth 0) with no steps recorded.
    #[must_use]
    pub fn build(self) -> TimingSession {
        TimingSession::from_config(self.name, 0, self.config)
    }
}
