use std::mem;
use std::time::{Duration, Instant};

use tracing::{trace, warn};

use crate::pal::Platform;
use crate::session_builder::{DEFAULT_SESSION_NAME, SessionConfig};
use crate::{LastResult, SessionBuilder, Step, TimingError};

const START_STEP_NAME: &str = "start";

/// Records named, timestamped steps and renders them as a percentage breakdown.
///
/// A session goes through a simple lifecycle: [`start()`](Self::start) records the initial
/// checkpoint, every [`step()`](Self::step) records another one and
/// [`print()`](Self::print) reports how the time between the first and the last step was
/// split between the intervals. Time spent between [`pause()`](Self::pause) and
/// [`unpause()`](Self::unpause) is excluded from all intervals.
///
/// Nested measurements are made with [`child()`](Self::child): the child is a session of its
/// own that is attached to the *next* step of its parent and rendered inline, indented one
/// level deeper, in the parent's report.
///
/// Misuse (stepping while paused, reporting without steps, ...) never panics. The session
/// emits a warning to its [`MessageSink`](crate::MessageSink) and carries on. Misuse through
/// a `&mut self` method is also remembered as [`last_error()`](Self::last_error).
///
/// # Examples
///
/// ```
/// use stepwatch::{PrintOptions, TimingSession};
///
/// let mut session = TimingSession::builder().name("startup").build();
///
/// session.start();
/// // load configuration
/// session.step_named("config");
/// // open the database
/// session.step_named("database");
///
/// session.print(PrintOptions::new().silent(true));
///
/// let percentages = session.last_result().percentages().unwrap();
/// assert_eq!(percentages.len(), 2);
/// ```
#[derive(Debug)]
pub struct TimingSession {
    pub(crate) name: String,
    pub(crate) depth: usize,

    /// Step offsets are measured from this instant.
    epoch: Instant,

    pub(crate) steps: Vec<Step>,
    paused_at: Option<Instant>,
    pub(crate) accumulated_pause: Duration,

    /// Children created since the last step. Flushed into the next step.
    pending_children: Vec<TimingSession>,

    pub(crate) last_result: LastResult,
    pub(crate) last_report: String,
    pub(crate) last_error: Option<TimingError>,

    pub(crate) config: SessionConfig,
}

impl TimingSession {
    /// Creates a root session with default settings: named `"Timing"`, reporting to stdout.
    ///
    /// Use [`builder()`](Self::builder) to customize the session.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts building a customized root session.
    #[must_use]
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    pub(crate) fn from_config(name: String, depth: usize, config: SessionConfig) -> Self {
        let epoch = config.platform.now();

        Self {
            name,
            depth,
            epoch,
            steps: Vec::new(),
            paused_at: None,
            accumulated_pause: Duration::ZERO,
            pending_children: Vec::new(),
            last_result: LastResult::Empty,
            last_report: String::new(),
            last_error: None,
            config,
        }
    }

    /// Discards all steps, pending children, pause state and results.
    ///
    /// The name, nesting depth and configuration of the session are kept, as is the most
    /// recently rendered report, which [`log()`](Self::log) can still emit.
    pub fn reset(&mut self) -> &mut Self {
        self.steps.clear();
        self.paused_at = None;
        self.accumulated_pause = Duration::ZERO;
        self.pending_children.clear();
        self.last_result = LastResult::Empty;
        self.last_error = None;
        self
    }

    /// Resets the session and records the initial checkpoint.
    pub fn start(&mut self) -> &mut Self {
        self.reset();
        self.step_named(START_STEP_NAME)
    }

    /// Renames the session, resets it and records the initial checkpoint.
    pub fn start_named(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self.start()
    }

    /// Records a step named `Step N`, where N is the number of steps recorded before it.
    pub fn step(&mut self) -> &mut Self {
        let name = format!("Step {}", self.steps.len());
        self.step_named(name)
    }

    /// Records a step with the given name.
    ///
    /// The step takes ownership of every child session created since the previous step.
    ///
    /// If the session is paused, nothing is recorded and a
    /// [`TimingError::StepWhilePaused`] warning is emitted.
    pub fn step_named(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();

        if self.is_paused() {
            self.fail(TimingError::StepWhilePaused {
                session: self.name.clone(),
                step: name,
            });
            self.last_result = LastResult::Failed;
            return self;
        }

        let offset = self.active_elapsed();
        let index = self.steps.len();
        let children = mem::take(&mut self.pending_children);

        trace!(
            session = %self.name,
            step = %name,
            index,
            offset = ?offset,
            children = children.len(),
            "recorded step"
        );

        self.steps.push(Step::new(name, offset, children));
        self.last_result = LastResult::StepIndex(index);
        self
    }

    /// Records a final step named after the session, then pauses the clock.
    pub fn stop(&mut self) -> &mut Self {
        let name = self.name.clone();
        self.stop_named(name)
    }

    /// Records a final step with the given name, then pauses the clock.
    pub fn stop_named(&mut self, name: impl Into<String>) -> &mut Self {
        self.step_named(name);
        self.pause()
    }

    /// Stops the clock until [`unpause()`](Self::unpause).
    ///
    /// Pausing an already paused session restarts the pause from now, which means the time
    /// since the first `pause()` call will count towards the next step.
    pub fn pause(&mut self) -> &mut Self {
        let now = self.config.platform.now();

        trace!(session = %self.name, "paused");

        self.paused_at = Some(now);
        self
    }

    /// Resumes the clock, excluding the time since [`pause()`](Self::pause) from all
    /// future step offsets.
    ///
    /// The length of the pause becomes the [`last_result()`](Self::last_result). If the
    /// session is not paused, a [`TimingError::UnpauseWithoutPause`] warning is emitted.
    pub fn unpause(&mut self) -> &mut Self {
        let Some(paused_at) = self.paused_at.take() else {
            self.fail(TimingError::UnpauseWithoutPause {
                session: self.name.clone(),
            });
            self.last_result = LastResult::Failed;
            return self;
        };

        let paused_for = self
            .config
            .platform
            .now()
            .saturating_duration_since(paused_at);

        self.accumulated_pause = self.accumulated_pause.saturating_add(paused_for);
        self.last_result = LastResult::Duration(paused_for);

        trace!(
            session = %self.name,
            paused = ?paused_for,
            "unpaused"
        );

        self
    }

    /// Returns the time between step `index - 1` and step `index`.
    ///
    /// Returns `None` and emits a [`TimingError::IndexOutOfRange`] warning unless
    /// `0 < index < steps().len()`. The warning is not stored as
    /// [`last_error()`](Self::last_error), as this method does not modify the session.
    #[must_use]
    pub fn get_time(&self, index: usize) -> Option<Duration> {
        let interval = self.interval(index);

        if interval.is_none() {
            self.warn(&TimingError::IndexOutOfRange {
                session: self.name.clone(),
                index,
                len: self.steps.len(),
            });
        }

        interval
    }

    /// Creates a child session that will be attached to the next step of this session.
    ///
    /// The child starts out empty, one nesting level deeper than this session, and shares
    /// its clock, sink and indent. Call [`start()`](Self::start) on it (or use
    /// [`child_start()`](Self::child_start)) to begin measuring.
    ///
    /// # Errors
    ///
    /// Returns [`TimingError::ChildWithoutParentStep`] (and emits it as a warning) if this
    /// session has not recorded any step yet.
    pub fn child(&mut self) -> Result<&mut Self, TimingError> {
        if self.steps.is_empty() {
            let error = TimingError::ChildWithoutParentStep {
                session: self.name.clone(),
            };
            self.fail(error.clone());
            return Err(error);
        }

        let child = Self::from_config(
            DEFAULT_SESSION_NAME.to_owned(),
            self.depth.saturating_add(1),
            self.config.clone(),
        );
        self.pending_children.push(child);

        Ok(self
            .pending_children
            .last_mut()
            .expect("a child was pushed on the line above"))
    }

    /// Creates a child session and starts it under the given name.
    ///
    /// # Errors
    ///
    /// Returns [`TimingError::ChildWithoutParentStep`] if this session has not recorded any
    /// step yet.
    pub fn child_start(&mut self, name: impl Into<String>) -> Result<&mut Self, TimingError> {
        Ok(self.child()?.start_named(name))
    }

    /// Stops the most recently created pending child, naming its final step after the child.
    ///
    /// Returns this session, not the child. Emits a [`TimingError::NoPendingChild`] warning
    /// and does nothing else if there is no pending child.
    pub fn child_stop(&mut self) -> &mut Self {
        self.stop_last_child(None)
    }

    /// Stops the most recently created pending child with the given final step name.
    ///
    /// Returns this session, not the child.
    pub fn child_stop_named(&mut self, name: impl Into<String>) -> &mut Self {
        self.stop_last_child(Some(name.into()))
    }

    fn stop_last_child(&mut self, name: Option<String>) -> &mut Self {
        if let Some(child) = self.pending_children.last_mut() {
            match name {
                Some(name) => child.stop_named(name),
                None => child.stop(),
            };
        } else {
            self.fail(TimingError::NoPendingChild {
                session: self.name.clone(),
            });
        }

        self
    }

    /// Returns the most recently created pending child.
    ///
    /// Falls back to this session itself (and emits a [`TimingError::NoPendingChild`] warning)
    /// if there is none, so chained calls stay valid.
    pub fn last_child(&mut self) -> &mut Self {
        if self.pending_children.is_empty() {
            self.fail(TimingError::NoPendingChild {
                session: self.name.clone(),
            });
            return self;
        }

        self.pending_children
            .last_mut()
            .expect("guarded by the emptiness check above")
    }

    /// Emits the most recently rendered report to the sink again.
    pub fn log(&mut self) -> &mut Self {
        self.config.sink.emit(&self.last_report);
        self
    }

    /// The display name of the session.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Nesting level of the session; 0 for a root session.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The recorded steps, oldest first.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Children created since the last step, waiting to be attached to the next one.
    #[must_use]
    pub fn pending_children(&self) -> &[Self] {
        &self.pending_children
    }

    /// Whether the clock is currently paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Total length of all completed pauses since the last reset.
    #[must_use]
    pub fn total_paused(&self) -> Duration {
        self.accumulated_pause
    }

    /// The most recent value computed by the session.
    #[must_use]
    pub fn last_result(&self) -> &LastResult {
        &self.last_result
    }

    /// The most recently rendered report text.
    #[must_use]
    pub fn last_report(&self) -> &str {
        &self.last_report
    }

    /// The most recent soft failure, if any happened since the last reset.
    #[must_use]
    pub fn last_error(&self) -> Option<&TimingError> {
        self.last_error.as_ref()
    }

    /// Time between step `index - 1` and step `index`, if both exist.
    pub(crate) fn interval(&self, index: usize) -> Option<Duration> {
        let previous = self.steps.get(index.checked_sub(1)?)?;
        let current = self.steps.get(index)?;

        Some(current.offset().saturating_sub(previous.offset()))
    }

    /// Time since the epoch with completed pauses subtracted.
    fn active_elapsed(&self) -> Duration {
        self.config
            .platform
            .now()
            .saturating_duration_since(self.epoch)
            .saturating_sub(self.accumulated_pause)
    }

    pub(crate) fn warn(&self, error: &TimingError) {
        warn!(session = %self.name, depth = self.depth, %error, "timing session misuse");
        self.config.sink.emit(&error.to_string());
    }

    fn fail(&mut self, error: TimingError) {
        self.warn(&error);
        self.last_error = Some(error);
    }
}

impl Default for TimingSession {
    fn default() -> Self {
        Self::new()
    }
}
