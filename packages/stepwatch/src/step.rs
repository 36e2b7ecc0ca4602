use std::time::Duration;

use crate::TimingSession;

/// One named checkpoint recorded by a [`TimingSession`].
///
/// A step owns the child sessions that were created after the previous step and before it.
#[derive(Debug)]
pub struct Step {
    name: String,
    offset: Duration,
    children: Vec<TimingSession>,
}

impl Step {
    pub(crate) fn new(name: String, offset: Duration, children: Vec<TimingSession>) -> Self {
        Self {
            name,
            offset,
            children,
        }
    }

    /// The display label of the step.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Time from the session clock epoch until the step was recorded, excluding all time
    /// the session spent paused before that point.
    ///
    /// Only differences between offsets of the same session are meaningful.
    #[must_use]
    pub fn offset(&self) -> Duration {
        self.offset
    }

    /// Child sessions attached to this step, in creation order.
    #[must_use]
    pub fn children(&self) -> &[TimingSession] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [TimingSession] {
        &mut self.children
    }
}
