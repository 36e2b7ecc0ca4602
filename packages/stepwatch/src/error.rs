use thiserror::Error;

/// Soft failures reported by timing sessions.
///
/// None of these abort the caller. The operation that hit the failure logs it, forwards it
/// to the session's [`MessageSink`](crate::MessageSink), remembers it as
/// [`TimingSession::last_error()`](crate::TimingSession::last_error) and returns its usual
/// chainable value.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[non_exhaustive]
pub enum TimingError {
    /// A step was requested while the session clock was paused.
    #[error("timing '{session}' is paused, step '{step}' was not recorded")]
    StepWhilePaused {
        /// Name of the session that rejected the step.
        session: String,

        /// Name the step would have been recorded with.
        step: String,
    },

    /// A report was requested before there were at least two steps to compare.
    #[error("{}", describe_insufficient_steps(.session, .recorded))]
    InsufficientSteps {
        /// Name of the session that was asked for a report.
        session: String,

        /// How many steps the session had recorded (0 or 1).
        recorded: usize,
    },

    /// The session clock was resumed while it was not paused.
    #[error("timing '{session}' is not paused, nothing to unpause")]
    UnpauseWithoutPause {
        /// Name of the session that was not paused.
        session: String,
    },

    /// A child session was requested before the parent recorded any step.
    #[error("timing '{session}' has no step yet, start it before creating a child")]
    ChildWithoutParentStep {
        /// Name of the would-be parent session.
        session: String,
    },

    /// A child session operation found no child awaiting its next parent step.
    #[error("timing '{session}' has no pending child")]
    NoPendingChild {
        /// Name of the parent session.
        session: String,
    },

    /// A step interval was requested for an index that has no previous step.
    #[error("timing '{session}' has no interval at index {index} ({len} steps recorded)")]
    IndexOutOfRange {
        /// Name of the session that was queried.
        session: String,

        /// The requested step index.
        index: usize,

        /// Number of steps recorded at the time of the query.
        len: usize,
    },
}

#[expect(
    clippy::trivially_copy_pass_by_ref,
    reason = "thiserror hands fields to format arguments by reference"
)]
fn describe_insufficient_steps(session: &str, recorded: &usize) -> String {
    if *recorded == 0 {
        format!("timing '{session}' was never started")
    } else {
        format!("timing '{session}' was started but never stepped")
    }
}
