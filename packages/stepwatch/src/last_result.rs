use std::time::Duration;

/// The most recent value computed by a [`TimingSession`](crate::TimingSession).
///
/// Besides being informative, this drives what a later [`print()`](crate::TimingSession::print)
/// without an explicit index reports: a positive [`StepIndex`](Self::StepIndex) is used as the
/// index to report on.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub enum LastResult {
    /// Nothing has been computed since the session was created or reset.
    #[default]
    Empty,

    /// The last operation failed softly; see
    /// [`TimingSession::last_error()`](crate::TimingSession::last_error).
    Failed,

    /// Index of the step recorded by the last `step()`.
    StepIndex(usize),

    /// Length of the pause ended by `unpause()`, or a single step interval reported by `print()`.
    Duration(Duration),

    /// Percentage of total time taken by each step interval, as reported by a full `print()`.
    ///
    /// Empty when the session had fewer than two steps to report on.
    Percentages(Vec<f64>),
}

impl LastResult {
    /// The percentages of a full report, if that is what the last result was.
    #[must_use]
    pub fn percentages(&self) -> Option<&[f64]> {
        match self {
            Self::Percentages(percentages) => Some(percentages),
            _ => None,
        }
    }

    /// The duration carried by the last result, if any.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(duration) => Some(*duration),
            _ => None,
        }
    }

    /// The step index carried by the last result, if any.
    #[must_use]
    pub fn step_index(&self) -> Option<usize> {
        match self {
            Self::StepIndex(index) => Some(*index),
            _ => None,
        }
    }

    /// Whether the last operation failed softly.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }
}
