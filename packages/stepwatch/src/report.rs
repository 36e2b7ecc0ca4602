//! Rendering of timing sessions into human-readable reports.

use std::time::Duration;

use tracing::warn;

use crate::{LastResult, TimingError, TimingSession};

const REPORT_BANNER: &str = "---------------- timing report ----------------";

/// Options for [`TimingSession::print()`].
///
/// # Examples
///
/// ```
/// use stepwatch::PrintOptions;
///
/// // Report the interval ending at step 1 without emitting anything to the sink.
/// let options = PrintOptions::new().index(1).silent(true);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PrintOptions {
    index: Option<usize>,
    silent: bool,
}

impl PrintOptions {
    /// Report on the default target and emit the result to the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            index: None,
            silent: false,
        }
    }

    /// Sets the step index to report on.
    ///
    /// Only index 1 produces a single-interval result; any other index produces the
    /// full report.
    #[must_use]
    pub const fn index(self, index: usize) -> Self {
        Self {
            index: Some(index),
            ..self
        }
    }

    /// Whether to skip emitting the rendered text to the sink.
    ///
    /// The text is still available from [`TimingSession::last_report()`].
    #[must_use]
    pub const fn silent(self, silent: bool) -> Self {
        Self { silent, ..self }
    }
}

impl TimingSession {
    /// Renders a report of the recorded steps.
    ///
    /// What gets rendered depends on the session state and the options:
    ///
    /// * With fewer than two steps there is nothing to compare. The session records a
    ///   [`TimingError::InsufficientSteps`] error, the text says whether the session was never
    ///   started or never stepped, and the result is an empty list of percentages.
    /// * If the step index to report on is 1, a single line with the duration of the
    ///   first interval is rendered and the result is that duration. The index comes from
    ///   `options`; failing that, from [`last_result()`](Self::last_result) if it is a positive
    ///   step index; failing that, child sessions use their final step index.
    /// * Otherwise, the full report is rendered: one line per interval with its share of the
    ///   total time, each followed by the inline reports of the children attached to the step
    ///   that ends the interval. The result is the list of percentages.
    ///
    /// Unless `options` are silent, the text is emitted to the sink.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepwatch::{MemorySink, PrintOptions, TimingSession};
    ///
    /// let sink = MemorySink::new();
    /// let mut session = TimingSession::builder().sink(sink.clone()).build();
    ///
    /// session.start().step_named("parse").step_named("execute");
    /// session.print(PrintOptions::new());
    ///
    /// let report = sink.messages().pop().unwrap();
    /// assert!(report.contains("1. parse"));
    /// assert!(report.contains("2. execute"));
    /// ```
    pub fn print(&mut self, options: PrintOptions) -> &mut Self {
        self.render(options);

        if !options.silent {
            self.config.sink.emit(&self.last_report);
        }

        self
    }

    /// Alias of [`print()`](Self::print).
    pub fn resume(&mut self, options: PrintOptions) -> &mut Self {
        self.print(options)
    }

    fn render(&mut self, options: PrintOptions) {
        let indent = self.config.indent.repeat(self.depth);

        if self.steps.len() < 2 {
            let error = TimingError::InsufficientSteps {
                session: self.name.clone(),
                recorded: self.steps.len(),
            };

            warn!(session = %self.name, depth = self.depth, %error, "nothing to report");

            self.last_report = format!("{indent}{error}");
            self.last_result = LastResult::Percentages(Vec::new());
            self.last_error = Some(error);
            return;
        }

        if self.report_index(options) == Some(1) {
            self.render_first_interval(&indent);
        } else {
            self.render_full(&indent);
        }
    }

    fn report_index(&self, options: PrintOptions) -> Option<usize> {
        options.index.or(match self.last_result {
            LastResult::StepIndex(index) if index > 0 => Some(index),
            _ if self.depth > 0 => self.steps.len().checked_sub(1),
            _ => None,
        })
    }

    fn render_first_interval(&mut self, indent: &str) {
        let (Some(first), Some(step), Some(elapsed)) =
            (self.steps.first(), self.steps.get(1), self.interval(1))
        else {
            return;
        };

        self.last_report = format!(
            "{indent}> {name}\t: {ms} ms",
            name = step.name(),
            ms = millis_between(first.offset(), step.offset())
        );
        self.last_result = LastResult::Duration(elapsed);
    }

    fn render_full(&mut self, indent: &str) {
        let (Some(first), Some(last)) = (self.steps.first(), self.steps.last()) else {
            return;
        };

        let total = millis_between(first.offset(), last.offset());
        let mut previous = first.offset();

        let mut lines = Vec::new();

        if self.depth == 0 {
            lines.push(REPORT_BANNER.to_owned());
        }

        lines.push(format!("«{indent}» {}", self.name));
        lines.push(format!("{indent}  total\t: {total} ms"));
        lines.push(format!(
            "{indent}  paused\t: {} ms",
            self.accumulated_pause.as_millis()
        ));

        let mut percentages = Vec::with_capacity(self.steps.len().saturating_sub(1));

        for (number, step) in self.steps.iter_mut().enumerate().skip(1) {
            let elapsed = millis_between(previous, step.offset());
            previous = step.offset();

            let percentage = percentage_of(elapsed, total);
            percentages.push(percentage);

            lines.push(format!(
                "{indent} {number}. {name}\t: {percentage:.2} %\t ({elapsed} ms)",
                name = step.name()
            ));

            for child in step.children_mut() {
                child.print(PrintOptions::new().silent(true));
                lines.push(child.last_report.clone());
            }
        }

        self.last_report = lines.join("\n");
        self.last_result = LastResult::Percentages(percentages);
    }
}

/// Whole milliseconds between two step offsets.
///
/// Both offsets are truncated before subtracting, so the rows of a report always add up to
/// its total even when individual intervals are shorter than a millisecond.
fn millis_between(earlier: Duration, later: Duration) -> u128 {
    later.as_millis().saturating_sub(earlier.as_millis())
}

/// Share of `total` taken by `part`, in percent. Zero if `total` is zero.
fn percentage_of(part: u128, total: u128) -> f64 {
    if total == 0 {
        return 0.0;
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "reports never span enough milliseconds to lose precision"
    )]
    let ratio = part as f64 / total as f64;

    100.0 * ratio
}
