use std::time::Instant;

use crate::pal::Platform;

/// Reads the operating system monotonic clock via the Rust standard library.
///
/// Wall clock adjustments (NTP corrections, daylight saving changes) do not affect it.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct RealPlatform;

impl Platform for RealPlatform {
    #[cfg_attr(test, mutants::skip)] // Real time cannot be asserted exactly.
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn consecutive_readings_do_not_go_backwards() {
        let platform = RealPlatform;

        let first = platform.now();
        let second = platform.now();

        assert!(second >= first);
    }
}
