//! Fake clock for testing.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::pal::abstractions::Platform;

/// Fake implementation of the platform abstraction for testing.
///
/// The clock only moves when a test calls [`advance()`](Self::advance). Clones share
/// the same underlying time, so a test can keep one clone and hand another to a session.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    now: Arc<Mutex<Instant>>,
}

impl FakePlatform {
    /// Creates a fake clock frozen at the current real instant.
    pub(crate) fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Moves the clock forward.
    ///
    /// This affects all clones of this platform.
    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self
            .now
            .lock()
            .expect("FakePlatform state lock should not be poisoned");

        *now = now
            .checked_add(by)
            .expect("fake clock advanced beyond the range of Instant");
    }

    /// Moves the clock forward by a number of milliseconds.
    pub(crate) fn advance_millis(&self, millis: u64) {
        self.advance(Duration::from_millis(millis));
    }
}

impl Platform for FakePlatform {
    fn now(&self) -> Instant {
        *self
            .now
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn does_not_move_on_its_own() {
        let platform = FakePlatform::new();

        let first = platform.now();
        std::thread::sleep(Duration::from_millis(2));

        assert_eq!(platform.now(), first);
    }

    #[test]
    fn advances_by_requested_amount() {
        let platform = FakePlatform::new();
        let before = platform.now();

        platform.advance_millis(150);

        assert_eq!(
            platform.now().duration_since(before),
            Duration::from_millis(150)
        );
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();
        let before = platform2.now();

        platform1.advance(Duration::from_millis(100));

        assert_eq!(
            platform2.now().duration_since(before),
            Duration::from_millis(100)
        );
    }
}
