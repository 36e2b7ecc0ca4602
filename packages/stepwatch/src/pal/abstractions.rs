//! Platform abstraction trait definitions.

use std::fmt::Debug;
use std::time::Instant;

/// Provides the current time to timing sessions.
///
/// Implementations must be monotonic: two consecutive calls never go backwards.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets the current instant.
    fn now(&self) -> Instant;
}
