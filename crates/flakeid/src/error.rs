/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors that `flakeid` can produce.
///
/// Sequence exhaustion is deliberately absent: it is absorbed by waiting for
/// the next millisecond and only ever shows up as latency.
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The clock reads earlier than the configured epoch offset, which would
    /// make the timestamp field negative.
    #[error("clock ({now} ms) is before the epoch offset ({epoch_offset} ms)")]
    ClockBeforeEpoch {
        /// Wall-clock milliseconds since the Unix epoch.
        now: i64,
        /// Configured epoch offset in milliseconds since the Unix epoch.
        epoch_offset: i64,
    },

    /// The clock moved behind the last timestamp this generator issued.
    ///
    /// Generator state is left untouched, so a retry succeeds once the clock
    /// catches up again.
    #[error("clock moved backwards: last issued {last_timestamp}, now {timestamp} (ms since epoch)")]
    ClockRegression {
        /// Last timestamp (relative to the epoch) that was issued.
        last_timestamp: i64,
        /// Timestamp (relative to the epoch) observed on this call.
        timestamp: i64,
    },

    /// The timestamp no longer fits the 42-bit field.
    #[error("timestamp {timestamp} ms exceeds the 42-bit timestamp field")]
    TimestampOverflow {
        /// Timestamp (relative to the epoch) that did not fit.
        timestamp: i64,
    },

    /// The generator lock was poisoned by a panicking holder.
    ///
    /// `parking_lot` mutexes do not poison, so this variant does not exist
    /// with the `parking-lot` feature.
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,

    /// [`crate::global::init`] was called more than once.
    #[error("global generator already initialized")]
    AlreadyInitialized,

    /// The global generator was used before [`crate::global::init`].
    #[error("global generator not initialized")]
    NotInitialized,
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
// Convert all poisoned lock errors to a simplified `LockPoisoned`
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
