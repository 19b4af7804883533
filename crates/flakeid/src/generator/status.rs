use crate::SnowflakeId;

/// Outcome of a single, non-blocking generation step.
///
/// - [`Poll::Ready`] carries a freshly minted ID.
/// - [`Poll::Pending`] means the sequence space for the current millisecond
///   is exhausted; retry after `yield_for` milliseconds.
///
/// [`IdGenerator::generate`] drives this to completion by sleeping on
/// `Pending`. [`IdGenerator::try_poll`] hands it to the caller instead.
///
/// # Example
///
/// ```
/// use flakeid::{IdGenerator, Poll, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1
///     }
/// }
///
/// let generator = IdGenerator::with_time_source(7, 0, FixedTime);
/// match generator.try_poll().unwrap() {
///     Poll::Ready { id } => assert_eq!(id.node_id(), 7),
///     Poll::Pending { yield_for } => println!("Back off for {yield_for} ms"),
/// }
/// ```
///
/// [`IdGenerator::generate`]: crate::IdGenerator::generate
/// [`IdGenerator::try_poll`]: crate::IdGenerator::try_poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// A unique ID was generated and is ready to use.
    Ready {
        /// The generated ID.
        id: SnowflakeId,
    },
    /// No ID could be generated because the sequence has been exhausted for
    /// the current millisecond.
    Pending {
        /// Milliseconds to wait before trying again.
        yield_for: u64,
    },
}
