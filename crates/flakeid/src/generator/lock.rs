use core::time::Duration;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    DEFAULT_EPOCH, Result, SnowflakeId,
    generator::{GeneratorConfig, GeneratorState, Mutex, MutexGuard, Poll},
    id::decode_timestamp,
    node::{NodeIdProvider, ProcessNodeId},
    time::{SystemClock, TimeSource},
};

/// A lock-based Snowflake ID generator, safe to share across threads.
///
/// All state lives behind one mutex. [`IdGenerator::generate`] holds it for
/// the whole call, including the clock read and any wait for the next
/// millisecond, so concurrent callers are fully serialized and every ID from
/// one instance is unique and strictly increasing in completion order.
///
/// Share it by reference or wrap it in an `Arc`.
///
/// # Example
///
/// ```
/// use flakeid::{IdGenerator, decode_node_id, decode_sequence, decode_timestamp};
///
/// let generator = IdGenerator::new(Some(42), None);
/// let a = generator.generate().unwrap();
/// let b = generator.generate().unwrap();
///
/// assert!(a < b);
/// assert_eq!(decode_node_id(a), 42);
/// assert!(decode_sequence(a) <= 1023);
/// assert!(decode_timestamp(b, generator.epoch_offset()) >= decode_timestamp(a, generator.epoch_offset()));
/// ```
pub struct IdGenerator<T = SystemClock>
where
    T: TimeSource,
{
    node_id: u16,
    epoch_offset: i64,
    state: Mutex<GeneratorState>,
    time: T,
}

impl IdGenerator<SystemClock> {
    /// Creates a generator on the system clock.
    ///
    /// - `node_id`: masked to 12 bits; when `None`, derived from the host
    ///   name and process id via [`ProcessNodeId`]
    /// - `epoch_offset`: milliseconds since the Unix epoch; when `None`,
    ///   [`DEFAULT_EPOCH`]
    ///
    /// Never fails. An out-of-range node id is silently truncated, which can
    /// collide with another node's id; validate it upstream if that matters.
    pub fn new(node_id: Option<u16>, epoch_offset: Option<i64>) -> Self {
        Self::with_provider(node_id, epoch_offset, &ProcessNodeId)
    }

    /// Like [`Self::new`], but asks `provider` for the node id when none is
    /// given.
    pub fn with_provider(
        node_id: Option<u16>,
        epoch_offset: Option<i64>,
        provider: &impl NodeIdProvider,
    ) -> Self {
        let node_id = node_id.unwrap_or_else(|| provider.node_id());
        Self::with_time_source(node_id, epoch_offset.unwrap_or(DEFAULT_EPOCH), SystemClock)
    }

    /// Creates a generator from a [`GeneratorConfig`]; unset fields fall back
    /// as in [`Self::new`].
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.node_id, config.epoch_offset)
    }
}

impl<T> IdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator reading time from `time`.
    ///
    /// `node_id` is masked to 12 bits. `epoch_offset` is in milliseconds since
    /// the Unix epoch and must match whatever later decodes the IDs.
    pub fn with_time_source(node_id: u16, epoch_offset: i64, time: T) -> Self {
        Self::from_state(GeneratorState::new(node_id, epoch_offset), time)
    }

    pub(crate) fn from_state(state: GeneratorState, time: T) -> Self {
        Self {
            node_id: state.node_id(),
            epoch_offset: state.epoch_offset(),
            state: Mutex::new(state),
            time,
        }
    }

    /// The 12-bit node id embedded in every ID.
    pub fn node_id(&self) -> u16 {
        self.node_id
    }

    /// The epoch offset, in milliseconds since the Unix epoch.
    pub fn epoch_offset(&self) -> i64 {
        self.epoch_offset
    }

    /// Generates the next ID as a raw `u64`.
    ///
    /// Blocks for up to a millisecond at a time if the 1024 sequence values of
    /// the current millisecond are used up. The lock is held while waiting.
    ///
    /// # Errors
    ///
    /// - [`Error::ClockBeforeEpoch`] if the clock is behind the epoch offset
    /// - [`Error::ClockRegression`] if the clock moved behind the last issued
    ///   timestamp
    /// - [`Error::TimestampOverflow`] once the 42-bit timestamp is exhausted
    /// - [`Error::LockPoisoned`] if another caller panicked holding the lock
    ///
    /// [`Error::ClockBeforeEpoch`]: crate::Error::ClockBeforeEpoch
    /// [`Error::ClockRegression`]: crate::Error::ClockRegression
    /// [`Error::TimestampOverflow`]: crate::Error::TimestampOverflow
    /// [`Error::LockPoisoned`]: crate::Error
    pub fn generate(&self) -> Result<u64> {
        self.generate_id().map(|id| id.to_raw())
    }

    /// Typed counterpart of [`Self::generate`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn generate_id(&self) -> Result<SnowflakeId> {
        let mut state = self.lock()?;
        loop {
            match state.poll(self.time.current_millis())? {
                Poll::Ready { id } => break Ok(id),
                Poll::Pending { yield_for } => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(yield_for, "sequence exhausted, waiting for next millisecond");
                    std::thread::sleep(Duration::from_millis(yield_for));
                }
            }
        }
    }

    /// Runs exactly one generation step without ever sleeping.
    ///
    /// Returns [`Poll::Pending`] instead of waiting when the sequence is
    /// exhausted, leaving the back-off strategy to the caller.
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_poll(&self) -> Result<Poll> {
        let mut state = self.lock()?;
        state.poll(self.time.current_millis())
    }

    /// Decodes the Unix-millisecond timestamp of an ID minted with this
    /// generator's epoch offset.
    pub fn decode_timestamp(&self, id: u64) -> i64 {
        decode_timestamp(id, self.epoch_offset)
    }

    fn lock(&self) -> Result<MutexGuard<'_, GeneratorState>> {
        #[cfg(feature = "parking-lot")]
        {
            Ok(self.state.lock())
        }
        #[cfg(not(feature = "parking-lot"))]
        {
            Ok(self.state.lock()?)
        }
    }
}

impl<T> core::fmt::Debug for IdGenerator<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IdGenerator")
            .field("node_id", &self.node_id)
            .field("epoch_offset", &self.epoch_offset)
            .finish_non_exhaustive()
    }
}
