use core::time::Duration;

use tokio::sync::Mutex;
#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    DEFAULT_EPOCH, Result, SnowflakeId,
    generator::{GeneratorConfig, GeneratorState, Poll},
    id::decode_timestamp,
    node::{NodeIdProvider, ProcessNodeId},
    time::{SystemClock, TimeSource},
};

/// An async Snowflake ID generator for the [`tokio`](https://docs.rs/tokio)
/// runtime.
///
/// Same contract as [`IdGenerator`], but the wait for the next millisecond
/// suspends the task with `tokio::time::sleep` instead of blocking the
/// thread. The `tokio::sync::Mutex` guard is held across that suspension, so
/// no other task can mutate the state mid-wait.
///
/// [`IdGenerator`]: crate::IdGenerator
pub struct AsyncIdGenerator<T = SystemClock>
where
    T: TimeSource,
{
    node_id: u16,
    epoch_offset: i64,
    state: Mutex<GeneratorState>,
    time: T,
}

impl AsyncIdGenerator<SystemClock> {
    /// See [`IdGenerator::new`](crate::IdGenerator::new).
    pub fn new(node_id: Option<u16>, epoch_offset: Option<i64>) -> Self {
        Self::with_provider(node_id, epoch_offset, &ProcessNodeId)
    }

    /// See [`IdGenerator::with_provider`](crate::IdGenerator::with_provider).
    pub fn with_provider(
        node_id: Option<u16>,
        epoch_offset: Option<i64>,
        provider: &impl NodeIdProvider,
    ) -> Self {
        let node_id = node_id.unwrap_or_else(|| provider.node_id());
        Self::with_time_source(node_id, epoch_offset.unwrap_or(DEFAULT_EPOCH), SystemClock)
    }

    /// Creates a generator from a [`GeneratorConfig`], filling unset fields
    /// like [`Self::new`].
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(config.node_id, config.epoch_offset)
    }
}

impl<T> AsyncIdGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator reading time from `time`. `node_id` is masked to
    /// 12 bits.
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
    /// # Errors
    ///
    /// Clock errors as in [`IdGenerator::generate`](crate::IdGenerator::generate).
    /// The tokio mutex cannot be poisoned.
    pub async fn generate(&self) -> Result<u64> {
        self.generate_id().await.map(|id| id.to_raw())
    }

    /// Typed counterpart of [`Self::generate`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub async fn generate_id(&self) -> Result<SnowflakeId> {
        let mut state = self.state.lock().await;
        loop {
            match state.poll(self.time.current_millis())? {
                Poll::Ready { id } => break Ok(id),
                Poll::Pending { yield_for } => {
                    tokio::time::sleep(Duration::from_millis(yield_for)).await;
                }
            }
        }
    }

    /// Decodes the Unix-millisecond timestamp of an ID minted with this
    /// generator's epoch offset.
    pub fn decode_timestamp(&self, id: u64) -> i64 {
        decode_timestamp(id, self.epoch_offset)
    }
}
