use core::cmp::Ordering;

use crate::{
    Error, Result, SnowflakeId,
    generator::Poll,
    id::{MAX_SEQUENCE, MAX_TIMESTAMP},
    node::mask_node_id,
};

/// The mutable heart of a generator: who we are, which epoch we count from,
/// and what we issued last.
///
/// `GeneratorState` is not synchronized. Generators wrap it in a lock and
/// call [`GeneratorState::poll`] while holding it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorState {
    node_id: u16,
    epoch_offset: i64,
    last_timestamp: i64,
    last_sequence: u16,
}

impl GeneratorState {
    /// Fresh state for `node_id` counting from `epoch_offset` (milliseconds
    /// since the Unix epoch).
    ///
    /// `node_id` is truncated to its low 12 bits; an out-of-range value is
    /// never rejected. The last timestamp starts at `-1`, so the first poll
    /// always starts a new millisecond at sequence 0.
    pub fn new(node_id: u16, epoch_offset: i64) -> Self {
        let masked = mask_node_id(node_id);
        #[cfg(feature = "tracing")]
        if masked != node_id {
            tracing::warn!(node_id, masked, "node id exceeds 12 bits and was truncated");
        }
        Self::from_components(-1, masked, 0, epoch_offset)
    }

    pub(crate) const fn from_components(
        last_timestamp: i64,
        node_id: u16,
        last_sequence: u16,
        epoch_offset: i64,
    ) -> Self {
        Self {
            node_id,
            epoch_offset,
            last_timestamp,
            last_sequence,
        }
    }

    /// The masked 12-bit node id.
    pub const fn node_id(&self) -> u16 {
        self.node_id
    }

    /// The epoch offset, in milliseconds since the Unix epoch.
    pub const fn epoch_offset(&self) -> i64 {
        self.epoch_offset
    }

    /// Last issued timestamp relative to the epoch, or `-1` before the first
    /// ID.
    pub const fn last_timestamp(&self) -> i64 {
        self.last_timestamp
    }

    /// Sequence of the last issued ID within [`Self::last_timestamp`].
    pub const fn last_sequence(&self) -> u16 {
        self.last_sequence
    }

    /// Advances the state machine with the wall-clock reading `now`
    /// (milliseconds since the Unix epoch).
    ///
    /// - same millisecond as last time: bump the sequence, or return
    ///   [`Poll::Pending`] if all 1024 values are spent
    /// - later millisecond: reset the sequence to 0
    /// - earlier millisecond: [`Error::ClockRegression`], state untouched
    ///
    /// # Errors
    ///
    /// - [`Error::ClockBeforeEpoch`] if `now` is before the epoch offset
    /// - [`Error::TimestampOverflow`] if the timestamp needs more than 42 bits
    /// - [`Error::ClockRegression`] if `now` is behind the last issued
    ///   timestamp
    pub fn poll(&mut self, now: i64) -> Result<Poll> {
        let timestamp = now.saturating_sub(self.epoch_offset);
        if timestamp < 0 {
            return Err(Error::ClockBeforeEpoch {
                now,
                epoch_offset: self.epoch_offset,
            });
        }
        if timestamp > MAX_TIMESTAMP {
            return Err(Error::TimestampOverflow { timestamp });
        }

        match timestamp.cmp(&self.last_timestamp) {
            Ordering::Equal => {
                if self.last_sequence < MAX_SEQUENCE {
                    self.last_sequence += 1;
                    Ok(Poll::Ready { id: self.id() })
                } else {
                    Ok(Poll::Pending { yield_for: 1 })
                }
            }
            Ordering::Greater => {
                self.last_timestamp = timestamp;
                self.last_sequence = 0;
                Ok(Poll::Ready { id: self.id() })
            }
            Ordering::Less => Err(Self::cold_clock_behind(self.last_timestamp, timestamp)),
        }
    }

    fn id(&self) -> SnowflakeId {
        // `last_timestamp` is non-negative once any ID has been issued.
        SnowflakeId::from_components(
            self.last_timestamp as u64,
            self.node_id,
            self.last_sequence,
        )
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(last_timestamp: i64, timestamp: i64) -> Error {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            last_timestamp,
            timestamp,
            behind_ms = last_timestamp - timestamp,
            "clock moved backwards; refusing to generate"
        );
        Error::ClockRegression {
            last_timestamp,
            timestamp,
        }
    }
}
