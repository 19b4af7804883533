use core::fmt;

/// Largest node id that fits the 12-bit node field.
pub const MAX_NODE_ID: u16 = SnowflakeId::NODE_ID_MASK as u16;

/// Largest sequence value that fits the 10-bit sequence field.
pub const MAX_SEQUENCE: u16 = SnowflakeId::SEQUENCE_MASK as u16;

/// Largest timestamp (milliseconds since the epoch offset) that fits the
/// 42-bit timestamp field.
pub const MAX_TIMESTAMP: i64 = SnowflakeId::TIMESTAMP_MASK as i64;

/// A packed 64-bit Snowflake identifier.
///
/// - 42 bits timestamp (ms since the generator's epoch offset)
/// - 12 bits node id
/// - 10 bits sequence
///
/// ```text
///  Bit Index:  63             22 21            10 9              0
///              +----------------+----------------+---------------+
///  Field:      | timestamp (42) |  node id (12)  | sequence (10) |
///              +----------------+----------------+---------------+
///              |<----- MSB ---------- 64 bits --------- LSB ---->|
/// ```
///
/// The top bit stays clear for the first 2^41 ms (~69.7 years) after the
/// epoch, so ids minted in that window are also valid non-negative `i64`s.
///
/// Ordering on `SnowflakeId` is ordering on the raw integer: timestamp first,
/// then node id, then sequence.
///
/// # Example
///
/// ```
/// use flakeid::SnowflakeId;
///
/// let id = SnowflakeId::from_components(1000, 2, 1);
/// assert_eq!(id.timestamp(), 1000);
/// assert_eq!(id.node_id(), 2);
/// assert_eq!(id.sequence(), 1);
/// assert_eq!(id.to_raw(), (1000 << 22) | (2 << 10) | 1);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SnowflakeId {
    id: u64,
}

impl SnowflakeId {
    /// Width of the timestamp field.
    pub const TIMESTAMP_BITS: u32 = 42;

    /// Width of the node id field.
    pub const NODE_ID_BITS: u32 = 12;

    /// Width of the sequence field.
    pub const SEQUENCE_BITS: u32 = 10;

    /// Bitmask for extracting the 42-bit timestamp field. Occupies bits 22
    /// through 63.
    pub const TIMESTAMP_MASK: u64 = (1 << Self::TIMESTAMP_BITS) - 1;

    /// Bitmask for extracting the 12-bit node id field. Occupies bits 10
    /// through 21.
    pub const NODE_ID_MASK: u64 = (1 << Self::NODE_ID_BITS) - 1;

    /// Bitmask for extracting the 10-bit sequence field. Occupies bits 0
    /// through 9.
    pub const SEQUENCE_MASK: u64 = (1 << Self::SEQUENCE_BITS) - 1;

    /// Number of bits to shift the timestamp to its position (bit 22).
    pub const TIMESTAMP_SHIFT: u32 = Self::NODE_ID_BITS + Self::SEQUENCE_BITS;

    /// Number of bits to shift the node id to its position (bit 10).
    pub const NODE_ID_SHIFT: u32 = Self::SEQUENCE_BITS;

    /// Number of bits to shift the sequence field (bit 0).
    pub const SEQUENCE_SHIFT: u32 = 0;

    /// Packs the three fields into an id. Each field is masked to its width.
    pub const fn from_components(timestamp: u64, node_id: u16, sequence: u16) -> Self {
        let timestamp = (timestamp & Self::TIMESTAMP_MASK) << Self::TIMESTAMP_SHIFT;
        let node_id = (node_id as u64 & Self::NODE_ID_MASK) << Self::NODE_ID_SHIFT;
        let sequence = (sequence as u64 & Self::SEQUENCE_MASK) << Self::SEQUENCE_SHIFT;
        Self {
            id: timestamp | node_id | sequence,
        }
    }

    /// Wraps a raw 64-bit value. Every `u64` is a structurally valid id.
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw 64-bit value.
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Extracts the timestamp (ms since the epoch offset) from the packed ID.
    pub const fn timestamp(&self) -> u64 {
        (self.id >> Self::TIMESTAMP_SHIFT) & Self::TIMESTAMP_MASK
    }

    /// Extracts the node id from the packed ID.
    pub const fn node_id(&self) -> u16 {
        ((self.id >> Self::NODE_ID_SHIFT) & Self::NODE_ID_MASK) as u16
    }

    /// Extracts the sequence number from the packed ID.
    pub const fn sequence(&self) -> u16 {
        ((self.id >> Self::SEQUENCE_SHIFT) & Self::SEQUENCE_MASK) as u16
    }

    /// Returns the timestamp as milliseconds since the Unix epoch, given the
    /// epoch offset the id was generated with.
    pub const fn unix_millis(&self, epoch_offset: i64) -> i64 {
        decode_timestamp(self.id, epoch_offset)
    }

    /// Returns the ID as a zero-padded 20-digit string.
    pub fn to_padded_string(&self) -> String {
        format!("{:020}", self.id)
    }
}

/// Packs `(timestamp, node_id, sequence)` into a raw id.
///
/// Equivalent to `(timestamp << 22) | (node_id << 10) | sequence` with each
/// field first masked to its width.
pub const fn encode(timestamp: u64, node_id: u16, sequence: u16) -> u64 {
    SnowflakeId::from_components(timestamp, node_id, sequence).to_raw()
}

/// Extracts the 42-bit timestamp field and adds `epoch_offset`, giving
/// milliseconds since the Unix epoch.
///
/// The offset must be the one the id was generated with. A mismatched offset
/// yields a plausible but wrong time; nothing in the id can detect that.
///
/// The sum saturates at `i64::MAX` rather than overflowing, so any `u64`
/// decodes under any offset.
pub const fn decode_timestamp(id: u64, epoch_offset: i64) -> i64 {
    // The 42-bit field always fits an `i64`.
    (SnowflakeId::from_raw(id).timestamp() as i64).saturating_add(epoch_offset)
}

/// Extracts the 12-bit node id field.
pub const fn decode_node_id(id: u64) -> u16 {
    SnowflakeId::from_raw(id).node_id()
}

/// Extracts the 10-bit sequence field.
pub const fn decode_sequence(id: u64) -> u16 {
    SnowflakeId::from_raw(id).sequence()
}

impl From<u64> for SnowflakeId {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.to_raw()
    }
}

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeId")
            .field("id", &format_args!("{:#018x}", self.id))
            .field("timestamp", &self.timestamp())
            .field("node_id", &self.node_id())
            .field("sequence", &self.sequence())
            .finish()
    }
}
