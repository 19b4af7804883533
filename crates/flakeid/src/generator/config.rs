/// Construction input for a generator. Both fields are optional.
///
/// - `node_id`: defaults to the [`ProcessNodeId`] provider, masked to 12 bits
/// - `epoch_offset`: milliseconds since the Unix epoch, defaults to
///   [`DEFAULT_EPOCH`]
///
/// With the `serde` feature this deserializes from e.g.
/// `{"node_id": 12, "epoch_offset": 1577836800000}`, with either key
/// omitted.
///
/// [`ProcessNodeId`]: crate::ProcessNodeId
/// [`DEFAULT_EPOCH`]: crate::DEFAULT_EPOCH
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Node id to embed; `None` asks the default provider.
    pub node_id: Option<u16>,
    /// Epoch offset in milliseconds since the Unix epoch; `None` means
    /// [`DEFAULT_EPOCH`](crate::DEFAULT_EPOCH).
    pub epoch_offset: Option<i64>,
}

impl GeneratorConfig {
    /// Builds a config from optional parts.
    pub const fn new(node_id: Option<u16>, epoch_offset: Option<i64>) -> Self {
        Self {
            node_id,
            epoch_offset,
        }
    }
}
