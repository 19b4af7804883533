use std::hash::{DefaultHasher, Hash, Hasher};

use crate::id::{MAX_NODE_ID, SnowflakeId};

/// Supplies a node id when none is configured explicitly.
///
/// The returned value does not need to fit 12 bits; the generator masks it.
/// Any `Fn() -> u16` closure is a provider.
pub trait NodeIdProvider {
    /// Returns the node id to use, possibly wider than 12 bits.
    fn node_id(&self) -> u16;
}

impl<F> NodeIdProvider for F
where
    F: Fn() -> u16,
{
    fn node_id(&self) -> u16 {
        self()
    }
}

/// Derives a node id from the host name and the current process id.
///
/// The host name is read from `HOSTNAME` (or `COMPUTERNAME` on Windows),
/// falling back to `"localhost"`. Both values are hashed together and the
/// 64-bit hash is folded down to 12 bits.
///
/// This is a best-effort default. Distinct hosts can collide, so production
/// deployments should assign node ids explicitly.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProcessNodeId;

impl ProcessNodeId {
    fn host_name() -> String {
        std::env::var("HOSTNAME")
            .or_else(|_| std::env::var("COMPUTERNAME"))
            .unwrap_or_else(|_| String::from("localhost"))
    }
}

impl NodeIdProvider for ProcessNodeId {
    fn node_id(&self) -> u16 {
        let mut hasher = DefaultHasher::new();
        Self::host_name().hash(&mut hasher);
        std::process::id().hash(&mut hasher);
        fold_to_node_id(hasher.finish())
    }
}

/// XOR-folds a 64-bit value into the 12-bit node id range.
pub fn fold_to_node_id(mut value: u64) -> u16 {
    let mut folded = 0;
    while value != 0 {
        folded ^= value & SnowflakeId::NODE_ID_MASK;
        value >>= SnowflakeId::NODE_ID_BITS;
    }
    folded as u16
}

/// Truncates a node id to its low 12 bits.
pub const fn mask_node_id(node_id: u16) -> u16 {
    node_id & MAX_NODE_ID
}
