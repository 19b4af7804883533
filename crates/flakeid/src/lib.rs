//! Coordination-free, time-ordered 64-bit Snowflake IDs.
//!
//! Every ID packs a 42-bit millisecond timestamp (relative to an epoch
//! offset), a 12-bit node id and a 10-bit per-millisecond sequence:
//!
//! ```text
//! (timestamp << 22) | (node_id << 10) | sequence
//! ```
//!
//! IDs from one [`IdGenerator`] are unique and strictly increasing. IDs from
//! different generators are unique as long as their node ids differ.
//!
//! ```
//! use flakeid::{IdGenerator, decode_node_id, decode_sequence};
//!
//! let generator = IdGenerator::new(Some(7), None);
//! let id = generator.generate().unwrap();
//!
//! assert_eq!(decode_node_id(id), 7);
//! assert!(decode_sequence(id) <= 1023);
//! ```
//!
//! ## Features
//!
//! - `parking-lot`: use `parking_lot::Mutex` (no lock poisoning)
//! - `tracing`: emit `tracing` spans and events
//! - `serde`: serialize [`SnowflakeId`] as a bare integer, deserialize
//!   [`GeneratorConfig`]
//! - `async-tokio`: `AsyncIdGenerator`, suspending on tokio instead of blocking
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod generator;
pub mod global;
mod id;
mod node;
mod time;

pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::node::*;
pub use crate::time::*;
