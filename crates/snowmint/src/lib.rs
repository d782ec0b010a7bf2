//! Snowflake-style 63-bit IDs.
//!
//! Every [`Node`] issues IDs made of a millisecond timestamp, the node's ID
//! and a per-millisecond sequence. Nodes need no coordination beyond being
//! handed distinct node IDs. The split of the 63 bits between the three
//! fields is chosen per node with a [`BitLayout`].
//!
//! ```
//! use std::time::{Duration, SystemTime};
//! use snowmint::{Node, Snowflake};
//!
//! let epoch = SystemTime::now() - Duration::from_secs(60);
//! let node = Node::new(3, epoch, 41, 10, 12).unwrap();
//!
//! let id = node.generate();
//! assert_eq!(Snowflake::parse_decimal(&id.to_string()).unwrap(), id);
//! assert_eq!(Snowflake::from_base64(&id.to_base64()).unwrap(), id);
//! assert_eq!(Snowflake::from_json(&id.to_json()).unwrap(), id);
//! ```
//!
//! ## Features
//!
//! - `serde` (default): `Serialize`/`Deserialize` for [`Snowflake`] and
//!   [`NodeConfig`], plus the `as_native` and `as_base64` field adapters.
//! - `tracing` (default): spans and events from the generator.
//! - `cache-padded`: pads the generator state to a cache line.

mod config;
mod error;
mod generator;
mod id;
#[cfg(feature = "serde")]
mod serde;
mod time;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
#[cfg(feature = "serde")]
pub use crate::serde::*;
pub use crate::time::*;
