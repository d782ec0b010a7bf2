use core::{num::ParseIntError, time::Duration};

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors `snowmint` can produce.
///
/// Construction errors (`BitWidthOverflow`, `NodeOverflow`, `EpochAhead`) are
/// permanent for the configuration that caused them. Decoding errors are
/// deterministic for a given input. ID generation itself never fails.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The timestamp, node and sequence widths do not add up to 63 bits.
    #[error(
        "bit widths must sum to 63, got timestamp {timestamp_bits} + node {node_bits} + sequence {sequence_bits} = {total}"
    )]
    BitWidthOverflow {
        timestamp_bits: u8,
        node_bits: u8,
        sequence_bits: u8,
        total: u32,
    },

    /// The node ID does not fit in the configured node field.
    #[error("node id {node_id} does not fit in {node_bits} bits (max {max_node_id})")]
    NodeOverflow {
        node_id: u64,
        node_bits: u8,
        max_node_id: u64,
    },

    /// The epoch lies in the future relative to the system clock.
    #[error("epoch is {ahead_by:?} ahead of the system clock")]
    EpochAhead { ahead_by: Duration },

    /// The text is not a valid base-10 signed 64-bit integer.
    #[error("invalid decimal snowflake: {0}")]
    ParseError(#[from] ParseIntError),

    /// The text contains a byte outside the radix-64 alphabet.
    #[error("invalid base64 character (byte {byte:#04x}) at index {index}")]
    InvalidCharacter { byte: u8, index: usize },

    /// The JSON input is not a double-quoted string.
    #[error("invalid JSON snowflake: expected a quoted string, got {len} bytes")]
    JsonUnmarshal { len: usize },
}
