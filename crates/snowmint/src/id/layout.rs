use crate::{Error, Result, Snowflake};

/// Number of usable bits in a [`Snowflake`]; the sign bit is never used.
pub const SNOWFLAKE_BITS: u8 = 63;

/// How the 63 usable bits of a [`Snowflake`] are split between its fields.
///
/// The layout is chosen when a node is built and never changes afterwards.
/// Fields are packed from MSB to LSB as timestamp, node ID, sequence.
///
/// # Example
///
/// ```
/// use snowmint::BitLayout;
///
/// let layout = BitLayout::new(42, 5, 16).unwrap();
/// let id = layout.compose(1_000, 3, 7);
///
/// let parts = layout.decompose(id);
/// assert_eq!((parts.timestamp, parts.node_id, parts.sequence), (1_000, 3, 7));
///
/// assert!(BitLayout::new(43, 5, 16).is_err());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BitLayout {
    timestamp_bits: u8,
    node_bits: u8,
    sequence_bits: u8,
}

/// The three fields of a [`Snowflake`], as read through a [`BitLayout`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SnowflakeParts {
    /// Milliseconds since the issuing node's epoch.
    pub timestamp: u64,
    /// The issuing node.
    pub node_id: u64,
    /// Position within the millisecond.
    pub sequence: u64,
}

impl BitLayout {
    /// The classic Twitter split: 41 bits of milliseconds, 10 bits of node
    /// ID and 12 bits of sequence.
    pub const TWITTER: Self = Self {
        timestamp_bits: 41,
        node_bits: 10,
        sequence_bits: 12,
    };

    /// Validates and returns a layout.
    ///
    /// The widths are stated explicitly rather than deriving the timestamp
    /// width, so a typo fails here instead of silently shortening the
    /// timestamp field's lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BitWidthOverflow`] unless the widths sum to exactly
    /// [`SNOWFLAKE_BITS`].
    pub fn new(timestamp_bits: u8, node_bits: u8, sequence_bits: u8) -> Result<Self> {
        let total = u32::from(timestamp_bits) + u32::from(node_bits) + u32::from(sequence_bits);
        if total != u32::from(SNOWFLAKE_BITS) {
            return Err(Error::BitWidthOverflow {
                timestamp_bits,
                node_bits,
                sequence_bits,
                total,
            });
        }
        Ok(Self {
            timestamp_bits,
            node_bits,
            sequence_bits,
        })
    }

    pub const fn timestamp_bits(&self) -> u8 {
        self.timestamp_bits
    }

    pub const fn node_bits(&self) -> u8 {
        self.node_bits
    }

    pub const fn sequence_bits(&self) -> u8 {
        self.sequence_bits
    }

    /// Bit position of the lowest timestamp bit.
    pub const fn timestamp_shift(&self) -> u32 {
        self.node_bits as u32 + self.sequence_bits as u32
    }

    /// Bit position of the lowest node ID bit.
    pub const fn node_shift(&self) -> u32 {
        self.sequence_bits as u32
    }

    /// Largest timestamp the layout can hold.
    pub const fn max_timestamp(&self) -> u64 {
        mask(self.timestamp_bits)
    }

    /// Largest node ID the layout can hold.
    pub const fn max_node_id(&self) -> u64 {
        mask(self.node_bits)
    }

    /// Largest sequence value the layout can hold.
    pub const fn max_sequence(&self) -> u64 {
        mask(self.sequence_bits)
    }

    /// Packs the three fields into an ID.
    ///
    /// Each component is masked to its field width, so out-of-range input
    /// never spills into a neighbouring field or the sign bit.
    pub const fn compose(&self, timestamp: u64, node_id: u64, sequence: u64) -> Snowflake {
        let timestamp = (timestamp & self.max_timestamp()) << self.timestamp_shift();
        let node_id = (node_id & self.max_node_id()) << self.node_shift();
        let sequence = sequence & self.max_sequence();
        Snowflake::from_raw((timestamp | node_id | sequence) as i64)
    }

    /// Splits an ID back into its fields.
    pub const fn decompose(&self, id: Snowflake) -> SnowflakeParts {
        let raw = id.to_raw() as u64;
        SnowflakeParts {
            timestamp: (raw >> self.timestamp_shift()) & self.max_timestamp(),
            node_id: (raw >> self.node_shift()) & self.max_node_id(),
            sequence: raw & self.max_sequence(),
        }
    }
}

impl Default for BitLayout {
    fn default() -> Self {
        Self::TWITTER
    }
}

/// All-ones mask for a field of `bits` width (`bits <= 63`).
const fn mask(bits: u8) -> u64 {
    (1_u64 << bits) - 1
}
