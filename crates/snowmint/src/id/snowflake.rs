use core::{fmt, str::FromStr};

use crate::{
    Result,
    id::base64::{decode_base64, encode_base64},
};

/// A 63-bit Snowflake ID.
///
/// The value is stored in a signed 64-bit slot whose sign bit is always zero
/// for IDs issued by a [`Node`]. The remaining 63 bits are split, from most to
/// least significant, into a timestamp, a node ID and a per-millisecond
/// sequence. The split is chosen per node, see [`BitLayout`].
///
/// ```text
///  Bit Index:  63         62                S+N   S+N-1       S   S-1          0
///              +----------+--------------------+----------------+--------------+
///  Field:      | sign (0) | timestamp (63-N-S) | node ID (N)    | sequence (S) |
///              +----------+--------------------+----------------+--------------+
///              |<----------------- MSB ---- 64 bits ---- LSB ----------------->|
/// ```
///
/// A `Snowflake` carries no reference to the node that issued it. Recovering
/// the fields needs the same [`BitLayout`].
///
/// # Example
///
/// ```
/// use snowmint::Snowflake;
///
/// let id = Snowflake::from_raw(4_294_967_296);
/// assert_eq!(id.to_string(), "4294967296");
/// assert_eq!(id.to_base64(), "400000");
/// assert_eq!(id.to_json(), b"\"4294967296\"");
///
/// assert_eq!("4294967296".parse::<Snowflake>().unwrap(), id);
/// assert_eq!(Snowflake::from_base64("400000").unwrap(), id);
/// assert_eq!(Snowflake::from_json(b"\"4294967296\"").unwrap(), id);
/// ```
///
/// [`Node`]: crate::Node
/// [`BitLayout`]: crate::BitLayout
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Snowflake {
    id: i64,
}

impl Snowflake {
    /// The all-zero ID.
    pub const ZERO: Self = Self::from_raw(0);

    /// The largest 63-bit ID.
    pub const MAX: Self = Self::from_raw(i64::MAX);

    /// Wraps a raw integer without validation.
    pub const fn from_raw(raw: i64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw integer.
    pub const fn to_raw(self) -> i64 {
        self.id
    }

    /// Parses the base-10 form produced by [`fmt::Display`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseError`] unless `s` is exactly a valid signed
    /// 64-bit integer literal. Whitespace, trailing characters, the empty
    /// string and out-of-range magnitudes are all rejected.
    ///
    /// [`Error::ParseError`]: crate::Error::ParseError
    pub fn parse_decimal(s: &str) -> Result<Self> {
        Ok(Self::from_raw(s.parse::<i64>()?))
    }

    /// Encodes the ID in the compact radix-64 form (`0-9a-zA-Z+/`).
    ///
    /// This is a positional numeral, not RFC 4648 base64, so the output is at
    /// most 11 characters and has no padding.
    pub fn to_base64(&self) -> String {
        encode_base64(self.id as u64)
    }

    /// Decodes the compact radix-64 form produced by [`Self::to_base64`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCharacter`] for any byte outside the alphabet.
    ///
    /// [`Error::InvalidCharacter`]: crate::Error::InvalidCharacter
    pub fn from_base64(s: &str) -> Result<Self> {
        Ok(Self::from_raw(decode_base64(s)? as i64))
    }

    /// Returns the ID as a zero-padded 19-digit string.
    ///
    /// For non-negative IDs the padded strings sort the same way the IDs do.
    pub fn to_padded_string(&self) -> String {
        format!("{:019}", self.id)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snowflake")
            .field("id", &format_args!("{} (0x{:x})", self.id, self.id))
            .field("base64", &self.to_base64())
            .finish()
    }
}

impl FromStr for Snowflake {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_decimal(s)
    }
}

impl From<i64> for Snowflake {
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.to_raw()
    }
}
