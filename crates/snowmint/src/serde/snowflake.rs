use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::Snowflake;

/// Serializes as the quoted decimal form, the same text [`Snowflake::to_json`]
/// produces.
impl Serialize for Snowflake {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(self)
    }
}

/// Deserializes from a decimal string. Bare numbers are rejected, matching
/// [`Snowflake::from_json`].
impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl de::Visitor<'_> for DecimalVisitor {
            type Value = Snowflake;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a decimal snowflake string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Snowflake::parse_decimal(v).map_err(de::Error::custom)
            }
        }

        d.deserialize_str(DecimalVisitor)
    }
}

/// `#[serde(with = "as_native")]`: a bare integer instead of a string.
pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::Snowflake;

    /// Serialize a snowflake ID as its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Snowflake, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize a snowflake ID from its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the value is
    /// not an `i64`.
    pub fn deserialize<'de, D>(d: D) -> Result<Snowflake, D::Error>
    where
        D: Deserializer<'de>,
    {
        i64::deserialize(d).map(Snowflake::from_raw)
    }
}

/// `#[serde(with = "as_base64")]`: the compact radix-64 string.
pub mod as_base64 {
    use super::{Deserializer, Serializer, de, fmt};
    use crate::Snowflake;

    /// Serialize a snowflake ID as a radix-64 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Snowflake, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(&id.to_base64())
    }

    /// Deserialize a snowflake ID from a radix-64 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the string
    /// holds a character outside `0-9a-zA-Z+/`.
    pub fn deserialize<'de, D>(d: D) -> Result<Snowflake, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base64Visitor;

        impl de::Visitor<'_> for Base64Visitor {
            type Value = Snowflake;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a radix-64 snowflake string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Snowflake::from_base64(v).map_err(de::Error::custom)
            }
        }

        d.deserialize_str(Base64Visitor)
    }
}
