use crate::{Error, Result, Snowflake};

/// `"` + 20 characters for `i64::MIN` + `"`.
const MAX_JSON_LEN: usize = 22;

impl Snowflake {
    /// Returns the ID as a JSON string holding its decimal form.
    ///
    /// A string rather than a bare number, so consumers that parse JSON
    /// numbers as doubles do not lose precision past 2^53.
    pub fn to_json(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MAX_JSON_LEN);
        out.push(b'"');
        out.extend_from_slice(self.to_string().as_bytes());
        out.push(b'"');
        out
    }

    /// Parses the JSON form produced by [`Self::to_json`].
    ///
    /// # Errors
    ///
    /// - [`Error::JsonUnmarshal`] unless `bytes` is at least two bytes long
    ///   and both starts and ends with `"`, or if the quoted text is not
    ///   UTF-8.
    /// - [`Error::ParseError`] if the quoted text is not a decimal `i64`.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let [b'"', interior @ .., b'"'] = bytes else {
            return Err(Error::JsonUnmarshal { len: bytes.len() });
        };
        let text = core::str::from_utf8(interior)
            .map_err(|_| Error::JsonUnmarshal { len: bytes.len() })?;
        Self::parse_decimal(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_json_quotes_the_decimal_form() {
        assert_eq!(Snowflake::MAX.to_json(), b"\"9223372036854775807\"");
        assert_eq!(Snowflake::ZERO.to_json(), b"\"0\"");
        assert_eq!(Snowflake::from_raw(i64::MIN).to_json().len(), MAX_JSON_LEN);
    }

    #[test]
    fn from_json_reads_back_what_to_json_writes() {
        for raw in [0, 1, 4_294_967_296, i64::MAX] {
            let id = Snowflake::from_raw(raw);
            assert_eq!(Snowflake::from_json(&id.to_json()).unwrap(), id);
        }
    }

    #[test]
    fn from_json_accepts_signed_zero() {
        assert_eq!(Snowflake::from_json(b"\"-0\"").unwrap(), Snowflake::ZERO);
    }

    #[test]
    fn from_json_rejects_missing_quotes() {
        for input in [
            &b""[..],
            b"\"",
            b"1",
            b"123",
            b"\"123",
            b"123\"",
            b"'123'",
        ] {
            assert_eq!(
                Snowflake::from_json(input).unwrap_err(),
                Error::JsonUnmarshal { len: input.len() },
                "{input:?}"
            );
        }
    }

    #[test]
    fn from_json_rejects_non_numeric_interior() {
        for input in [&b"\"abc\""[..], b"\"\"", b"\"12 \"", b"\"4294967296a\""] {
            assert!(
                matches!(Snowflake::from_json(input), Err(Error::ParseError(_))),
                "{input:?}"
            );
        }
    }

    #[test]
    fn from_json_rejects_invalid_utf8() {
        assert_eq!(
            Snowflake::from_json(b"\"\xff\"").unwrap_err(),
            Error::JsonUnmarshal { len: 3 }
        );
    }
}
