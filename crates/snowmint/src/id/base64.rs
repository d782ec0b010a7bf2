use crate::{Error, Result};

/// Digits in increasing value: `0-9`, `a-z`, `A-Z`, `+`, `/`.
const ALPHABET: &[u8; 64] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ+/";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: u32 = 6;
const DIGIT_MASK: u64 = 0x3F;

/// Longest encoding of a 64-bit value: `ceil(64 / 6)`.
pub(crate) const MAX_ENCODED_LEN: usize = 11;

/// Lookup table from ASCII byte to digit value.
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        lut[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    lut
};

/// Encodes `value` as a radix-64 numeral, most significant digit first.
///
/// Zero encodes as `"0"`; every other value has no leading zero digit.
pub(crate) fn encode_base64(value: u64) -> String {
    let mut buf = [0_u8; MAX_ENCODED_LEN];
    let mut pos = MAX_ENCODED_LEN;
    let mut rest = value;
    loop {
        pos -= 1;
        buf[pos] = ALPHABET[(rest & DIGIT_MASK) as usize];
        rest >>= BITS_PER_CHAR;
        if rest == 0 {
            break;
        }
    }
    buf[pos..].iter().copied().map(char::from).collect()
}

/// Decodes a radix-64 numeral.
///
/// Leading zero digits are accepted and the empty string decodes to zero.
/// Values past 64 bits wrap, the same way `value * 64 + digit` wraps in
/// two's complement.
pub(crate) fn decode_base64(encoded: &str) -> Result<u64> {
    let mut acc = 0_u64;
    for (index, byte) in encoded.bytes().enumerate() {
        let digit = LOOKUP[byte as usize];
        if digit == NO_VALUE {
            return Err(Error::InvalidCharacter { byte, index });
        }
        acc = (acc << BITS_PER_CHAR) | u64::from(digit);
    }
    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_values_follow_alphabet_order() {
        let cases = [
            (0, "0"),
            (9, "9"),
            (10, "a"),
            (35, "z"),
            (36, "A"),
            (61, "Z"),
            (62, "+"),
            (63, "/"),
            (64, "10"),
        ];
        for (value, encoded) in cases {
            assert_eq!(encode_base64(value), encoded, "encode {value}");
            assert_eq!(decode_base64(encoded).unwrap(), value, "decode {encoded}");
        }
    }

    #[test]
    fn zero_is_a_single_digit() {
        assert_eq!(encode_base64(0), "0");
    }

    #[test]
    fn max_63_bit_value_fills_eleven_digits() {
        let max = i64::MAX as u64;
        assert_eq!(encode_base64(max), "7//////////");
        assert_eq!(decode_base64("7//////////").unwrap(), max);
    }

    #[test]
    fn full_64_bit_range_still_fits_the_buffer() {
        assert_eq!(encode_base64(u64::MAX), "f//////////");
        assert_eq!(encode_base64(u64::MAX).len(), MAX_ENCODED_LEN);
    }

    #[test]
    fn decodes_known_values() {
        assert_eq!(decode_base64("3//////////").unwrap(), 4_611_686_018_427_387_903);
        assert_eq!(decode_base64("400000").unwrap(), 4_294_967_296);
    }

    #[test]
    fn decode_accepts_leading_zeros() {
        assert_eq!(decode_base64("0042").unwrap(), decode_base64("42").unwrap());
    }

    #[test]
    fn decode_of_empty_string_is_zero() {
        assert_eq!(decode_base64("").unwrap(), 0);
    }

    #[test]
    fn decode_wraps_past_64_bits() {
        // 16 * 64^10 == 2^64
        assert_eq!(decode_base64("g0000000000").unwrap(), 0);
        assert_eq!(decode_base64("g0000000001").unwrap(), 1);
    }

    #[test]
    fn decode_returns_error_for_invalid_character() {
        assert_eq!(
            decode_base64("ab.c").unwrap_err(),
            Error::InvalidCharacter {
                byte: b'.',
                index: 2
            }
        );
    }

    #[test]
    fn decode_rejects_non_ascii() {
        // 'é' is two bytes, the first of which is 0xC3
        assert_eq!(
            decode_base64("aé").unwrap_err(),
            Error::InvalidCharacter {
                byte: 0xC3,
                index: 1
            }
        );
    }

    #[test]
    fn decode_rejects_standard_base64_padding() {
        assert!(matches!(
            decode_base64("ab=="),
            Err(Error::InvalidCharacter { byte: b'=', .. })
        ));
    }
}
